use chrono::Utc;
use serde::Deserialize;

use crate::auth::{AuthenticatedUser, hash_password, verify_password};
use crate::domain::user::{NewUser, UpdateUser, User, UserListQuery};
use crate::forms::users::{EditUserForm, LoginForm, RegisterUserForm};
use crate::pagination::{Page, Pagination};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the user listing.
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Resolve the requester to an active account.
///
/// A session that points at a missing or soft-deleted user is treated the
/// same as no session at all.
pub(crate) fn require_active_user<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_id(user.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)
}

fn hash(password: &str) -> ServiceResult<String> {
    hash_password(password).map_err(|err| {
        log::error!("Failed to hash password: {err}");
        ServiceError::Internal(err.to_string())
    })
}

/// Create an account from a registration payload.
pub fn register_user<R>(repo: &R, form: RegisterUserForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let registration = form
        .into_registration()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let password_hash = hash(&registration.password)?;
    let new_user = NewUser::new(registration.name, registration.email, password_hash);

    match repo.create_user(&new_user) {
        Ok(user) => {
            log::info!("Registered user {}", user.id);
            Ok(user)
        }
        Err(err) => {
            let err = ServiceError::from(err);
            if !matches!(err, ServiceError::Conflict) {
                log::error!("Failed to register user: {err}");
            }
            Err(err)
        }
    }
}

pub fn list_users<R>(repo: &R, query: UsersQuery) -> ServiceResult<Page<User>>
where
    R: UserReader + ?Sized,
{
    let pagination = Pagination::new(query.page, query.per_page);
    let mut list_query = UserListQuery::new().paginate(pagination);

    if let Some(term) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        list_query = list_query.search(term);
    }

    let (total, items) = repo.list_users(list_query).map_err(ServiceError::from)?;

    Ok(Page::new(items, pagination, total))
}

pub fn current_user<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    require_active_user(repo, user)
}

/// Apply profile changes to the requester's account. A new password is
/// hashed before it is stored.
pub fn update_current_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditUserForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let current = require_active_user(repo, user)?;

    let changes = form
        .into_profile_changes()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut updates = UpdateUser::new(Utc::now().naive_utc());
    if let Some(name) = changes.name {
        updates = updates.name(name);
    }
    if let Some(email) = changes.email {
        updates = updates.email(email);
    }
    if let Some(password) = changes.password {
        updates = updates.password_hash(hash(&password)?);
    }

    if updates.is_empty() {
        return Ok(current);
    }

    repo.update_user(user.id, &updates)
        .map_err(ServiceError::from)
}

/// Soft-delete the requester's account together with their products.
pub fn delete_current_user<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    require_active_user(repo, user)?;

    repo.soft_delete_user(user.id)
        .map_err(ServiceError::from)?;
    log::info!("User {} deleted their account", user.id);

    Ok(())
}

/// Check login credentials. Unknown emails and wrong passwords are
/// indistinguishable to the caller.
pub fn authenticate<R>(repo: &R, form: LoginForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let form = form
        .into_credentials()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let user = repo
        .get_user_by_email(&form.email)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)?;

    if !verify_password(&form.password, &user.password_hash) {
        log::warn!("Failed login attempt for user {}", user.id);
        return Err(ServiceError::Unauthorized);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::{MockRepository, MockUserReader, MockUserWriter};

    fn sample_user(id: Uuid, password_hash: &str) -> User {
        let now = Utc::now().naive_utc();
        User {
            id,
            name: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn register_form() -> RegisterUserForm {
        RegisterUserForm {
            name: "Maria".to_string(),
            email: "Maria@Example.com".to_string(),
            password: "s3cret-pass".to_string(),
        }
    }

    #[test]
    fn register_user_stores_hashed_password() {
        let mut repo = MockUserWriter::new();
        repo.expect_create_user()
            .times(1)
            .withf(|new_user| {
                assert_eq!(new_user.email, "maria@example.com");
                assert_ne!(new_user.password_hash, "s3cret-pass");
                assert!(verify_password("s3cret-pass", &new_user.password_hash));
                true
            })
            .returning(|new_user| Ok(sample_user(Uuid::new_v4(), &new_user.password_hash)));

        let user = register_user(&repo, register_form()).expect("expected success");

        assert_eq!(user.name, "Maria");
    }

    #[test]
    fn register_user_maps_duplicate_email_to_conflict() {
        let mut repo = MockUserWriter::new();
        repo.expect_create_user()
            .returning(|_| Err(RepositoryError::Conflict("usuarios.email".to_string())));

        let result = register_user(&repo, register_form());

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn register_user_rejects_invalid_form_before_storing() {
        let repo = MockUserWriter::new();
        let mut form = register_form();
        form.password = "short".to_string();

        let result = register_user(&repo, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn list_users_applies_search() {
        let mut repo = MockUserReader::new();
        repo.expect_list_users()
            .times(1)
            .withf(|query| query.search.as_deref() == Some("maria"))
            .returning(|_| Ok((1, vec![sample_user(Uuid::new_v4(), "hash")])));

        let page = list_users(
            &repo,
            UsersQuery {
                search: Some(" maria ".to_string()),
                ..Default::default()
            },
        )
        .expect("expected success");

        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn current_user_of_deleted_account_is_unauthorized() {
        let mut repo = MockUserReader::new();
        repo.expect_get_user_by_id().returning(|_| Ok(None));

        let result = current_user(&repo, &AuthenticatedUser::new(Uuid::new_v4()));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn update_current_user_rehashes_password() {
        let mut repo = MockRepository::new();
        let user = AuthenticatedUser::new(Uuid::new_v4());
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(sample_user(id, "old-hash"))));
        repo.expect_update_user()
            .times(1)
            .withf(|_, updates| {
                updates.name.is_none()
                    && updates
                        .password_hash
                        .as_deref()
                        .is_some_and(|hash| verify_password("n3w-password", hash))
            })
            .returning(|id, updates| {
                Ok(sample_user(
                    id,
                    updates.password_hash.as_deref().unwrap_or_default(),
                ))
            });

        let form = EditUserForm {
            password: Some("n3w-password".to_string()),
            ..Default::default()
        };
        let updated = update_current_user(&repo, &user, form).expect("expected success");

        assert_eq!(updated.id, user.id);
    }

    #[test]
    fn empty_profile_update_skips_write() {
        let mut repo = MockRepository::new();
        let user = AuthenticatedUser::new(Uuid::new_v4());
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(sample_user(id, "hash"))));
        repo.expect_update_user().never();

        let result = update_current_user(&repo, &user, EditUserForm::default());

        assert!(result.is_ok());
    }

    #[test]
    fn delete_current_user_soft_deletes_account() {
        let mut repo = MockRepository::new();
        let user = AuthenticatedUser::new(Uuid::new_v4());
        let expected = user.id;
        repo.expect_get_user_by_id()
            .returning(|id| Ok(Some(sample_user(id, "hash"))));
        repo.expect_soft_delete_user()
            .times(1)
            .withf(move |id| *id == expected)
            .returning(|_| Ok(()));

        assert!(delete_current_user(&repo, &user).is_ok());
    }

    #[test]
    fn authenticate_accepts_correct_password() {
        let hash = hash_password("s3cret-pass").expect("hashing should succeed");
        let mut repo = MockUserReader::new();
        repo.expect_get_user_by_email()
            .withf(|email| email == "maria@example.com")
            .returning(move |_| Ok(Some(sample_user(Uuid::new_v4(), &hash))));

        let form = LoginForm {
            email: " MARIA@example.com ".to_string(),
            password: "s3cret-pass".to_string(),
        };

        assert!(authenticate(&repo, form).is_ok());
    }

    #[test]
    fn authenticate_rejects_wrong_password_and_unknown_email() {
        let hash = hash_password("s3cret-pass").expect("hashing should succeed");
        let mut repo = MockUserReader::new();
        repo.expect_get_user_by_email()
            .returning(move |email| {
                if email == "maria@example.com" {
                    Ok(Some(sample_user(Uuid::new_v4(), &hash)))
                } else {
                    Ok(None)
                }
            });

        let wrong_password = LoginForm {
            email: "maria@example.com".to_string(),
            password: "guess".to_string(),
        };
        let unknown_email = LoginForm {
            email: "nobody@example.com".to_string(),
            password: "s3cret-pass".to_string(),
        };

        assert!(matches!(
            authenticate(&repo, wrong_password),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            authenticate(&repo, unknown_email),
            Err(ServiceError::Unauthorized)
        ));
    }
}
