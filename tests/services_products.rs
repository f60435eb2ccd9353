use uuid::Uuid;

use product_catalog::auth::AuthenticatedUser;
use product_catalog::forms::products::{
    AddProductForm, EditProductForm, ProductCharacteristicForm, ProductImageForm,
};
use product_catalog::repository::{DieselRepository, ProductReader};
use product_catalog::services::products::{self, ProductsQuery};
use product_catalog::services::ServiceError;

mod common;

fn add_form() -> AddProductForm {
    AddProductForm {
        name: "Coffee grinder".to_string(),
        price: 79.9,
        quantity: 12,
        description: "Burr grinder".to_string(),
        category: "Kitchen".to_string(),
        characteristics: vec![ProductCharacteristicForm {
            name: "Burr".to_string(),
            description: "Conical steel".to_string(),
        }],
        images: vec![ProductImageForm {
            url: "https://cdn.example.com/grinder.png".to_string(),
            description: "Front".to_string(),
        }],
    }
}

#[test]
fn create_product_stores_requester_as_owner() {
    let test_db = common::TestDb::new("service_create_product_stores_owner.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = common::create_user(&repo, "Owner");
    let user = AuthenticatedUser::new(owner.id);

    let created = products::create_product(&repo, &user, add_form());
    assert!(
        created.is_ok(),
        "expected product creation to succeed: {created:?}"
    );
    let created = created.unwrap();

    let fetched = products::get_product(&repo, created.id).expect("product should exist");
    assert_eq!(fetched.user_id, owner.id);
    assert_eq!(fetched.characteristics.len(), 1);
    assert_eq!(fetched.characteristics[0].description, "Conical steel");
    assert_eq!(fetched.images.len(), 1);
    assert_eq!(fetched.images[0].url, "https://cdn.example.com/grinder.png");
}

#[test]
fn create_product_requires_known_user() {
    let test_db = common::TestDb::new("service_create_product_requires_user.db");
    let repo = DieselRepository::new(test_db.pool());

    let result = products::create_product(&repo, &AuthenticatedUser::new(Uuid::new_v4()), add_form());

    assert!(matches!(result, Err(ServiceError::Unauthorized)));
    let page = products::list_products(&repo, ProductsQuery::default()).expect("list");
    assert_eq!(page.total, 0);
}

#[test]
fn update_by_other_user_is_forbidden_and_leaves_row_unchanged() {
    let test_db = common::TestDb::new("service_update_by_other_user_is_forbidden.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = common::create_user(&repo, "Owner");
    let intruder = common::create_user(&repo, "Intruder");

    let created = products::create_product(&repo, &AuthenticatedUser::new(owner.id), add_form())
        .expect("create");

    let form = EditProductForm {
        name: Some("Hijacked".to_string()),
        images: Some(Vec::new()),
        ..Default::default()
    };
    let result =
        products::update_product(&repo, &AuthenticatedUser::new(intruder.id), created.id, form);
    assert!(matches!(result, Err(ServiceError::Forbidden)));

    let result = products::delete_product(&repo, &AuthenticatedUser::new(intruder.id), created.id);
    assert!(matches!(result, Err(ServiceError::Forbidden)));

    let unchanged = products::get_product(&repo, created.id).expect("product should exist");
    assert_eq!(unchanged, created);
}

#[test]
fn delete_product_hides_it_from_reads() {
    let test_db = common::TestDb::new("service_delete_product_hides_it.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = common::create_user(&repo, "Owner");
    let user = AuthenticatedUser::new(owner.id);

    let created = products::create_product(&repo, &user, add_form()).expect("create");
    products::delete_product(&repo, &user, created.id).expect("delete");

    assert!(matches!(
        products::get_product(&repo, created.id),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        products::update_product(&repo, &user, created.id, EditProductForm::default()),
        Err(ServiceError::NotFound)
    ));

    let page = products::list_products(&repo, ProductsQuery::default()).expect("list");
    assert_eq!(page.total, 0);

    let archived = repo
        .get_product_by_id(created.id, true)
        .expect("query")
        .expect("row is kept");
    assert!(archived.deleted_at.is_some());
}
