// Rust-side names map onto the Portuguese column names through `sql_name`.

diesel::table! {
    #[sql_name = "usuarios"]
    users (id) {
        id -> Text,
        #[sql_name = "nome"]
        name -> Text,
        email -> Text,
        #[sql_name = "senha"]
        password_hash -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        deleted_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    #[sql_name = "produtos"]
    products (id) {
        id -> Text,
        #[sql_name = "usuario_id"]
        user_id -> Text,
        #[sql_name = "nome"]
        name -> Text,
        #[sql_name = "valor"]
        price -> Double,
        #[sql_name = "quantidade"]
        quantity -> Integer,
        #[sql_name = "descricao"]
        description -> Text,
        #[sql_name = "categoria"]
        category -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        deleted_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    #[sql_name = "produto_caracteristicas"]
    product_characteristics (id) {
        id -> Text,
        #[sql_name = "produto_id"]
        product_id -> Text,
        #[sql_name = "nome"]
        name -> Text,
        #[sql_name = "descricao"]
        description -> Text,
        #[sql_name = "posicao"]
        position -> Integer,
    }
}

diesel::table! {
    #[sql_name = "produto_imagens"]
    product_images (id) {
        id -> Text,
        #[sql_name = "produto_id"]
        product_id -> Text,
        url -> Text,
        #[sql_name = "descricao"]
        description -> Text,
        #[sql_name = "posicao"]
        position -> Integer,
    }
}

diesel::joinable!(products -> users (user_id));
diesel::joinable!(product_characteristics -> products (product_id));
diesel::joinable!(product_images -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    products,
    product_characteristics,
    product_images,
);
