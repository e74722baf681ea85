use super::*;
use storefront_shared::Role;

// =========================================================
// 失败分类
// =========================================================

#[test]
fn status_401_is_an_authentication_failure() {
    assert_eq!(classify_failure(401, ""), ApiError::Unauthorized);
    assert_eq!(
        classify_failure(401, r#"{"message":"Unauthenticated."}"#),
        ApiError::Unauthorized
    );
}

#[test]
fn status_422_with_field_errors_is_a_validation_failure() {
    let body = r#"{"errors":{"sku":["The sku has already been taken."],"price":["The price must be a number."]}}"#;
    match classify_failure(422, body) {
        ApiError::Validation(errors) => {
            assert_eq!(errors.field("sku"), ["The sku has already been taken."]);
            assert_eq!(errors.field("price").len(), 1);
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn status_422_without_a_parsable_body_degrades_to_http_error() {
    match classify_failure(422, "<html>oops</html>") {
        ApiError::Http { status, .. } => assert_eq!(status, 422),
        other => panic!("expected http error, got {:?}", other),
    }
    // 结构正确但为空的 errors 映射同样不算校验失败
    match classify_failure(422, r#"{"errors":{}}"#) {
        ApiError::Http { status, .. } => assert_eq!(status, 422),
        other => panic!("expected http error, got {:?}", other),
    }
}

#[test]
fn other_failures_are_generic() {
    match classify_failure(500, "server exploded") {
        ApiError::Http { status, .. } => assert_eq!(status, 500),
        other => panic!("expected http error, got {:?}", other),
    }
}

// =========================================================
// 客户端构造
// =========================================================

#[test]
fn base_url_is_normalized_and_joined() {
    let api = StorefrontApi::new("http://127.0.0.1:8000/api/");
    assert_eq!(api.url("/products"), "http://127.0.0.1:8000/api/products");
    assert_eq!(api.url("categories"), "http://127.0.0.1:8000/api/categories");
}

#[test]
fn with_token_keeps_the_base_url() {
    let api = StorefrontApi::new("http://127.0.0.1:8000/api").with_token("secret");
    assert_eq!(api.base_url, "http://127.0.0.1:8000/api");
}

// =========================================================
// 登录响应解码（信任后端形状，但多余字段不进入状态）
// =========================================================

#[test]
fn login_response_flattens_principal_and_ignores_extras() {
    let raw = r#"{
        "token": "tok-123",
        "person_id": 9,
        "name": "Ada",
        "email": "ada@example.com",
        "tp_person": 1,
        "personsupplier_id": null
    }"#;
    let response: LoginResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(response.token, "tok-123");
    assert_eq!(response.principal.role(), Role::Customer);
    assert_eq!(response.principal.personsupplier_id, None);
    // email 被丢弃：序列化回去后不再出现
    let round = serde_json::to_string(&response.principal).unwrap();
    assert!(!round.contains("email"));
}

#[test]
fn enveloped_product_list_decodes() {
    let raw = r#"{"data":[{
        "product_id": 1,
        "name": "Widget",
        "description": null,
        "cover_img_url": null,
        "sku": "W-1",
        "price": "12.50",
        "stock_quantity": 4,
        "is_active": true,
        "category_id": 2,
        "personsupplier_id": 7
    }]}"#;
    let collection: storefront_shared::ProductCollection = serde_json::from_str(raw).unwrap();
    assert_eq!(collection.data.len(), 1);
    assert_eq!(collection.data[0].price, 12.5);
}
