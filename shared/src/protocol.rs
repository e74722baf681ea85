use crate::{Category, LoginResponse, ProductCollection, ProductDraft};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// `path` is an instance method rather than a constant because several
/// endpoints embed the resource id (`/products/{id}`) or a query string
/// (`/products?supplier_id=…`) in the URL.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path (or suffix), relative to the API base.
    fn path(&self) -> Cow<'static, str>;
}

// =========================================================
// Request Definitions
// =========================================================

/// Authenticate with email/password credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/login")
    }
}

/// List products, optionally restricted to one supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductsRequest {
    pub supplier_id: Option<u64>,
}

impl ApiRequest for ListProductsRequest {
    type Response = ProductCollection;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        match self.supplier_id {
            Some(id) => Cow::Owned(format!("/products?supplier_id={}", id)),
            None => Cow::Borrowed("/products"),
        }
    }
}

/// Create a new product from a draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    #[serde(flatten)]
    pub draft: ProductDraft,
}

impl ApiRequest for CreateProductRequest {
    type Response = crate::Product;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/products")
    }
}

/// Replace an existing product. The id travels in the path, the draft in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(skip)]
    pub product_id: u64,
    #[serde(flatten)]
    pub draft: ProductDraft,
}

impl ApiRequest for UpdateProductRequest {
    type Response = crate::Product;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/products/{}", self.product_id))
    }
}

/// Delete a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProductRequest {
    #[serde(skip)]
    pub product_id: u64,
}

impl ApiRequest for DeleteProductRequest {
    // 204 or an empty 200. Success is treated as ().
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/products/{}", self.product_id))
    }
}

/// List all categories (bare array, no envelope)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCategoriesRequest;

impl ApiRequest for ListCategoriesRequest {
    type Response = Vec<Category>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/categories")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_list_path_carries_supplier_query() {
        let all = ListProductsRequest { supplier_id: None };
        assert_eq!(all.path(), "/products");

        let mine = ListProductsRequest {
            supplier_id: Some(7),
        };
        assert_eq!(mine.path(), "/products?supplier_id=7");
    }

    #[test]
    fn item_paths_embed_the_resource_id() {
        let update = UpdateProductRequest {
            product_id: 31,
            draft: sample_draft(),
        };
        assert_eq!(update.path(), "/products/31");
        assert_eq!(DeleteProductRequest { product_id: 31 }.path(), "/products/31");
    }

    #[test]
    fn update_body_flattens_the_draft_and_skips_the_id() {
        let update = UpdateProductRequest {
            product_id: 31,
            draft: sample_draft(),
        };
        let body = serde_json::to_value(&update).unwrap();
        assert!(body.get("product_id").is_none());
        assert_eq!(body["sku"], "SKU-1");
        assert_eq!(body["personsupplier_id"], 7);
    }

    fn sample_draft() -> ProductDraft {
        ProductDraft {
            name: "Widget".to_string(),
            description: None,
            cover_img_url: None,
            sku: "SKU-1".to_string(),
            price: 9.5,
            stock_quantity: 3,
            is_active: true,
            category_id: 2,
            personsupplier_id: 7,
        }
    }
}
