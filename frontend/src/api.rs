use gloo_net::http::Request;
use std::fmt;
use storefront_shared::protocol::{
    ApiRequest, CreateProductRequest, DeleteProductRequest, HttpMethod, ListCategoriesRequest,
    ListProductsRequest, LoginRequest, UpdateProductRequest,
};
use storefront_shared::{Category, LoginResponse, Product, ProductDraft, ValidationErrors};

/// API 调用失败的分类
///
/// 视图层据此选择呈现策略：Validation 逐字段内联展示，
/// 其余统一为一条普通的失败提示。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 网络/传输层失败（请求根本没有得到响应）
    Network(String),
    /// 401：凭据无效或 token 失效
    Unauthorized,
    /// 422 + 结构化错误体：逐字段的校验消息
    Validation(ValidationErrors),
    /// 其余非 2xx 响应
    Http { status: u16, message: String },
    /// 2xx 响应但响应体无法解析
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Unauthorized => write!(f, "invalid credentials"),
            ApiError::Validation(errors) => {
                write!(f, "validation failed for {} field(s)", errors.errors.len())
            }
            ApiError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Decode(msg) => write!(f, "unexpected response body: {}", msg),
        }
    }
}

/// 把非 2xx 响应归类到错误分类
///
/// 422 优先尝试解析结构化错误体，解析不出来就退化为普通 HTTP 错误。
fn classify_failure(status: u16, body: &str) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        422 => match serde_json::from_str::<ValidationErrors>(body) {
            Ok(errors) if !errors.is_empty() => ApiError::Validation(errors),
            _ => ApiError::Http {
                status,
                message: "unprocessable request".to_string(),
            },
        },
        _ => ApiError::Http {
            status,
            message: "request failed".to_string(),
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StorefrontApi {
    pub base_url: String,
    token: Option<String>,
}

impl StorefrontApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
        }
    }

    /// 附带 bearer token 的客户端（登录成功/水合恢复后使用）
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送请求并完成守卫检查，返回成功的原始响应
    async fn dispatch<R: ApiRequest>(&self, request: &R) -> Result<gloo_net::http::Response, ApiError> {
        let url = self.url(&request.path());
        let builder = match R::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };

        let builder = builder.header("Accept", "application/json");
        let builder = match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        };

        // 只有携带主体的方法走 json() 路径
        let sent = match R::METHOD {
            HttpMethod::Post | HttpMethod::Put => builder
                .json(request)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await,
            HttpMethod::Get | HttpMethod::Delete => builder.send().await,
        };

        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;
        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &body))
    }

    /// 发送请求并反序列化响应体
    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let response = self.dispatch(request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        // 204 / 空 200：按 JSON null 解析，让 `()` 响应类型成立
        let payload = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 发送请求，只关心成败，不读取响应体
    ///
    /// 写操作走这条路径：调用方随后无条件重新拉取列表，
    /// 响应体里的数据不会被使用。
    async fn send_discard<R: ApiRequest>(&self, request: &R) -> Result<(), ApiError> {
        self.dispatch(request).await.map(|_| ())
    }

    // =========================================================
    // 端点方法
    // =========================================================

    /// 用邮箱/密码换取 token 与用户声明
    pub async fn login(&self, email: String, password: String) -> Result<LoginResponse, ApiError> {
        self.send(&LoginRequest { email, password }).await
    }

    /// 获取商品列表；`supplier_id` 限定为某个供应商的商品
    pub async fn list_products(&self, supplier_id: Option<u64>) -> Result<Vec<Product>, ApiError> {
        self.send(&ListProductsRequest { supplier_id })
            .await
            .map(|collection| collection.data)
    }

    /// 创建商品
    pub async fn create_product(&self, draft: ProductDraft) -> Result<(), ApiError> {
        self.send_discard(&CreateProductRequest { draft }).await
    }

    /// 更新商品
    pub async fn update_product(&self, product_id: u64, draft: ProductDraft) -> Result<(), ApiError> {
        self.send_discard(&UpdateProductRequest { product_id, draft })
            .await
    }

    /// 删除商品
    pub async fn delete_product(&self, product_id: u64) -> Result<(), ApiError> {
        self.send_discard(&DeleteProductRequest { product_id }).await
    }

    /// 获取分类列表
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.send(&ListCategoriesRequest).await
    }
}

#[cfg(test)]
mod tests;
