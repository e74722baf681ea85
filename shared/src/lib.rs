use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod protocol;
pub mod serde_util;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 后端 REST API 根路径
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

/// 持久化会话的最长有效期（天）
pub const SESSION_MAX_AGE_DAYS: i64 = 7;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 账户角色，对应后端的 `tp_person` 整型判别值
///
/// 1 = 顾客，2 = 供应商。未知判别值是反序列化错误，
/// 由调用方按"损坏的会话记录"处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Role {
    Customer,
    Supplier,
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        match role {
            Role::Customer => 1,
            Role::Supplier => 2,
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::Customer),
            2 => Ok(Role::Supplier),
            other => Err(format!("unknown tp_person discriminant: {}", other)),
        }
    }
}

/// 已认证用户的最小声明集
///
/// 刻意不包含 email 与原始 token：登录响应里与凭据相关的字段
/// 不进入 Principal，token 单独存放在自己的存储槽位中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub person_id: u64,
    pub name: String,
    pub tp_person: Role,
    /// 供应商账户的供应商标识（顾客为 None）
    #[serde(default)]
    pub personsupplier_id: Option<u64>,
}

impl Principal {
    pub fn role(&self) -> Role {
        self.tp_person
    }
}

/// `POST /login` 的成功响应：token 加上扁平的 principal 字段
///
/// 后端响应里多出的字段（email 等）在反序列化时被忽略，
/// 不进入客户端状态。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub principal: Principal,
}

/// 持久化到浏览器存储的会话记录
///
/// 原始实现无限期保存整个登录响应；这里只保存最小声明集，
/// 并附带签发时间用于过期判断。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub principal: Principal,
    pub issued_at: DateTime<Utc>,
}

impl PersistedSession {
    /// 以当前时间签发一条新记录
    pub fn issue(principal: Principal) -> Self {
        Self {
            principal,
            issued_at: Utc::now(),
        }
    }

    /// 记录在 `now` 时刻是否已过期
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.issued_at > Duration::days(SESSION_MAX_AGE_DAYS)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// 商品记录，由请求它的视图临时持有
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_img_url: Option<String>,
    pub sku: String,
    // 后端的 decimal 字段可能序列化为数字或字符串
    #[serde(with = "serde_util::lenient_price")]
    pub price: f64,
    pub stock_quantity: u32,
    pub is_active: bool,
    pub category_id: u64,
    pub personsupplier_id: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 商品分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: u64,
    pub name: String,
}

/// 创建/更新商品时提交的表单载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_img_url: Option<String>,
    pub sku: String,
    pub price: f64,
    pub stock_quantity: u32,
    pub is_active: bool,
    pub category_id: u64,
    pub personsupplier_id: u64,
}

/// 商品列表响应的分页信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCollection {
    pub data: Vec<Product>,
}

// =========================================================
// 校验错误 (Validation Errors)
// =========================================================

/// 后端 422 响应体：`{"errors": {"field": ["message", ...]}}`
///
/// BTreeMap 保证字段遍历顺序稳定，UI 渲染不抖动。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// 指定字段的错误消息（无则为空切片）
    pub fn field(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 追加一条本地产生的字段错误（如提交前的数值解析失败）
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_discriminants_round_trip() {
        assert_eq!(u8::from(Role::Customer), 1);
        assert_eq!(u8::from(Role::Supplier), 2);
        assert_eq!(Role::try_from(1).unwrap(), Role::Customer);
        assert_eq!(Role::try_from(2).unwrap(), Role::Supplier);
    }

    #[test]
    fn unknown_role_discriminant_is_an_error() {
        assert!(Role::try_from(0).is_err());
        assert!(Role::try_from(3).is_err());
        // 通过 serde 的路径也必须失败，供"损坏记录"策略使用
        assert!(serde_json::from_str::<Role>("7").is_err());
    }

    #[test]
    fn principal_decodes_from_backend_shape() {
        let raw = r#"{"person_id":42,"name":"Ada","tp_person":2,"personsupplier_id":7}"#;
        let p: Principal = serde_json::from_str(raw).unwrap();
        assert_eq!(p.role(), Role::Supplier);
        assert_eq!(p.personsupplier_id, Some(7));
    }

    #[test]
    fn persisted_session_expiry_window() {
        let p = Principal {
            person_id: 1,
            name: "Ada".to_string(),
            tp_person: Role::Customer,
            personsupplier_id: None,
        };
        let record = PersistedSession {
            principal: p,
            issued_at: Utc::now() - Duration::days(SESSION_MAX_AGE_DAYS - 1),
        };
        assert!(!record.is_expired());

        let stale = PersistedSession {
            issued_at: Utc::now() - Duration::days(SESSION_MAX_AGE_DAYS + 1),
            ..record
        };
        assert!(stale.is_expired());
    }

    #[test]
    fn validation_errors_field_lookup() {
        let raw = r#"{"errors":{"sku":["The sku has already been taken."]}}"#;
        let errors: ValidationErrors = serde_json::from_str(raw).unwrap();
        assert_eq!(errors.field("sku").len(), 1);
        assert!(errors.field("name").is_empty());
        assert!(!errors.is_empty());
    }
}
