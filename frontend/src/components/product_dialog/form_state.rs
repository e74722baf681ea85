//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有（全部以原始字符串形式，和输入框一一对应）
//! - 创建/编辑两种初始化
//! - 提交前解析为 `ProductDraft`，解析失败映射成字段级错误

use leptos::prelude::*;
use storefront_shared::{Product, ProductDraft, ValidationErrors};

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合作为 Props
/// 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub cover_img_url: RwSignal<String>,
    pub sku: RwSignal<String>,
    pub price: RwSignal<String>,
    pub stock_quantity: RwSignal<String>,
    pub category_id: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    pub personsupplier_id: RwSignal<u64>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            cover_img_url: RwSignal::new(String::new()),
            sku: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            stock_quantity: RwSignal::new(String::new()),
            category_id: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            personsupplier_id: RwSignal::new(0),
        }
    }

    /// 重置为"新建商品"的空表单
    pub fn reset(&self, supplier_id: u64) {
        self.name.set(String::new());
        self.description.set(String::new());
        self.cover_img_url.set(String::new());
        self.sku.set(String::new());
        self.price.set(String::new());
        self.stock_quantity.set(String::new());
        self.category_id.set(String::new());
        self.is_active.set(true);
        self.personsupplier_id.set(supplier_id);
    }

    /// 以现有商品填充表单（编辑）
    pub fn load(&self, product: &Product) {
        self.name.set(product.name.clone());
        self.description
            .set(product.description.clone().unwrap_or_default());
        self.cover_img_url
            .set(product.cover_img_url.clone().unwrap_or_default());
        self.sku.set(product.sku.clone());
        self.price.set(format!("{:.2}", product.price));
        self.stock_quantity.set(product.stock_quantity.to_string());
        self.category_id.set(product.category_id.to_string());
        self.is_active.set(product.is_active);
        self.personsupplier_id.set(product.personsupplier_id);
    }

    /// 将表单状态解析为 API 请求载荷
    ///
    /// 数字字段解析失败不发请求，直接以字段级错误返回，
    /// 呈现方式与后端 422 完全一致。
    pub fn to_draft(&self) -> Result<ProductDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let price = match self.price.get_untracked().trim().parse::<f64>() {
            Ok(value) if value >= 0.0 => value,
            _ => {
                errors.push("price", "The price must be a non-negative number.");
                0.0
            }
        };

        let stock_quantity = match self.stock_quantity.get_untracked().trim().parse::<u32>() {
            Ok(value) => value,
            Err(_) => {
                errors.push("stock_quantity", "The stock quantity must be a whole number.");
                0
            }
        };

        let category_id = match self.category_id.get_untracked().parse::<u64>() {
            Ok(value) => value,
            Err(_) => {
                errors.push("category_id", "Select a category.");
                0
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let optional = |value: String| {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() { None } else { Some(trimmed) }
        };

        Ok(ProductDraft {
            name: self.name.get_untracked(),
            description: optional(self.description.get_untracked()),
            cover_img_url: optional(self.cover_img_url.get_untracked()),
            sku: self.sku.get_untracked(),
            price,
            stock_quantity,
            is_active: self.is_active.get_untracked(),
            category_id,
            personsupplier_id: self.personsupplier_id.get_untracked(),
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> FormState {
        let form = FormState::new();
        form.reset(7);
        form.name.set("Widget".to_string());
        form.sku.set("W-1".to_string());
        form.price.set("12.50".to_string());
        form.stock_quantity.set("4".to_string());
        form.category_id.set("2".to_string());
        form
    }

    #[test]
    fn parses_a_complete_form_into_a_draft() {
        let draft = filled_form().to_draft().unwrap();
        assert_eq!(draft.price, 12.5);
        assert_eq!(draft.stock_quantity, 4);
        assert_eq!(draft.category_id, 2);
        assert_eq!(draft.personsupplier_id, 7);
        assert_eq!(draft.description, None);
        assert!(draft.is_active);
    }

    #[test]
    fn bad_numbers_become_field_errors_and_block_the_draft() {
        let form = filled_form();
        form.price.set("twelve".to_string());
        form.stock_quantity.set("-3".to_string());

        let errors = form.to_draft().unwrap_err();
        assert!(!errors.field("price").is_empty());
        assert!(!errors.field("stock_quantity").is_empty());
        assert!(errors.field("name").is_empty());
    }

    #[test]
    fn missing_category_selection_is_a_field_error() {
        let form = filled_form();
        form.category_id.set(String::new());

        let errors = form.to_draft().unwrap_err();
        assert_eq!(errors.field("category_id"), ["Select a category."]);
    }

    #[test]
    fn loading_a_product_prefills_every_field() {
        let form = FormState::new();
        form.load(&Product {
            product_id: 1,
            name: "Widget".to_string(),
            description: Some("A widget".to_string()),
            cover_img_url: None,
            sku: "W-1".to_string(),
            price: 9.0,
            stock_quantity: 2,
            is_active: false,
            category_id: 3,
            personsupplier_id: 7,
            created_at: None,
            updated_at: None,
        });

        assert_eq!(form.price.get_untracked(), "9.00");
        assert_eq!(form.category_id.get_untracked(), "3");
        assert!(!form.is_active.get_untracked());

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.description.as_deref(), Some("A widget"));
        assert_eq!(draft.personsupplier_id, 7);
    }
}
