use crate::components::product_dialog::form_state::FormState;
use leptos::prelude::*;
use storefront_shared::{Category, Product, ProductDraft, ValidationErrors};

mod form_state;

/// 字段下方的校验消息（无错误时不渲染）
fn field_error(errors: RwSignal<ValidationErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors
            .with(|e| e.field(field).first().cloned())
            .map(|message| {
                view! {
                    <label class="label">
                        <span class="label-text-alt text-error">{message}</span>
                    </label>
                }
            })
    }
}

#[component]
pub fn ProductDialog(
    /// 打开/关闭状态，由父组件持有
    open: RwSignal<bool>,
    /// Some(product) 表示编辑，None 表示新建
    editing: RwSignal<Option<Product>>,
    /// 分类下拉框的选项
    categories: Signal<Vec<Category>>,
    /// 当前供应商标识，写入新建商品的草稿
    supplier_id: Signal<u64>,
    /// 后端 422（或本地解析）产生的字段级错误
    validation_errors: RwSignal<ValidationErrors>,
    #[prop(into)] on_save: Callback<(Option<u64>, ProductDraft)>,
) -> impl IntoView {
    let form = FormState::new();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 打开时按编辑目标初始化表单
    Effect::new(move |_| {
        if open.get() {
            match editing.get_untracked() {
                Some(product) => form.load(&product),
                None => form.reset(supplier_id.get_untracked()),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.to_draft() {
            Ok(draft) => {
                let product_id = editing.get_untracked().map(|p| p.product_id);
                on_save.run((product_id, draft));
            }
            // 本地解析失败与后端 422 走同一条展示路径
            Err(errors) => validation_errors.set(errors),
        }
    };

    let title = move || {
        if editing.get().is_some() {
            "Edit Product"
        } else {
            "Add New Product"
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>

                <form on:submit=on_submit class="space-y-2 mt-4">
                    <div class="form-control">
                        <label for="product-name" class="label">
                            <span class="label-text">"Name"</span>
                        </label>
                        <input id="product-name" required
                            type="text"
                            on:input=move |ev| form.name.set(event_target_value(&ev))
                            prop:value=form.name
                            class="input input-bordered w-full"
                        />
                        {field_error(validation_errors, "name")}
                    </div>

                    <div class="form-control">
                        <label for="product-description" class="label">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea id="product-description"
                            on:input=move |ev| form.description.set(event_target_value(&ev))
                            prop:value=form.description
                            class="textarea textarea-bordered w-full"
                        ></textarea>
                        {field_error(validation_errors, "description")}
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="product-sku" class="label">
                                <span class="label-text">"SKU"</span>
                            </label>
                            <input id="product-sku" required
                                type="text"
                                on:input=move |ev| form.sku.set(event_target_value(&ev))
                                prop:value=form.sku
                                class="input input-bordered w-full"
                            />
                            {field_error(validation_errors, "sku")}
                        </div>
                        <div class="form-control">
                            <label for="product-price" class="label">
                                <span class="label-text">"Price"</span>
                            </label>
                            <input id="product-price" required
                                type="number"
                                step="0.01"
                                min="0"
                                on:input=move |ev| form.price.set(event_target_value(&ev))
                                prop:value=form.price
                                class="input input-bordered w-full"
                            />
                            {field_error(validation_errors, "price")}
                        </div>
                    </div>

                    <div class="form-control">
                        <label for="product-cover" class="label">
                            <span class="label-text">"Cover Image URL"</span>
                        </label>
                        <input id="product-cover"
                            type="text"
                            placeholder="https://..."
                            on:input=move |ev| form.cover_img_url.set(event_target_value(&ev))
                            prop:value=form.cover_img_url
                            class="input input-bordered w-full"
                        />
                        {field_error(validation_errors, "cover_img_url")}
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="product-stock" class="label">
                                <span class="label-text">"Stock Quantity"</span>
                            </label>
                            <input id="product-stock" required
                                type="number"
                                min="0"
                                on:input=move |ev| form.stock_quantity.set(event_target_value(&ev))
                                prop:value=form.stock_quantity
                                class="input input-bordered w-full"
                            />
                            {field_error(validation_errors, "stock_quantity")}
                        </div>
                        <div class="form-control">
                            <label for="product-category" class="label">
                                <span class="label-text">"Category"</span>
                            </label>
                            <select id="product-category" required
                                class="select select-bordered w-full"
                                on:change=move |ev| form.category_id.set(event_target_value(&ev))
                                prop:value=form.category_id
                            >
                                <option value="">"Select a category"</option>
                                <For
                                    each=move || categories.get()
                                    key=|c| c.category_id
                                    children=move |category| {
                                        let id = category.category_id.to_string();
                                        view! {
                                            <option
                                                value=id.clone()
                                                selected=move || form.category_id.get() == id
                                            >
                                                {category.name.clone()}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                            {field_error(validation_errors, "category_id")}
                        </div>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary">
                            {move || if editing.get().is_some() { "Update Product" } else { "Save Product" }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
