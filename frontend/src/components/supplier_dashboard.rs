use crate::auth::use_auth;
use crate::components::icons::{Pencil, Plus, RefreshCw, Trash2};
use crate::components::product_dialog::ProductDialog;
use crate::components::toast::{self, Notification, ToastHost};
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_shared::{Category, Product, ProductDraft, ValidationErrors};

use crate::api::ApiError;

#[component]
pub fn SupplierDashboardPage() -> impl IntoView {
    let ctx = use_auth();
    let auth_state = ctx.state;

    let (products, set_products) = signal(Vec::<Product>::new());
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let notification = RwSignal::new(Option::<Notification>::None);

    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(Option::<Product>::None);
    let validation_errors = RwSignal::new(ValidationErrors::default());

    let fetch_gen = StoredValue::new(0u64);

    // 守卫保证本视图只对供应商渲染；personsupplier_id 缺失
    // 意味着后端数据异常，按错误态处理而不是悄悄请求全量列表。
    let supplier_id = move || {
        auth_state
            .get_untracked()
            .session
            .principal()
            .and_then(|p| p.personsupplier_id)
    };

    let load_products = move || {
        let Some(api) = auth_state.get_untracked().api else {
            return;
        };
        let Some(supplier) = supplier_id() else {
            set_loading.set(false);
            set_error.set(Some("This account has no supplier profile.".to_string()));
            return;
        };
        let generation = fetch_gen.get_value() + 1;
        fetch_gen.set_value(generation);
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = api.list_products(Some(supplier)).await;
            if fetch_gen.try_get_value() != Some(generation) {
                return;
            }
            match result {
                Ok(data) => set_products.set(data),
                Err(_) => {
                    set_error.set(Some("Failed to load products".to_string()));
                    notification.set(toast::error("Failed to load products."));
                }
            }
            set_loading.set(false);
        });
    };

    let load_categories = move || {
        let Some(api) = auth_state.get_untracked().api else {
            return;
        };
        spawn_local(async move {
            match api.list_categories().await {
                Ok(data) => set_categories.set(data),
                Err(e) => {
                    // 分类拉不到只影响下拉框，不值得打断整个面板
                    web_sys::console::error_1(
                        &format!("[Supplier] Failed to load categories: {}", e).into(),
                    );
                    set_categories.set(Vec::new());
                }
            }
        });
    };

    // 初始加载
    Effect::new(move |_| {
        if auth_state.get().api.is_some() {
            load_products();
            load_categories();
        }
    });

    let open_create = move |_| {
        editing.set(None);
        validation_errors.set(ValidationErrors::default());
        dialog_open.set(true);
    };

    let open_edit = move |product: Product| {
        editing.set(Some(product));
        validation_errors.set(ValidationErrors::default());
        dialog_open.set(true);
    };

    let on_save = Callback::new(move |(product_id, draft): (Option<u64>, ProductDraft)| {
        let Some(api) = auth_state.get_untracked().api else {
            return;
        };
        let is_editing = product_id.is_some();
        spawn_local(async move {
            let result = match product_id {
                Some(id) => api.update_product(id, draft).await,
                None => api.create_product(draft).await,
            };
            match result {
                Ok(()) => {
                    dialog_open.set(false);
                    validation_errors.set(ValidationErrors::default());
                    notification.set(toast::success(if is_editing {
                        "Product updated successfully!"
                    } else {
                        "Product created successfully!"
                    }));
                    // 不做乐观更新：写成功后无条件重新拉取列表
                    load_products();
                }
                Err(ApiError::Validation(errors)) => {
                    // 表单保持打开，错误贴在对应字段旁
                    validation_errors.set(errors);
                }
                Err(_) => {
                    notification.set(toast::error(if is_editing {
                        "Failed to update product."
                    } else {
                        "Failed to create product."
                    }));
                }
            }
        });
    });

    let on_delete = move |product_id: u64| {
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message("Are you sure you want to delete this product?")
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let Some(api) = auth_state.get_untracked().api else {
            return;
        };
        spawn_local(async move {
            match api.delete_product(product_id).await {
                Ok(()) => {
                    notification.set(toast::success("Product deleted successfully!"));
                    load_products();
                }
                Err(_) => notification.set(toast::error("Failed to delete product.")),
            }
        });
    };

    let supplier_id_signal = Signal::derive(move || supplier_id().unwrap_or_default());
    let welcome = move || {
        auth_state
            .get()
            .session
            .principal()
            .map(|p| format!("Welcome, {}! Here are your products:", p.name))
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-6">
                <ToastHost notification=notification />

                <div class="flex items-center justify-between">
                    <div>
                        <h2 class="text-2xl font-bold">"Supplier Dashboard"</h2>
                        <p class="text-base-content/70 text-sm">{welcome}</p>
                    </div>
                    <div class="flex items-center gap-2">
                        <button on:click=open_create class="btn btn-primary gap-2">
                            <Plus attr:class="h-4 w-4" /> "Add New Product"
                        </button>
                        <button on:click=move |_| load_products() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>
                </div>

                <Show when=move || loading.get()>
                    <p class="text-base-content/70">"Loading supplier products..."</p>
                </Show>

                <Show when=move || error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error.get().unwrap()}</span>
                    </div>
                </Show>

                <Show when=move || !loading.get() && error.get().is_none() && products.with(Vec::is_empty)>
                    <p class="text-center py-12 text-base-content/50">"No products found."</p>
                </Show>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <For
                        each=move || products.get()
                        key=|p| p.product_id
                        children=move |product| {
                            let id = product.product_id;
                            let for_edit = product.clone();
                            view! {
                                <div class="card bg-base-100 shadow-sm">
                                    <figure class="h-40 bg-base-300">
                                        {product.cover_img_url.clone().map(|url| view! {
                                            <img src=url alt=product.name.clone() class="object-cover h-full w-full" />
                                        })}
                                    </figure>
                                    <div class="card-body">
                                        <h3 class="card-title">{product.name.clone()}</h3>
                                        <div class="flex items-center gap-2 text-sm text-base-content/70">
                                            <span class="font-mono">{product.sku.clone()}</span>
                                            <span>{format!("${:.2}", product.price)}</span>
                                            <span class="badge badge-ghost">{format!("stock: {}", product.stock_quantity)}</span>
                                        </div>
                                        <div class="card-actions justify-end">
                                            <button class="btn btn-warning btn-sm gap-2" on:click=move |_| open_edit(for_edit.clone())>
                                                <Pencil attr:class="h-4 w-4" /> "Edit"
                                            </button>
                                            <button class="btn btn-error btn-sm gap-2" on:click=move |_| on_delete(id)>
                                                <Trash2 attr:class="h-4 w-4" /> "Delete"
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>

                <ProductDialog
                    open=dialog_open
                    editing=editing
                    categories=Signal::derive(move || categories.get())
                    supplier_id=supplier_id_signal
                    validation_errors=validation_errors
                    on_save=on_save
                />
            </div>
        </div>
    }
}
