use crate::auth::use_auth;
use crate::components::icons::{RefreshCw, ShoppingCart};
use crate::components::toast::{self, Notification, ToastHost};
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_shared::Product;

#[component]
pub fn CustomerDashboardPage() -> impl IntoView {
    let ctx = use_auth();
    let auth_state = ctx.state;

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    // 购物车只是内存里的占位，不做任何持久化
    let (cart, set_cart) = signal(Vec::<Product>::new());
    let notification = RwSignal::new(Option::<Notification>::None);

    // 每次拉取自增一代；迟到的响应（被新一轮取代，或组件已卸载）
    // 直接丢弃，不写入任何状态。
    let fetch_gen = StoredValue::new(0u64);

    let load_products = move || {
        let Some(api) = auth_state.get_untracked().api else {
            return;
        };
        let generation = fetch_gen.get_value() + 1;
        fetch_gen.set_value(generation);
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = api.list_products(None).await;
            if fetch_gen.try_get_value() != Some(generation) {
                return;
            }
            match result {
                Ok(data) => set_products.set(data),
                Err(_) => set_error.set(Some("Failed to load products.".to_string())),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    Effect::new(move |_| {
        if auth_state.get().api.is_some() {
            load_products();
        }
    });

    let add_to_cart = move |product: Product| {
        let name = product.name.clone();
        set_cart.update(|cart| cart.push(product));
        notification.set(toast::success(format!("{} added to cart!", name)));
    };

    let cart_count = move || cart.with(Vec::len);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-6">
                <ToastHost notification=notification />

                <div class="flex items-center justify-between">
                    <div>
                        <h2 class="text-2xl font-bold">"Available Products"</h2>
                        <p class="text-base-content/70 text-sm">"Browse the catalog and fill your cart."</p>
                    </div>
                    <div class="flex items-center gap-2">
                        <div class="badge badge-primary badge-lg gap-2">
                            <ShoppingCart attr:class="h-4 w-4" />
                            {cart_count}
                        </div>
                        <button on:click=move |_| load_products() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>
                </div>

                <Show when=move || loading.get()>
                    <div class="flex justify-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                </Show>

                <Show when=move || error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error.get().unwrap()}</span>
                    </div>
                </Show>

                <Show when=move || !loading.get() && error.get().is_none() && products.with(Vec::is_empty)>
                    <p class="text-center py-12 text-base-content/50">"No products available."</p>
                </Show>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <For
                        each=move || products.get()
                        key=|p| p.product_id
                        children=move |product| {
                            let for_cart = product.clone();
                            view! {
                                <div class="card bg-base-100 shadow-sm">
                                    <figure class="h-40 bg-base-300">
                                        {product.cover_img_url.clone().map(|url| view! {
                                            <img src=url alt=product.name.clone() class="object-cover h-full w-full" />
                                        })}
                                    </figure>
                                    <div class="card-body">
                                        <h3 class="card-title">{product.name.clone()}</h3>
                                        <p class="text-base-content/70">{format!("${:.2}", product.price)}</p>
                                        <div class="card-actions justify-end">
                                            <button
                                                class="btn btn-success btn-sm gap-2"
                                                on:click=move |_| add_to_cart(for_cart.clone())
                                            >
                                                <ShoppingCart attr:class="h-4 w-4" /> "Add to Cart"
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </div>
    }
}
