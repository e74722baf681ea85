use crate::auth::{Session, logout, use_auth};
use crate::components::icons::{LogOut, ShoppingBag};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use storefront_shared::Role;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();
    let auth_state = ctx.state;

    let go_home = move |_| router.navigate("/");
    let go_login = move |_| router.navigate(AppRoute::Login.to_path());
    let go_dashboard = move |_| {
        if let Some(role) = auth_state.get_untracked().role() {
            router.navigate(AppRoute::landing(role).to_path());
        }
    };
    // 注销后的跳转由路由服务的会话监听自动完成
    let on_logout = move |_| logout(&ctx);

    view! {
        <div class="navbar bg-base-100 shadow-md px-4">
            <div class="flex-1 gap-2">
                <a class="btn btn-ghost text-xl gap-2" on:click=go_home>
                    <ShoppingBag attr:class="h-6 w-6 text-primary" /> "Storefront"
                </a>
            </div>
            <div class="flex-none gap-2">
                {move || match auth_state.get().session {
                    Session::Unresolved => ().into_any(),
                    Session::Absent => view! {
                        <a class="btn btn-ghost" on:click=go_login>"Login"</a>
                    }
                    .into_any(),
                    Session::Present(principal) => {
                        let label = match principal.role() {
                            Role::Customer => "Browse products",
                            Role::Supplier => "My products",
                        };
                        view! {
                            <a class="btn btn-ghost" on:click=go_dashboard>{label}</a>
                            <span class="badge badge-neutral hidden md:inline-flex">
                                {principal.name.clone()}
                            </span>
                            <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                                <LogOut attr:class="h-4 w-4" /> "Logout"
                            </button>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
