//! Storefront 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由与守卫决策表（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理（水合 / 登录 / 注销）
//! - `api`: REST 客户端与错误分类
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod customer_dashboard;
    mod icons;
    pub mod login;
    pub mod navbar;
    mod product_dialog;
    pub mod supplier_dashboard;
    mod toast;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::customer_dashboard::CustomerDashboardPage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::supplier_dashboard::SupplierDashboardPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use storage::LocalStorage;
    pub use timer::Timeout;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。Root 永远不会走到
/// Render（决策表只会让它重定向或挂起），这里的占位分支仅为
/// 让匹配保持全覆盖。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::CustomerDashboard => view! { <CustomerDashboardPage /> }.into_any(),
        AppRoute::SupplierDashboard => view! { <SupplierDashboardPage /> }.into_any(),
        AppRoute::Root => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 水合会话（微任务里读取存储，首帧保持 Unresolved）
    init_auth(&auth_ctx);

    // 3. 获取会话信号，注入路由服务（解耦！）
    let session = auth_ctx.session_signal();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <Navbar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
