//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 守卫逻辑全部委托给 `route::AppRoute::decide` 决策表，
//! 本模块只负责把决策结果落到 History 与路由信号上。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, RouteOutcome};
use crate::auth::Session;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入的会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前请求的路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    session: Signal<Session>,
}

impl RouterService {
    /// 创建新的路由服务，当前路由从 URL 解析
    fn new(session: Signal<Session>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 获取注入的会话信号
    pub fn session(&self) -> Signal<Session> {
        self.session
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let session = self.session.get_untracked();

        let resolved = match target_route.decide(&session) {
            // 会话未定之前记录请求，不重定向；水合完成后由
            // setup_session_redirect 重新裁决。
            RouteOutcome::Pending | RouteOutcome::Render => target_route,
            RouteOutcome::RedirectToLogin => {
                web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
                AppRoute::Login
            }
            RouteOutcome::Redirect(landing) => landing,
        };

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());

            // popstate 时也执行守卫逻辑
            match target_route.decide(&session.get_untracked()) {
                RouteOutcome::RedirectToLogin => {
                    replace_history_state(AppRoute::Login.to_path());
                    set_route.set(AppRoute::Login);
                }
                RouteOutcome::Redirect(landing) => {
                    replace_history_state(landing.to_path());
                    set_route.set(landing);
                }
                RouteOutcome::Pending | RouteOutcome::Render => {
                    set_route.set(target_route);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话状态变化时的自动重定向
    ///
    /// 登录、注销、以及水合从 Unresolved 落定，都会让当前路由
    /// 重新过一遍决策表。
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let session = session.get();
            let route = current_route.get_untracked();

            match route.decide(&session) {
                RouteOutcome::RedirectToLogin => {
                    web_sys::console::log_1(
                        &"[Router] Session change: redirecting to login.".into(),
                    );
                    push_history_state(AppRoute::Login.to_path());
                    set_route.set(AppRoute::Login);
                }
                RouteOutcome::Redirect(landing) => {
                    web_sys::console::log_1(
                        &"[Router] Session change: redirecting to landing view.".into(),
                    );
                    push_history_state(landing.to_path());
                    set_route.set(landing);
                }
                // Pending: 水合尚未完成，继续显示占位
                // Render: 当前路由对新会话仍然合法
                RouteOutcome::Pending | RouteOutcome::Render => {}
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<Session>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 只有当决策表给出 Render 时才渲染匹配的视图；Pending 与
/// 等待重定向落地的瞬间都渲染中性加载占位，保证没有视图能绕过
/// 决策表出现在屏幕上。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        match current.decide(&router.session().get()) {
            RouteOutcome::Render => matcher(current),
            _ => view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
        }
    }
}
