//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由，以及把 (会话状态 × 请求视图) 映射为
//! 唯一结果的全覆盖决策表——任何视图都必须经过它才可达。

use crate::auth::Session;
use storefront_shared::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 根路径，仅作为按角色分流的入口
    #[default]
    Root,
    /// 登录页面
    Login,
    /// 顾客商品浏览面板
    CustomerDashboard,
    /// 供应商商品管理面板
    SupplierDashboard,
    /// 页面未找到
    NotFound,
}

/// 决策表的输出：每个 (会话, 路由) 组合恰好一个结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// 会话尚未水合，渲染中性加载占位，不做任何重定向
    Pending,
    /// 渲染请求的视图
    Render,
    /// 重定向到登录页（未认证，或角色无权访问）
    RedirectToLogin,
    /// 重定向到指定路由（已认证用户访问登录页/根路径时分流）
    Redirect(AppRoute),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Root,
            "/login" => Self::Login,
            "/customer-dashboard" => Self::CustomerDashboard,
            "/supplier-dashboard" => Self::SupplierDashboard,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::CustomerDashboard => "/customer-dashboard",
            Self::SupplierDashboard => "/supplier-dashboard",
            Self::NotFound => "/404",
        }
    }

    /// 角色登录后的默认落地视图
    pub fn landing(role: Role) -> Self {
        match role {
            Role::Customer => Self::CustomerDashboard,
            Role::Supplier => Self::SupplierDashboard,
        }
    }

    /// **核心守卫逻辑：决策表本体**
    ///
    /// 对每个会话状态与请求视图的组合给出唯一结果；
    /// 不匹配角色的面板访问一律回到登录页（静默处理，无错误提示）。
    pub fn decide(&self, session: &Session) -> RouteOutcome {
        match session {
            Session::Unresolved => RouteOutcome::Pending,
            Session::Absent => match self {
                Self::Login => RouteOutcome::Render,
                _ => RouteOutcome::RedirectToLogin,
            },
            Session::Present(principal) => {
                let landing = Self::landing(principal.role());
                match self {
                    Self::Root | Self::Login => RouteOutcome::Redirect(landing),
                    Self::CustomerDashboard if principal.role() == Role::Customer => {
                        RouteOutcome::Render
                    }
                    Self::SupplierDashboard if principal.role() == Role::Supplier => {
                        RouteOutcome::Render
                    }
                    Self::NotFound => RouteOutcome::Render,
                    _ => RouteOutcome::RedirectToLogin,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
