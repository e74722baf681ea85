//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的会话信号来执行决策表；本模块负责
//! 水合、登录、注销这三种唯一允许的状态变更。

use crate::api::{ApiError, StorefrontApi};
use crate::web::LocalStorage;
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_shared::{DEFAULT_API_BASE, PersistedSession, Principal, Role};

/// token 槽位；与 principal 槽位同写同清
const STORAGE_TOKEN_KEY: &str = "storefront_token";
/// 序列化的 `PersistedSession` 槽位
const STORAGE_USER_KEY: &str = "storefront_user";

// =========================================================
// 会话状态
// =========================================================

/// 会话的三态模型
///
/// `Unresolved` 与 `Absent` 是两个不同的事实：前者是"还没读
/// 存储"，后者是"读过了，没有用户"。二者合并成一个 Option
/// 正是原始实现的隐患，这里显式分开。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    /// 进程启动后、存储读取完成前
    #[default]
    Unresolved,
    /// 已确认无登录用户
    Absent,
    /// 恰好一个已认证用户
    Present(Principal),
}

impl Session {
    /// 当前角色判别值；未认证（或未定）为 None
    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Present(principal) => Some(principal.role()),
            _ => None,
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Session::Present(principal) => Some(principal),
            _ => None,
        }
    }
}

/// 认证状态
///
/// 会话与已授权的 API 客户端一起存放：`api` 在且仅在
/// `session` 为 Present 时存在，token 就固化在客户端里。
#[derive(Clone, Default)]
pub struct AuthState {
    pub session: Session,
    pub api: Option<StorefrontApi>,
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }
}

// --- 两种合法的整值替换，供 login/logout 与测试共用 ---

fn apply_login(state: &mut AuthState, principal: Principal, api: StorefrontApi) {
    state.session = Session::Present(principal);
    state.api = Some(api);
}

fn apply_logout(state: &mut AuthState) {
    state.session = Session::Absent;
    state.api = None;
}

// =========================================================
// 认证上下文
// =========================================================

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 获取会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        let state = self.state;
        Signal::derive(move || state.get().session)
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

// =========================================================
// 水合 / 登录 / 注销
// =========================================================

/// 解码存储槽位的内容
///
/// 损坏的 JSON、未知的角色判别值、过期的签发时间，一律视为
/// "无记录"。纯函数，便于在原生测试里覆盖。
fn decode_persisted(raw: &str) -> Option<PersistedSession> {
    let record: PersistedSession = serde_json::from_str(raw).ok()?;
    if record.is_expired() {
        return None;
    }
    Some(record)
}

/// 初始化认证状态
///
/// 以微任务的形式读取存储，保证首帧渲染观察到 Unresolved。
/// 只在启动时调用一次；完成后会话落定为 Present 或 Absent，
/// 不再回到 Unresolved。
pub fn init_auth(ctx: &AuthContext) {
    let set_state = ctx.set_state;

    spawn_local(async move {
        let token = LocalStorage::get(STORAGE_TOKEN_KEY);
        let raw_record = LocalStorage::get(STORAGE_USER_KEY);

        let restored = match (token, raw_record) {
            (Some(token), Some(raw)) => decode_persisted(&raw).map(|record| (record, token)),
            _ => None,
        };

        match restored {
            Some((record, token)) => {
                web_sys::console::log_1(&"[Auth] Session restored from storage.".into());
                let api = StorefrontApi::new(DEFAULT_API_BASE).with_token(token);
                set_state.update(|state| apply_login(state, record.principal, api));
            }
            None => {
                // 坏记录或半个会话：清掉槽位，落定为 Absent
                LocalStorage::delete(STORAGE_TOKEN_KEY);
                LocalStorage::delete(STORAGE_USER_KEY);
                set_state.update(|state| apply_logout(state));
            }
        }
    });
}

/// 登录并持久化
///
/// 成功后两个槽位一起写入，会话同步更新——路由服务的会话
/// 监听会在下一次渲染前看到新角色并完成落地重定向。
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<(), ApiError> {
    let api = StorefrontApi::new(DEFAULT_API_BASE);
    let response = api.login(email, password).await?;

    let record = PersistedSession::issue(response.principal.clone());
    LocalStorage::set(STORAGE_TOKEN_KEY, &response.token);
    LocalStorage::set_json(STORAGE_USER_KEY, &record);

    let api = api.with_token(response.token);
    ctx.set_state
        .update(|state| apply_login(state, response.principal, api));
    Ok(())
}

/// 注销并清除状态
///
/// 任何状态下调用都安全（幂等）。导航由路由服务的会话监听
/// 自动处理，这里不需要手动跳转。
pub fn logout(ctx: &AuthContext) {
    LocalStorage::delete(STORAGE_TOKEN_KEY);
    LocalStorage::delete(STORAGE_USER_KEY);
    ctx.set_state.update(|state| apply_logout(state));
}

#[cfg(test)]
mod tests;
