//! 通知吐司组件
//!
//! 两个面板共用的瞬时提示。新通知会顶掉旧通知的倒计时：
//! `Timeout` 在 drop 时取消，所以只需覆盖持有的句柄。

use crate::web::Timeout;
use leptos::prelude::*;

/// 消息内容, 是否出错
pub type Notification = (String, bool);

/// 自动消失的延迟（毫秒）
const DISMISS_AFTER_MS: u32 = 3_000;

pub fn success(message: impl Into<String>) -> Option<Notification> {
    Some((message.into(), false))
}

pub fn error(message: impl Into<String>) -> Option<Notification> {
    Some((message.into(), true))
}

#[component]
pub fn ToastHost(notification: RwSignal<Option<Notification>>) -> impl IntoView {
    // Timeout 不是 Send，放 local 槽位
    let pending = StoredValue::new_local(None::<Timeout>);

    Effect::new(move |_| {
        if notification.get().is_some() {
            let timer = Timeout::new(DISMISS_AFTER_MS, move || notification.set(None));
            pending.set_value(Some(timer));
        } else {
            pending.set_value(None);
        }
    });

    view! {
        <Show when=move || notification.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let (_, is_err) = notification.get().unwrap();
                    if is_err {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notification.get().unwrap().0}</span>
                </div>
            </div>
        </Show>
    }
}
