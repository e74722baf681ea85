use super::*;
use chrono::{Duration, Utc};
use storefront_shared::SESSION_MAX_AGE_DAYS;

fn customer() -> Principal {
    Principal {
        person_id: 1,
        name: "Ada".to_string(),
        tp_person: Role::Customer,
        personsupplier_id: None,
    }
}

fn supplier() -> Principal {
    Principal {
        person_id: 2,
        name: "Grace".to_string(),
        tp_person: Role::Supplier,
        personsupplier_id: Some(7),
    }
}

// =========================================================
// 会话状态机
// =========================================================

#[test]
fn session_starts_unresolved_with_no_role() {
    let state = AuthState::default();
    assert_eq!(state.session, Session::Unresolved);
    assert_eq!(state.role(), None);
}

#[test]
fn role_reflects_login_immediately() {
    let mut state = AuthState::default();

    apply_login(&mut state, customer(), StorefrontApi::new("http://x"));
    assert_eq!(state.role(), Some(Role::Customer));
    assert!(state.api.is_some());

    apply_login(&mut state, supplier(), StorefrontApi::new("http://x"));
    assert_eq!(state.role(), Some(Role::Supplier));
}

#[test]
fn logout_yields_none_from_any_prior_state() {
    // 已登录
    let mut state = AuthState::default();
    apply_login(&mut state, supplier(), StorefrontApi::new("http://x"));
    apply_logout(&mut state);
    assert_eq!(state.session, Session::Absent);
    assert_eq!(state.role(), None);
    assert!(state.api.is_none());

    // 未定状态下注销同样安全，且幂等
    let mut fresh = AuthState::default();
    apply_logout(&mut fresh);
    apply_logout(&mut fresh);
    assert_eq!(fresh.session, Session::Absent);
    assert_eq!(fresh.role(), None);
}

// =========================================================
// 存储记录解码
// =========================================================

#[test]
fn valid_record_restores_the_principal() {
    let record = PersistedSession::issue(supplier());
    let raw = serde_json::to_string(&record).unwrap();

    let decoded = decode_persisted(&raw).expect("fresh record should decode");
    assert_eq!(decoded.principal, supplier());
}

#[test]
fn corrupted_record_is_treated_as_absent() {
    assert!(decode_persisted("").is_none());
    assert!(decode_persisted("not json at all").is_none());
    assert!(decode_persisted(r#"{"principal": 12}"#).is_none());
}

#[test]
fn unknown_role_discriminant_is_treated_as_absent() {
    let raw = format!(
        r#"{{"principal":{{"person_id":1,"name":"Ada","tp_person":9}},"issued_at":"{}"}}"#,
        Utc::now().to_rfc3339()
    );
    assert!(decode_persisted(&raw).is_none());
}

#[test]
fn expired_record_is_treated_as_absent() {
    let record = PersistedSession {
        principal: customer(),
        issued_at: Utc::now() - Duration::days(SESSION_MAX_AGE_DAYS + 1),
    };
    let raw = serde_json::to_string(&record).unwrap();
    assert!(decode_persisted(&raw).is_none());
}
