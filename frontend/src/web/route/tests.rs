use super::*;
use storefront_shared::Principal;

const ALL_ROUTES: [AppRoute; 5] = [
    AppRoute::Root,
    AppRoute::Login,
    AppRoute::CustomerDashboard,
    AppRoute::SupplierDashboard,
    AppRoute::NotFound,
];

fn principal(role: Role) -> Principal {
    Principal {
        person_id: 1,
        name: "Ada".to_string(),
        tp_person: role,
        personsupplier_id: match role {
            Role::Supplier => Some(7),
            Role::Customer => None,
        },
    }
}

fn sessions() -> [Session; 4] {
    [
        Session::Unresolved,
        Session::Absent,
        Session::Present(principal(Role::Customer)),
        Session::Present(principal(Role::Supplier)),
    ]
}

// =========================================================
// 决策表
// =========================================================

#[test]
fn unresolved_session_always_pends_and_never_redirects() {
    for route in ALL_ROUTES {
        assert_eq!(route.decide(&Session::Unresolved), RouteOutcome::Pending);
    }
}

#[test]
fn absent_session_renders_login_only() {
    assert_eq!(AppRoute::Login.decide(&Session::Absent), RouteOutcome::Render);
    for route in [
        AppRoute::Root,
        AppRoute::CustomerDashboard,
        AppRoute::SupplierDashboard,
        AppRoute::NotFound,
    ] {
        assert_eq!(route.decide(&Session::Absent), RouteOutcome::RedirectToLogin);
    }
}

#[test]
fn authenticated_login_and_root_requests_land_on_the_role_dashboard() {
    let customer = Session::Present(principal(Role::Customer));
    let supplier = Session::Present(principal(Role::Supplier));

    for route in [AppRoute::Root, AppRoute::Login] {
        assert_eq!(
            route.decide(&customer),
            RouteOutcome::Redirect(AppRoute::CustomerDashboard)
        );
        assert_eq!(
            route.decide(&supplier),
            RouteOutcome::Redirect(AppRoute::SupplierDashboard)
        );
    }
}

#[test]
fn matching_role_renders_its_own_dashboard() {
    let customer = Session::Present(principal(Role::Customer));
    let supplier = Session::Present(principal(Role::Supplier));

    assert_eq!(AppRoute::CustomerDashboard.decide(&customer), RouteOutcome::Render);
    assert_eq!(AppRoute::SupplierDashboard.decide(&supplier), RouteOutcome::Render);
}

#[test]
fn mismatched_role_is_silently_sent_to_login() {
    // 顾客登录后请求供应商面板 → 回登录页
    let customer = Session::Present(principal(Role::Customer));
    assert_eq!(
        AppRoute::SupplierDashboard.decide(&customer),
        RouteOutcome::RedirectToLogin
    );

    let supplier = Session::Present(principal(Role::Supplier));
    assert_eq!(
        AppRoute::CustomerDashboard.decide(&supplier),
        RouteOutcome::RedirectToLogin
    );
}

#[test]
fn table_is_total_and_deterministic() {
    for session in sessions() {
        for route in ALL_ROUTES {
            // 任何组合都有结果（不 panic），且两次求值一致
            assert_eq!(route.decide(&session), route.decide(&session));
        }
    }
}

// =========================================================
// 路径映射
// =========================================================

#[test]
fn known_paths_round_trip() {
    for route in [
        AppRoute::Root,
        AppRoute::Login,
        AppRoute::CustomerDashboard,
        AppRoute::SupplierDashboard,
    ] {
        assert_eq!(AppRoute::from_path(route.to_path()), route);
    }
}

#[test]
fn unknown_paths_map_to_not_found() {
    assert_eq!(AppRoute::from_path("/cart"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
}
