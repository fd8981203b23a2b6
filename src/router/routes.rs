//! Static route registry

use crate::view::ViewId;

/// Fallback for unregistered paths
pub const DEFAULT_ROUTE: &str = "/dashboard";

pub const LOGIN_ROUTE: &str = "/login";

/// Behaviour run after a route's view is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountHook {
    /// Re-fetch the account and fill the dashboard
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub title: &'static str,
    pub view: ViewId,
    pub on_mount: Option<MountHook>,
}

pub static ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        path: DEFAULT_ROUTE,
        title: "My Account",
        view: ViewId::Dashboard,
        on_mount: Some(MountHook::Refresh),
    },
    RouteDescriptor {
        path: LOGIN_ROUTE,
        title: "Login",
        view: ViewId::Login,
        on_mount: None,
    },
];

/// Exact-match lookup
pub fn lookup(path: &str) -> Option<&'static RouteDescriptor> {
    ROUTES.iter().find(|route| route.path == path)
}
