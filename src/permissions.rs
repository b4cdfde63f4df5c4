use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

/// Title shown for any path without an entry in `ROUTE_TITLES`.
pub const DEFAULT_TITLE: &str = "Admin Pro";

/// Exact path -> required permission.
///
/// Declaration order is significant: `PERMISSION_RULES` is derived from this
/// list in the same order and scanned first-match-wins.
pub const ROUTE_PERMISSIONS: &[(&str, &str)] = &[
    ("/", "dashboard:view"),
    ("/analytics", "analytics:view"),
    ("/users", "users:view"),
    ("/roles", "roles:view"),
    ("/permissions", "permissions:view"),
    ("/documents", "documents:view"),
    ("/calendar", "calendar:view"),
    ("/messages", "messages:view"),
    ("/notifications", "notifications:view"),
    ("/logs", "logs:view"),
    ("/settings", "settings:view"),
    ("/profile", "profile:view"),
];

/// Exact path -> display title. No pattern matching.
pub const ROUTE_TITLES: &[(&str, &str)] = &[
    ("/", "仪表盘"),
    ("/analytics", "数据分析"),
    ("/users", "用户管理"),
    ("/roles", "角色管理"),
    ("/permissions", "权限管理"),
    ("/documents", "文档管理"),
    ("/calendar", "日历"),
    ("/messages", "消息中心"),
    ("/notifications", "通知中心"),
    ("/logs", "操作日志"),
    ("/settings", "系统设置"),
    ("/profile", "个人中心"),
    ("/login", "登录"),
    ("/register", "注册"),
    ("/forgot-password", "忘记密码"),
    ("/terms", "服务条款"),
    ("/privacy", "隐私政策"),
];

/// Paths reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &[
    "/login",
    "/register",
    "/forgot-password",
    "/reset-password",
    "/terms",
    "/privacy",
];

/// Login-class pages. A signed-in visitor is sent home instead.
pub const AUTH_ROUTES: &[&str] = &["/login", "/register"];

/// PermissionRule
///
/// One entry of the ordered rule table: a path pattern, the permission it
/// requires and the label used for breadcrumbs and titles.
#[derive(Debug, Clone)]
pub struct PermissionRule {
    pub pattern: Regex,
    pub permission: &'static str,
    pub label: &'static str,
}

impl PermissionRule {
    pub fn new(
        pattern: &str,
        permission: &'static str,
        label: &'static str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            permission,
            label,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Pattern for a route and everything nested below it.
/// `/` is special-cased so the dashboard rule does not swallow every path.
fn route_pattern(path: &str) -> String {
    if path == "/" {
        "^/$".to_string()
    } else {
        format!("^{}(/.*)?$", regex::escape(path))
    }
}

pub(crate) static PERMISSION_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ROUTE_PERMISSIONS.iter().copied().collect());

pub(crate) static TITLE_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ROUTE_TITLES.iter().copied().collect());

/// The ordered rule table, built once from `ROUTE_PERMISSIONS` and `ROUTE_TITLES`.
pub static PERMISSION_RULES: LazyLock<Vec<PermissionRule>> = LazyLock::new(|| {
    ROUTE_PERMISSIONS
        .iter()
        .map(|&(path, permission)| {
            let label = TITLE_INDEX.get(path).copied().unwrap_or(path);
            PermissionRule::new(&route_pattern(path), permission, label)
                .expect("escaped route pattern is a valid regex")
        })
        .collect()
});
