//! Route classification.
//!
//! Pure lookups over the static tables in [`crate::permissions`]. Every
//! function is total: an unknown path is not public, requires no permission
//! and is titled [`DEFAULT_TITLE`]. A missing rule is not a deny.

use crate::permissions::{
    AUTH_ROUTES, DEFAULT_TITLE, PERMISSION_INDEX, PERMISSION_RULES, PUBLIC_ROUTES,
    PermissionRule, TITLE_INDEX,
};

/// True iff `path` is on the public allow-list.
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path)
}

/// True iff `path` is a login/register page.
pub fn is_auth_route(path: &str) -> bool {
    AUTH_ROUTES.contains(&path)
}

/// Permission required by `path`: exact entry first, then the first matching rule.
pub fn get_route_permission(path: &str) -> Option<&'static str> {
    PERMISSION_INDEX
        .get(path)
        .copied()
        .or_else(|| find_permission_rule(path).map(|rule| rule.permission))
}

pub fn get_route_title(path: &str) -> &'static str {
    TITLE_INDEX.get(path).copied().unwrap_or(DEFAULT_TITLE)
}

/// The first rule of `PERMISSION_RULES` matching `path`.
pub fn find_permission_rule(path: &str) -> Option<&'static PermissionRule> {
    find_rule_in(&PERMISSION_RULES, path)
}

/// Ordered scan, first match wins. No specificity ranking is applied, so a
/// general pattern declared before a specific one shadows it.
pub fn find_rule_in<'a>(rules: &'a [PermissionRule], path: &str) -> Option<&'a PermissionRule> {
    rules.iter().find(|rule| rule.matches(path))
}

/// Permission for a menu href. Exact match only.
pub fn get_menu_permission(href: &str) -> Option<&'static str> {
    PERMISSION_INDEX.get(href).copied()
}
