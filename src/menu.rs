use serde::Serialize;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::classifier::get_menu_permission;

/// MenuItem
///
/// A static entry of the side navigation. `icon` is the UI's icon name.
#[derive(Debug)]
pub struct MenuItem {
    pub title: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    pub children: &'static [MenuItem],
}

impl MenuItem {
    const fn leaf(title: &'static str, href: &'static str, icon: &'static str) -> Self {
        Self {
            title,
            href,
            icon,
            children: &[],
        }
    }

    /// Permission gating this item, resolved by exact href.
    pub fn permission(&self) -> Option<&'static str> {
        get_menu_permission(self.href)
    }
}

/// Side navigation, in display order. The dashboard is always first.
pub static MENU_ITEMS: &[MenuItem] = &[
    MenuItem::leaf("仪表盘", "/", "LayoutDashboard"),
    MenuItem::leaf("数据分析", "/analytics", "BarChart3"),
    MenuItem::leaf("用户管理", "/users", "Users"),
    MenuItem::leaf("文档管理", "/documents", "FileText"),
    MenuItem::leaf("日历", "/calendar", "Calendar"),
    MenuItem::leaf("消息中心", "/messages", "MessageSquare"),
    MenuItem {
        title: "系统管理",
        href: "/system",
        icon: "Settings2",
        children: &[
            MenuItem::leaf("角色管理", "/roles", "Shield"),
            MenuItem::leaf("权限管理", "/permissions", "KeyRound"),
            MenuItem::leaf("操作日志", "/logs", "ScrollText"),
            MenuItem::leaf("系统设置", "/settings", "Settings"),
        ],
    },
    MenuItem::leaf("个人中心", "/profile", "UserCircle"),
];

/// MenuNode
///
/// Serializable view of a `MenuItem` with its resolved permission.
#[derive(Debug, Clone, Serialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct MenuNode {
    pub title: String,
    pub href: String,
    pub icon: String,
    pub permission: Option<String>,
    #[schema(no_recursion)]
    pub children: Vec<MenuNode>,
}

/// The full tree, no filtering.
pub fn menu_tree() -> Vec<MenuNode> {
    MENU_ITEMS.iter().map(|item| to_node(item, None)).collect()
}

/// The tree pruned to what a holder of `granted` may see.
///
/// Items without a permission are always visible. A group survives when its
/// own permission is granted, or when it has none and some child survives.
pub fn visible_menu(granted: &[&str]) -> Vec<MenuNode> {
    MENU_ITEMS
        .iter()
        .filter_map(|item| visible_node(item, granted))
        .collect()
}

fn visible_node(item: &MenuItem, granted: &[&str]) -> Option<MenuNode> {
    let permission = item.permission();
    if let Some(required) = permission {
        if !granted.contains(&required) {
            return None;
        }
    }

    let children: Vec<MenuNode> = item
        .children
        .iter()
        .filter_map(|child| visible_node(child, granted))
        .collect();

    if !item.children.is_empty() && children.is_empty() && permission.is_none() {
        return None;
    }

    Some(to_node(item, Some(children)))
}

fn to_node(item: &MenuItem, children: Option<Vec<MenuNode>>) -> MenuNode {
    MenuNode {
        title: item.title.to_string(),
        href: item.href.to_string(),
        icon: item.icon.to_string(),
        permission: item.permission().map(str::to_string),
        children: children
            .unwrap_or_else(|| item.children.iter().map(|c| to_node(c, None)).collect()),
    }
}
