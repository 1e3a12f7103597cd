//! Side menu.

/// A link in the side menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Target path.
    pub route_link: &'static str,
    /// Label.
    pub text: &'static str,
}

/// A titled group of links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    /// Group label.
    pub text: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Links in display order.
    pub items: Vec<MenuItem>,
}

/// Collapsible side menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideMenu {
    groups: Vec<MenuGroup>,
    collapsed: bool,
}

impl SideMenu {
    /// The application menu, expanded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: vec![
                MenuGroup {
                    text: "Dashboard",
                    icon: "dashboard",
                    items: vec![MenuItem {
                        route_link: "/welcome",
                        text: "Welcome",
                    }],
                },
                MenuGroup {
                    text: "User Management",
                    icon: "user",
                    items: vec![MenuItem {
                        route_link: "/user-list",
                        text: "List of User",
                    }],
                },
            ],
            collapsed: false,
        }
    }

    /// Groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[MenuGroup] {
        &self.groups
    }

    /// Every link, flattened.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.groups.iter().flat_map(|group| group.items.iter())
    }

    /// Link with the given label.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<&MenuItem> {
        self.items().find(|item| item.text.eq_ignore_ascii_case(text))
    }

    /// Whether only icons are shown.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Collapse or expand.
    pub const fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }
}

impl Default for SideMenu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{Route, route_for};

    #[test]
    fn test_menu_layout() {
        let menu = SideMenu::new();
        let labels: Vec<&str> = menu.groups().iter().map(|g| g.text).collect();
        assert_eq!(labels, vec!["Dashboard", "User Management"]);

        let links: Vec<(&str, &str)> = menu.items().map(|i| (i.text, i.route_link)).collect();
        assert_eq!(
            links,
            vec![("Welcome", "/welcome"), ("List of User", "/user-list")]
        );
    }

    #[test]
    fn test_every_link_resolves() {
        let menu = SideMenu::new();
        for item in menu.items() {
            assert!(!matches!(route_for(item.route_link), Route::NotFound(_)));
        }
    }

    #[test]
    fn test_find_and_collapse() {
        let mut menu = SideMenu::default();
        assert_eq!(menu.find("list of user").map(|i| i.route_link), Some("/user-list"));
        assert!(menu.find("Reports").is_none());

        menu.toggle_collapsed();
        assert!(menu.is_collapsed());
    }
}
