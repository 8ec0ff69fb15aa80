//! Role-gated navigation.
//!
//! The set of reachable destinations is a pure function of the current
//! identity. Everything role-conditional (help screen, interactive menus)
//! derives from [`menu_for`] instead of re-deriving the branch locally.

use shared::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub command: &'static str,
}

const ANONYMOUS_MENU: &[MenuItem] = &[
    MenuItem {
        label: "Home",
        command: "packages",
    },
    MenuItem {
        label: "Join as Employee",
        command: "register employee",
    },
    MenuItem {
        label: "Join as HR Manager",
        command: "register hr",
    },
    MenuItem {
        label: "Login",
        command: "login",
    },
];

const HR_MENU: &[MenuItem] = &[
    MenuItem {
        label: "Asset List",
        command: "assets list",
    },
    MenuItem {
        label: "Add Asset",
        command: "assets add",
    },
    MenuItem {
        label: "All Requests",
        command: "requests list",
    },
    MenuItem {
        label: "My Team",
        command: "employees list",
    },
    MenuItem {
        label: "Dashboard",
        command: "stats",
    },
    MenuItem {
        label: "Subscription",
        command: "packages",
    },
    MenuItem {
        label: "Profile",
        command: "profile show",
    },
];

const EMPLOYEE_MENU: &[MenuItem] = &[
    MenuItem {
        label: "My Assets",
        command: "my-assets list",
    },
    MenuItem {
        label: "My Team",
        command: "team list",
    },
    MenuItem {
        label: "Request an Asset",
        command: "assets browse",
    },
    MenuItem {
        label: "My Requests",
        command: "requests mine",
    },
    MenuItem {
        label: "Profile",
        command: "profile show",
    },
];

/// Menu for the current identity. Total: an absent user (or any state that
/// is not a recognized authenticated role) maps to the anonymous menu.
pub fn menu_for(user: Option<&User>) -> &'static [MenuItem] {
    match user.map(|u| u.role) {
        Some(Role::Hr) => HR_MENU,
        Some(Role::Employee) => EMPLOYEE_MENU,
        None => ANONYMOUS_MENU,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> User {
        User {
            id: "u-1".to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            role,
            date_of_birth: None,
            profile_image: None,
            company_name: None,
            company_logo: None,
            package_name: None,
            employee_limit: None,
            current_employees: None,
        }
    }

    #[test]
    fn test_anonymous_menu() {
        let menu = menu_for(None);
        assert!(menu.iter().any(|m| m.command == "login"));
        assert!(!menu.iter().any(|m| m.command == "assets list"));
    }

    #[test]
    fn test_hr_menu() {
        let user = user_with_role(Role::Hr);
        let menu = menu_for(Some(&user));
        assert!(menu.iter().any(|m| m.command == "assets list"));
        assert!(menu.iter().any(|m| m.command == "requests list"));
        assert!(!menu.iter().any(|m| m.command == "my-assets list"));
    }

    #[test]
    fn test_employee_menu() {
        let user = user_with_role(Role::Employee);
        let menu = menu_for(Some(&user));
        assert!(menu.iter().any(|m| m.command == "my-assets list"));
        assert!(!menu.iter().any(|m| m.command == "requests list"));
    }

    #[test]
    fn test_total_over_all_inputs() {
        // every input yields a non-empty menu, never a panic
        assert!(!menu_for(None).is_empty());
        for role in [Role::Hr, Role::Employee] {
            let user = user_with_role(role);
            assert!(!menu_for(Some(&user)).is_empty());
        }
    }
}
