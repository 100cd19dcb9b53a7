use serde::{Deserialize, Serialize};

use crate::models::user::UserRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavRole {
    Admin,
    #[default]
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navbar {
    pub title: &'static str,
    pub user_label: Option<String>,
    pub items: Vec<NavItem>,
    pub logout_redirect: &'static str,
}

pub struct NavigationService;

impl NavigationService {
    pub fn navbar(role: NavRole, user: Option<&UserRecord>, show_submissions: bool) -> Navbar {
        let user_label = user.map(|u| u.navbar_label().to_string());
        match role {
            NavRole::Admin => Navbar {
                title: "Admin Dashboard",
                user_label,
                items: vec![
                    NavItem { label: "Questions", path: "/admin/questions" },
                    NavItem { label: "Add Question", path: "/admin/add-question" },
                    NavItem { label: "Users", path: "/admin/users" },
                ],
                logout_redirect: "/",
            },
            NavRole::User => {
                let mut items = vec![NavItem { label: "Code Compiler", path: "/compiler" }];
                if show_submissions {
                    items.push(NavItem { label: "Submission", path: "/submissions" });
                }
                Navbar {
                    title: "User Dashboard",
                    user_label,
                    items,
                    logout_redirect: "/",
                }
            }
        }
    }
}
