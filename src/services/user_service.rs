use serde::{Deserialize, Serialize};

use crate::models::user::UserRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusFilter {
    #[default]
    All,
    LoggedIn,
    NotLoggedIn,
}

impl StatusFilter {
    fn matches(self, user: &UserRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::LoggedIn => user.logged_in,
            StatusFilter::NotLoggedIn => !user.logged_in,
        }
    }
}

pub struct UserService;

impl UserService {
    /// Applies the status filter, then a case-insensitive substring search
    /// over name and email. A blank search term matches everyone.
    pub fn filter_users(users: &[UserRecord], status: StatusFilter, search: &str) -> Vec<UserRecord> {
        let term = search.trim().to_lowercase();
        users
            .iter()
            .filter(|u| status.matches(u))
            .filter(|u| {
                term.is_empty()
                    || [u.name.as_deref(), u.email.as_deref()]
                        .into_iter()
                        .flatten()
                        .any(|field| field.to_lowercase().contains(&term))
            })
            .cloned()
            .collect()
    }

    /// Marks every user whose `id` or `_id` equals `user_id` as logged out.
    /// Returns how many records changed.
    pub fn mark_logged_out(users: &mut [UserRecord], user_id: &str) -> usize {
        let mut changed = 0;
        for user in users.iter_mut().filter(|u| u.matches_id(user_id)) {
            user.logged_in = false;
            changed += 1;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::identifier::Identifier;

    fn user(id: &str, name: Option<&str>, email: &str, logged_in: bool) -> UserRecord {
        UserRecord {
            id: Some(Identifier::new(id)),
            name: name.map(str::to_string),
            email: Some(email.to_string()),
            logged_in,
            ..UserRecord::default()
        }
    }

    fn sample() -> Vec<UserRecord> {
        vec![
            user("1", Some("Alice Smith"), "alice@example.com", true),
            user("2", None, "bob@example.com", false),
            user("3", Some("Carol"), "carol@corp.io", true),
        ]
    }

    #[test]
    fn status_filter() {
        let users = sample();
        assert_eq!(UserService::filter_users(&users, StatusFilter::All, "").len(), 3);
        assert_eq!(UserService::filter_users(&users, StatusFilter::LoggedIn, "").len(), 2);
        assert_eq!(UserService::filter_users(&users, StatusFilter::NotLoggedIn, "").len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_email() {
        let users = sample();
        let hits = UserService::filter_users(&users, StatusFilter::All, "  SMITH ");
        assert_eq!(hits.len(), 1);
        let hits = UserService::filter_users(&users, StatusFilter::All, "example.com");
        assert_eq!(hits.len(), 2);
        let hits = UserService::filter_users(&users, StatusFilter::LoggedIn, "example.com");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn mark_logged_out_matches_either_id() {
        let mut users = sample();
        users[2].id = None;
        users[2].legacy_id = Some(Identifier::new("legacy-3"));

        assert_eq!(UserService::mark_logged_out(&mut users, "legacy-3"), 1);
        assert!(!users[2].logged_in);
        assert!(users[0].logged_in);
        assert_eq!(UserService::mark_logged_out(&mut users, "missing"), 0);
    }

    #[test]
    fn status_filter_wire_names() {
        let f: StatusFilter = serde_json::from_str("\"notLoggedIn\"").unwrap();
        assert_eq!(f, StatusFilter::NotLoggedIn);
    }
}
