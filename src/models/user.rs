use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::models::identifier::Identifier;
use crate::utils::fallback::{first_present, present_or};
use crate::utils::time::{format_locale_datetime, parse_timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Roles {
    Many(Vec<String>),
    One(String),
}

/// A platform account as the admin user list returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<Identifier>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Option<Roles>,
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

impl UserRecord {
    /// `id` if set, else `_id`.
    pub fn identifier(&self) -> Option<&Identifier> {
        self.id.as_ref().or(self.legacy_id.as_ref())
    }

    pub fn matches_id(&self, id: &str) -> bool {
        [self.id.as_ref(), self.legacy_id.as_ref()]
            .into_iter()
            .flatten()
            .any(|candidate| candidate.as_str() == id)
    }

    pub fn display_name(&self) -> &str {
        present_or([self.name.as_deref()], "no name field added in v1")
    }

    pub fn display_roles(&self) -> String {
        match &self.roles {
            Some(Roles::Many(roles)) => roles.join(", "),
            Some(Roles::One(role)) if !role.is_empty() => role.clone(),
            _ => "nill for now".to_string(),
        }
    }

    pub fn display_created_at(&self, offset: FixedOffset) -> String {
        self.created_at
            .as_deref()
            .and_then(|s| parse_timestamp(s, offset))
            .map(|dt| format_locale_datetime(dt, offset))
            .unwrap_or_else(|| "before production no input was given".to_string())
    }

    pub fn display_last_login(&self, offset: FixedOffset) -> String {
        self.last_login
            .as_deref()
            .and_then(|s| parse_timestamp(s, offset))
            .map(|dt| format_locale_datetime(dt, offset))
            .unwrap_or_else(|| "not yet login".to_string())
    }

    /// Label shown in the user navbar: name, then email, then "User".
    pub fn navbar_label(&self) -> &str {
        first_present([self.name.as_deref(), self.email.as_deref()]).unwrap_or("User")
    }
}
