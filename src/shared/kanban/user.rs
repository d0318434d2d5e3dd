//! User Data Structure
//!
//! The credential record and the projection that is safe to return to
//! clients. `User` deliberately does not implement `Serialize`: the only way
//! to put a user on the wire is through [`User::into_public`], which drops the
//! password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a user inside the organization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Team manager
    Manager,
    /// Regular user
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::User => "USER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "MANAGER" => Some(Role::Manager),
            "USER" => Some(Role::User),
            _ => None,
        }
    }
}

/// A user as stored in the credential table
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique user ID
    pub id: String,
    /// Email address (unique)
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    pub role: Role,
    pub sector: Option<String>,
    pub branch: Option<String>,
    pub phone: Option<String>,
    /// Username in the external BPM system
    pub bpm_username: Option<String>,
    /// Whether the user may open tickets on behalf of someone else
    pub can_open_tickets_for_others: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Drop the password hash.
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role,
            sector: self.sector,
            branch: self.branch,
            phone: self.phone,
            bpm_username: self.bpm_username,
            can_open_tickets_for_others: self.can_open_tickets_for_others,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User information that is safe to return to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub sector: Option<String>,
    pub branch: Option<String>,
    pub phone: Option<String>,
    pub bpm_username: Option<String>,
    pub can_open_tickets_for_others: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: "u-1".to_string(),
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuu".to_string(),
            role: Role::Manager,
            sector: Some("TI".to_string()),
            branch: None,
            phone: None,
            bpm_username: Some("ana.bpm".to_string()),
            can_open_tickets_for_others: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_public_user_has_no_password_hash() {
        let json = serde_json::to_value(sample_user().into_public()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "MANAGER");
        assert_eq!(json["bpmUsername"], "ana.bpm");
        assert_eq!(json["canOpenTicketsForOthers"], true);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("manager"), Some(Role::Manager));
        assert_eq!(Role::parse("owner"), None);
        assert_eq!(Role::parse(Role::User.as_str()), Some(Role::User));
    }
}
