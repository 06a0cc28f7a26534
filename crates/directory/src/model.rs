//! Directory records and their validated projections
//!
//! The directory hands back users and groups with a loosely typed `profile`
//! object. Before the role manager reads a field it goes through
//! [`DirectoryUser::try_from`] / [`DirectoryGroup::try_from`], which fail with a
//! [`MalformedRecordError`] instead of silently defaulting.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{EntityKind, MalformedRecordError};
use std::fmt;

/// A user as returned by the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub profile: Value,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, login: impl Into<String>, status: UserStatus) -> Self {
        Self {
            id: id.into(),
            status: Some(status.as_str().to_string()),
            profile: serde_json::json!({ "login": login.into() }),
        }
    }
}

/// A group as returned by the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub profile: Value,
}

impl GroupRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            profile: serde_json::json!({ "name": name.into() }),
        }
    }
}

/// Okta user lifecycle status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Staged,
    Provisioned,
    Recovery,
    PasswordExpired,
    LockedOut,
    Suspended,
    Deprovisioned,
    Other(String),
}

impl UserStatus {
    pub fn as_str(&self) -> &str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Staged => "STAGED",
            UserStatus::Provisioned => "PROVISIONED",
            UserStatus::Recovery => "RECOVERY",
            UserStatus::PasswordExpired => "PASSWORD_EXPIRED",
            UserStatus::LockedOut => "LOCKED_OUT",
            UserStatus::Suspended => "SUSPENDED",
            UserStatus::Deprovisioned => "DEPROVISIONED",
            UserStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_active(&self) -> bool {
        *self == UserStatus::Active
    }
}

impl From<&str> for UserStatus {
    fn from(s: &str) -> Self {
        match s {
            "ACTIVE" => UserStatus::Active,
            "STAGED" => UserStatus::Staged,
            "PROVISIONED" => UserStatus::Provisioned,
            "RECOVERY" => UserStatus::Recovery,
            "PASSWORD_EXPIRED" => UserStatus::PasswordExpired,
            "LOCKED_OUT" => UserStatus::LockedOut,
            "SUSPENDED" => UserStatus::Suspended,
            "DEPROVISIONED" => UserStatus::Deprovisioned,
            other => UserStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated view of a [`UserRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    pub id: String,
    pub login: String,
    pub status: UserStatus,
}

impl TryFrom<&UserRecord> for DirectoryUser {
    type Error = MalformedRecordError;

    fn try_from(record: &UserRecord) -> Result<Self, Self::Error> {
        let malformed = |field: &'static str| MalformedRecordError {
            kind: EntityKind::User,
            id: record.id.clone(),
            field,
        };

        if record.id.is_empty() {
            return Err(malformed("id"));
        }
        let login = profile_str(&record.profile, "login").ok_or_else(|| malformed("login"))?;
        let status = record.status.as_deref().ok_or_else(|| malformed("status"))?;

        Ok(Self {
            id: record.id.clone(),
            login: login.to_string(),
            status: UserStatus::from(status),
        })
    }
}

/// Validated view of a [`GroupRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGroup {
    pub id: String,
    pub name: String,
}

impl TryFrom<&GroupRecord> for DirectoryGroup {
    type Error = MalformedRecordError;

    fn try_from(record: &GroupRecord) -> Result<Self, Self::Error> {
        let malformed = |field: &'static str| MalformedRecordError {
            kind: EntityKind::Group,
            id: record.id.clone(),
            field,
        };

        if record.id.is_empty() {
            return Err(malformed("id"));
        }
        let name = profile_str(&record.profile, "name").ok_or_else(|| malformed("name"))?;

        Ok(Self {
            id: record.id.clone(),
            name: name.to_string(),
        })
    }
}

fn profile_str<'a>(profile: &'a Value, key: &str) -> Option<&'a str> {
    profile.get(key).and_then(Value::as_str)
}
