use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use time::OffsetDateTime;

/// Account status code as stored in the `user_status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    /// `N` — registered, password must still be (re)set.
    #[serde(rename = "N")]
    PasswordReset,
    /// `A` — active.
    #[serde(rename = "A")]
    Active,
    /// `L` — locked after too many failed logons.
    #[serde(rename = "L")]
    Locked,
}

impl UserStatus {
    pub fn code(self) -> &'static str {
        match self {
            UserStatus::PasswordReset => "N",
            UserStatus::Active => "A",
            UserStatus::Locked => "L",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(UserStatus::PasswordReset),
            "A" => Some(UserStatus::Active),
            "L" => Some(UserStatus::Locked),
            _ => None,
        }
    }
}

/// User record in the database.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_status: UserStatus,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    #[serde(skip_serializing)]
    pub auth_hash: Option<String>, // opaque session token, not exposed in JSON
    #[serde(with = "time::serde::rfc3339::option")]
    pub auth_timestamp: Option<OffsetDateTime>,
    pub failed_logons: i32,
    pub last_ip: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub datetime_updated: OffsetDateTime,
}

// The one row-to-record mapping for users; every multi-column user query
// goes through here.
impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let code: String = row.try_get("user_status")?;
        let user_status =
            UserStatus::from_code(&code).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "user_status".into(),
                source: format!("unknown user status code: {code}").into(),
            })?;

        Ok(User {
            user_id: row.try_get("user_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            user_status,
            password_hash: row.try_get("password_hash")?,
            auth_hash: row.try_get("auth_hash")?,
            auth_timestamp: row.try_get("auth_timestamp")?,
            failed_logons: row.try_get("failed_logons")?,
            last_ip: row.try_get("last_ip")?,
            is_active: row.try_get("is_active")?,
            is_deleted: row.try_get("is_deleted")?,
            datetime_updated: row.try_get("datetime_updated")?,
        })
    }
}
