use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default number of login-history entries kept per owner.
pub const DEFAULT_LOGIN_HISTORY_LIMIT: usize = 25;

/// A sign-in reported by the auth front end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogin {
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub os: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LoginRecord {
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    pub os: String,
}

impl LoginRecord {
    pub fn stamped(login: NewLogin, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            ip_address: login.ip_address,
            user_agent: login.user_agent,
            os: login.os,
        }
    }
}
