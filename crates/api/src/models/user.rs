//! User record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use greenbasket_core::{Email, UserId};

/// A registered user. Owns at most one cart.
///
/// The password hash stays in the `users` table and is never read back by
/// the API surface; users are provisioned via `gb-cli user create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
