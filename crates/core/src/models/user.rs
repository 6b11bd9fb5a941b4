use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::forms::de;
use crate::types::DbId;

/// Staff member as listed on the users page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "de::date")]
    pub birthday: Option<NaiveDate>,
    pub salary: f64,
    pub status: i64,
    pub roles: Vec<String>,
}

/// The signed-in user's own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "de::date")]
    pub birthday: Option<NaiveDate>,
    pub salary: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserMinimal {
    pub id: DbId,
    pub name: String,
}

/// Body of a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub token: String,
    #[serde(default, deserialize_with = "de::datetime")]
    pub expire_at: Option<NaiveDateTime>,
}
