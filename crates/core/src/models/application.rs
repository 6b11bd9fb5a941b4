use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::forms::de;
use crate::types::DbId;

/// A staff leave application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: DbId,
    pub user_name: String,
    #[serde(deserialize_with = "de::datetime")]
    pub start_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::datetime")]
    pub end_at: Option<NaiveDateTime>,
    pub reason: String,
    pub is_confirm: Option<bool>,
}
