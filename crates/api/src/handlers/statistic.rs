//! Handler for `/statistic`.

use axum::extract::{RawQuery, State};
use axum::Json;
use serde_json::Value;
use url::form_urlencoded;

use crate::backend::Endpoint;
use crate::error::AppResult;
use crate::middleware::rbac::{Require, StatisticPage};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /statistic
///
/// The dashboard renders whatever the backend reports, so the query is
/// passed through and the reply is returned untouched.
pub async fn show(
    State(state): State<AppState>,
    Require(user, _): Require<StatisticPage>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<Value>>> {
    let pairs: Vec<(String, String)> =
        form_urlencoded::parse(query.unwrap_or_default().as_bytes())
            .into_owned()
            .collect();

    let data = state
        .backend
        .list(&Endpoint::Statistics, &pairs)
        .bearer(&user.token)
        .fetch_json::<Value>()
        .await?;

    Ok(Json(DataResponse { data }))
}
