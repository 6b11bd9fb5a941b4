//! Handler for the application shell shared by every page.

use axum::extract::State;
use axum::Json;
use chrono::Local;
use clinic_core::features::{visible_features, FeatureDetail};
use clinic_core::forms::FormState;
use clinic_core::identity::Identity;
use clinic_core::models::QueueItem;
use clinic_core::queue::{self, QueueReminder};
use clinic_core::roles::Role;
use clinic_core::schemas::auth::LoginForm;
use serde::Serialize;

use crate::backend::Endpoint;
use crate::middleware::auth::MaybeUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutData {
    pub user: Option<Identity>,
    pub features: Vec<FeatureDetail>,
    pub login_form: FormState,
    pub queue_reminders: Vec<QueueReminder>,
}

/// GET /
///
/// Public. Signed-in doctors also get reminders for examinations that are
/// about to end; a queue the backend cannot serve just yields none.
pub async fn shell(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Json<DataResponse<LayoutData>> {
    let queue_reminders = match &user {
        Some(doctor) if doctor.has_role(Role::Doctor) => doctor_reminders(&state, doctor).await,
        _ => Vec::new(),
    };

    Json(DataResponse {
        data: LayoutData {
            features: visible_features(user.as_ref()),
            user,
            login_form: FormState::empty::<LoginForm>(),
            queue_reminders,
        },
    })
}

async fn doctor_reminders(state: &AppState, doctor: &Identity) -> Vec<QueueReminder> {
    let items = state
        .backend
        .get(&Endpoint::Queue)
        .bearer(&doctor.token)
        .fetch_body::<Vec<QueueItem>>()
        .await;

    match items {
        Ok(items) => queue::reminders(&items, Local::now().naive_local()),
        Err(e) => {
            tracing::warn!(error = %e, "Queue unavailable, skipping reminders");
            Vec::new()
        }
    }
}
