//! Handlers for `/profile`.

use axum::extract::State;
use axum::Json;
use clinic_core::forms::{FormState, Submitted};
use clinic_core::models::Profile;
use clinic_core::schemas::auth::ChangePasswordForm;
use clinic_core::schemas::users::EditProfileForm;
use serde::Serialize;
use serde_json::Value;

use super::{parse_form, run_action};
use crate::backend::Endpoint;
use crate::error::AppResult;
use crate::middleware::rbac::{Require, SignedIn};
use crate::response::{DataResponse, FormResponse};
use crate::state::AppState;

const PASSWORD_FIELDS: [&str; 3] = ["oldPassword", "newPassword", "confirmPassword"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub profile: Profile,
    pub edit_profile_form: FormState,
    pub change_password_form: FormState,
}

/// GET /profile
pub async fn show(
    State(state): State<AppState>,
    Require(user, _): Require<SignedIn>,
) -> AppResult<Json<DataResponse<ProfileData>>> {
    let profile = state
        .backend
        .get(&Endpoint::Profile)
        .bearer(&user.token)
        .fetch_json::<Profile>()
        .await?;

    Ok(Json(DataResponse {
        data: ProfileData {
            profile,
            edit_profile_form: FormState::empty::<EditProfileForm>(),
            change_password_form: FormState::empty::<ChangePasswordForm>(),
        },
    }))
}

/// POST /profile/edit
pub async fn edit(
    State(state): State<AppState>,
    Require(user, _): Require<SignedIn>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let Submitted { value, form } = parse_form::<EditProfileForm>(raw)?;
    let request = state
        .backend
        .put(&Endpoint::EditProfile)
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}

/// POST /profile/change-password
///
/// Password fields are blanked in every form state sent back.
pub async fn change_password(
    State(state): State<AppState>,
    Require(user, _): Require<SignedIn>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let Submitted { value, form } =
        parse_form::<ChangePasswordForm>(raw).map_err(|e| e.redact(&PASSWORD_FIELDS))?;
    let request = state
        .backend
        .put(&Endpoint::ChangePassword)
        .bearer(&user.token)
        .json(&value);

    let Json(mut response) = run_action(request, form)
        .await
        .map_err(|e| e.redact(&PASSWORD_FIELDS))?;
    response.form.redact(&PASSWORD_FIELDS);
    Ok(Json(response))
}
