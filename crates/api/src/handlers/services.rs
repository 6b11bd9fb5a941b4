//! Handlers for `/services` (treatments offered by the clinic).

use axum::extract::{RawQuery, State};
use axum::Json;
use clinic_core::format::currency_vnd;
use clinic_core::forms::{FormState, Submitted};
use clinic_core::models::{Pagination, Treatment};
use clinic_core::schemas::treatments::{CreateTreatmentForm, TreatmentFilterForm};
use serde::Serialize;
use serde_json::Value;

use super::{filter_form, list_query, parse_form, query_bag, run_action, Paging};
use crate::backend::Endpoint;
use crate::error::AppResult;
use crate::middleware::rbac::{Require, ServicesPage};
use crate::response::{DataResponse, FormResponse};
use crate::state::AppState;

/// A treatment with its price formatted for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRow {
    #[serde(flatten)]
    pub treatment: Treatment,
    pub price_label: String,
}

impl From<Treatment> for TreatmentRow {
    fn from(treatment: Treatment) -> Self {
        Self {
            price_label: currency_vnd(Some(treatment.price)),
            treatment,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesData {
    pub treatment_list_page: Pagination<TreatmentRow>,
    pub treatment_filter_form: FormState,
    pub create_treatment_form: FormState,
}

/// GET /services
pub async fn list(
    State(state): State<AppState>,
    Require(user, _): Require<ServicesPage>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<ServicesData>>> {
    let bag = query_bag(query.as_deref());
    let (filter, treatment_filter_form) = filter_form::<TreatmentFilterForm>(&bag)?;

    let page = state
        .backend
        .list(&Endpoint::Treatments, &list_query(&filter, Paging::from_bag(&bag)))
        .bearer(&user.token)
        .fetch_json::<Pagination<Treatment>>()
        .await?;
    let treatment_list_page = Pagination {
        page_number: page.page_number,
        page_size: page.page_size,
        total_records: page.total_records,
        data: page.data.into_iter().map(TreatmentRow::from).collect(),
    };

    Ok(Json(DataResponse {
        data: ServicesData {
            treatment_list_page,
            treatment_filter_form,
            create_treatment_form: FormState::empty::<CreateTreatmentForm>(),
        },
    }))
}

/// POST /services/create
pub async fn create(
    State(state): State<AppState>,
    Require(user, _): Require<ServicesPage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let Submitted { value, form } = parse_form::<CreateTreatmentForm>(raw)?;
    let request = state
        .backend
        .post(&Endpoint::Treatments)
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_carry_a_formatted_price() {
        let row = TreatmentRow::from(Treatment {
            id: 1,
            name: "Cạo vôi răng".into(),
            price: 350_000.0,
            ..Treatment::default()
        });
        assert_eq!(row.price_label, "350.000\u{a0}₫");

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["name"], "Cạo vôi răng");
        assert_eq!(json["priceLabel"], "350.000\u{a0}₫");
    }
}
