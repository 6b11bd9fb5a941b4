//! Handlers for `/invoices`.

use axum::extract::{RawQuery, State};
use axum::Json;
use clinic_core::forms::FormState;
use clinic_core::format::compact_date;
use clinic_core::models::{Pagination, Payment};
use clinic_core::schemas::invoices::InvoiceFilterForm;
use clinic_core::status::RecordStatus;
use serde::Serialize;

use super::{filter_form, list_query, query_bag, Paging};
use crate::backend::Endpoint;
use crate::error::AppResult;
use crate::middleware::rbac::{PaymentPage, Require};
use crate::response::DataResponse;
use crate::state::AppState;

/// A payment row with its display columns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRow {
    #[serde(flatten)]
    pub payment: Payment,
    pub status_label: Option<&'static str>,
    pub examination_day: String,
}

impl From<Payment> for InvoiceRow {
    fn from(payment: Payment) -> Self {
        Self {
            status_label: RecordStatus::try_from(payment.status)
                .ok()
                .map(RecordStatus::label),
            examination_day: compact_date(payment.examination_date.map(|at| at.date())),
            payment,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicesData {
    pub invoice_list_page: Pagination<InvoiceRow>,
    pub invoice_filter_form: FormState,
}

/// GET /invoices
pub async fn list(
    State(state): State<AppState>,
    Require(user, _): Require<PaymentPage>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<InvoicesData>>> {
    let bag = query_bag(query.as_deref());
    let (filter, invoice_filter_form) = filter_form::<InvoiceFilterForm>(&bag)?;

    let page = state
        .backend
        .list(&Endpoint::Payments, &list_query(&filter, Paging::from_bag(&bag)))
        .bearer(&user.token)
        .fetch_json::<Pagination<Payment>>()
        .await?;

    Ok(Json(DataResponse {
        data: InvoicesData {
            invoice_list_page: Pagination {
                page_number: page.page_number,
                page_size: page.page_size,
                total_records: page.total_records,
                data: page.data.into_iter().map(InvoiceRow::from).collect(),
            },
            invoice_filter_form,
        },
    }))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn rows_carry_display_columns() {
        let payment = Payment {
            record_id: 3,
            examination_date: NaiveDate::from_ymd_opt(2024, 5, 16)
                .and_then(|d| d.and_hms_opt(9, 30, 0)),
            status: 2,
            ..Payment::default()
        };
        let row = InvoiceRow::from(payment);
        assert_eq!(row.status_label, Some("Chờ thanh toán"));
        assert_eq!(row.examination_day, "16/05/2024");
    }

    #[test]
    fn unknown_status_has_no_label() {
        let row = InvoiceRow::from(Payment {
            status: 9,
            ..Payment::default()
        });
        assert_eq!(row.status_label, None);
        assert_eq!(row.examination_day, "");
    }
}
