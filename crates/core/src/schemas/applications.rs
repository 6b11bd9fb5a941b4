//! Leave application forms.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::end_after_start;
use crate::forms::{de, FormErrors, FormSchema};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateApplicationForm {
    #[serde(deserialize_with = "de::datetime")]
    #[validate(required(message = "Vui lòng chọn ngày bắt đầu"))]
    pub start_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::datetime")]
    #[validate(required(message = "Vui lòng chọn ngày kết thúc"))]
    pub end_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Vui lòng nhập lý do"),
        length(min = 1, message = "Vui lòng nhập lý do")
    )]
    pub reason: Option<String>,
}

impl FormSchema for CreateApplicationForm {
    const ID: &'static str = "create-application";

    fn refine(&self, errors: &mut FormErrors) {
        end_after_start(self.start_at, self.end_at, errors);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationFilterForm {
    #[serde(deserialize_with = "de::text")]
    pub user_name: Option<String>,
    #[serde(deserialize_with = "de::datetime")]
    pub start_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::datetime")]
    pub end_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::boolean")]
    pub is_confirm: Option<bool>,
}

impl FormSchema for ApplicationFilterForm {
    const ID: &'static str = "application-filter";
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::forms::validate;

    #[test]
    fn dates_and_reason_are_required() {
        let errors = validate::<CreateApplicationForm>(&json!({ "reason": "" })).unwrap_err();
        assert_eq!(errors.field("startAt"), Some(&["Vui lòng chọn ngày bắt đầu".to_string()][..]));
        assert_eq!(errors.field("endAt"), Some(&["Vui lòng chọn ngày kết thúc".to_string()][..]));
        assert_eq!(errors.field("reason"), Some(&["Vui lòng nhập lý do".to_string()][..]));
    }

    #[test]
    fn accepts_a_leave_request() {
        let form = validate::<CreateApplicationForm>(&json!({
            "startAt": "2024-06-03T08:00",
            "endAt": "2024-06-05T17:00",
            "reason": "Nghỉ phép",
        }))
        .unwrap();
        assert_eq!(form.reason.as_deref(), Some("Nghỉ phép"));
    }

    #[test]
    fn filter_is_entirely_optional() {
        let form = validate::<ApplicationFilterForm>(&json!({ "userName": " ", "isConfirm": "true" }))
            .unwrap();
        assert_eq!(form.user_name, None);
        assert_eq!(form.is_confirm, Some(true));
    }
}
