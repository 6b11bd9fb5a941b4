//! Patient create and edit forms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::{de, FormErrors, FormSchema};

pub const MSG_EMAIL_OR_PHONE: &str = "Vui lòng nhập email hoặc số điện thoại";

/// A patient needs some way to be reached.
fn require_contact(email: Option<&str>, phone: Option<&str>, errors: &mut FormErrors) {
    let blank = |v: Option<&str>| v.is_none_or(str::is_empty);
    if blank(email) && blank(phone) {
        errors.add("email", MSG_EMAIL_OR_PHONE);
        errors.add("phone", MSG_EMAIL_OR_PHONE);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePatientForm {
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Tên bệnh nhân không được để trống"),
        length(min = 1, message = "Tên bệnh nhân không được để trống")
    )]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    #[validate(email(message = "Vui lòng nhập đúng định dạng của email"))]
    pub email: Option<String>,
    #[serde(deserialize_with = "de::text")]
    #[validate(custom(function = "super::phone_number"))]
    pub phone: Option<String>,
    #[serde(deserialize_with = "de::date")]
    #[validate(custom(function = "super::not_in_future"))]
    pub birthday: Option<NaiveDate>,
}

impl FormSchema for CreatePatientForm {
    const ID: &'static str = "create-patient";

    fn refine(&self, errors: &mut FormErrors) {
        require_contact(self.email.as_deref(), self.phone.as_deref(), errors);
    }
}

/// Every field is optional; only what is sent is changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EditPatientForm {
    #[serde(deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    #[validate(email(message = "Vui lòng nhập đúng định dạng của email"))]
    pub email: Option<String>,
    #[serde(deserialize_with = "de::text")]
    #[validate(custom(function = "super::phone_number"))]
    pub phone: Option<String>,
    #[serde(deserialize_with = "de::date")]
    #[validate(custom(function = "super::not_in_future"))]
    pub birthday: Option<NaiveDate>,
}

impl FormSchema for EditPatientForm {
    const ID: &'static str = "edit-patient";

    fn refine(&self, errors: &mut FormErrors) {
        require_contact(self.email.as_deref(), self.phone.as_deref(), errors);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::forms::validate;
    use crate::schemas::MSG_PHONE_TEN_DIGITS;

    #[test]
    fn phone_alone_is_enough() {
        let form = validate::<CreatePatientForm>(&json!({
            "name": "Lê Văn C",
            "email": "",
            "phone": "0912345678",
        }))
        .unwrap();
        assert_eq!(form.email, None);
    }

    #[test]
    fn missing_contact_is_reported_on_both_fields() {
        let errors = validate::<EditPatientForm>(&json!({ "name": "C", "email": " " })).unwrap_err();
        assert_eq!(errors.field("email"), Some(&[MSG_EMAIL_OR_PHONE.to_string()][..]));
        assert_eq!(errors.field("phone"), Some(&[MSG_EMAIL_OR_PHONE.to_string()][..]));
    }

    #[test]
    fn malformed_contact_details() {
        let errors = validate::<CreatePatientForm>(&json!({
            "name": "C",
            "email": "c@",
            "phone": "12345",
        }))
        .unwrap_err();
        assert_eq!(
            errors.field("email"),
            Some(&["Vui lòng nhập đúng định dạng của email".to_string()][..])
        );
        assert_eq!(errors.field("phone"), Some(&[MSG_PHONE_TEN_DIGITS.to_string()][..]));
    }

    #[test]
    fn create_requires_a_name() {
        let errors = validate::<CreatePatientForm>(&json!({ "email": "c@phongkham.vn" })).unwrap_err();
        assert!(errors.field("name").is_some());
        assert!(errors.field("email").is_none());
    }

    #[test]
    fn arabic_indic_digits_are_not_a_phone_number() {
        let errors = validate::<CreatePatientForm>(&json!({
            "name": "A",
            "phone": "٠١٢٣٤٥٦٧٨٩",
        }))
        .unwrap_err();
        assert_eq!(errors.field("phone"), Some(&[MSG_PHONE_TEN_DIGITS.to_string()][..]));
    }
}
