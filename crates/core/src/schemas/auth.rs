//! Sign-in and password forms.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail};

use crate::forms::{de, FormErrors, FormSchema};

pub const MSG_PATIENT_LOGIN_EMAIL: &str =
    "Đăng nhập với vai trò bệnh nhân chỉ được phép dùng email";
pub const MSG_PASSWORD_MISMATCH: &str = "Mật khẩu được nhập lại không khớp";
pub const MSG_PASSWORD_UNCHANGED: &str = "Mật khẩu mới phải khác mật khẩu cũ";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginForm {
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Vui lòng điền email hoặc số điện thoại"),
        length(min = 1, message = "Vui lòng điền email hoặc số điện thoại")
    )]
    pub email_or_phone: Option<String>,
    #[serde(deserialize_with = "de::string")]
    #[validate(
        required(message = "Mật khẩu cần tối thiểu 8 kí tự"),
        length(min = 8, message = "Mật khẩu cần tối thiểu 8 kí tự")
    )]
    pub password: Option<String>,
    #[serde(deserialize_with = "de::flag")]
    pub remember_me: bool,
    /// Staff sign-in when set, patient sign-in otherwise.
    #[serde(deserialize_with = "de::flag")]
    pub is_user: bool,
}

impl FormSchema for LoginForm {
    const ID: &'static str = "login";
}

impl LoginForm {
    /// Patients sign in with their email only.
    pub fn check_patient_login(&self) -> Result<(), &'static str> {
        let login = self.email_or_phone.as_deref().unwrap_or_default();
        if self.is_user || login.validate_email() {
            Ok(())
        } else {
            Err(MSG_PATIENT_LOGIN_EMAIL)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordForm {
    #[serde(deserialize_with = "de::string")]
    #[validate(
        required(message = "Mật khẩu cũ không được để chống"),
        length(min = 1, message = "Mật khẩu cũ không được để chống")
    )]
    pub old_password: Option<String>,
    #[serde(deserialize_with = "de::string")]
    #[validate(
        required(message = "Mật khẩu cần tối thiểu 8 kí tự"),
        length(min = 8, message = "Mật khẩu cần tối thiểu 8 kí tự")
    )]
    pub new_password: Option<String>,
    #[serde(deserialize_with = "de::string")]
    #[validate(
        required(message = "Vui lòng nhập lại mật khẩu"),
        length(min = 1, message = "Vui lòng nhập lại mật khẩu")
    )]
    pub confirm_password: Option<String>,
}

impl FormSchema for ChangePasswordForm {
    const ID: &'static str = "change-password";

    fn refine(&self, errors: &mut FormErrors) {
        if self.new_password != self.confirm_password {
            errors.add("confirmPassword", MSG_PASSWORD_MISMATCH);
        }
        if self.new_password.is_some() && self.new_password == self.old_password {
            errors.add("newPassword", MSG_PASSWORD_UNCHANGED);
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::forms::validate;

    #[test]
    fn login_defaults_and_trimming() {
        let form = validate::<LoginForm>(&json!({
            "emailOrPhone": "  0912345678 ",
            "password": "12345678",
            "isUser": "on",
        }))
        .unwrap();
        assert_eq!(form.email_or_phone.as_deref(), Some("0912345678"));
        assert!(form.is_user);
        assert!(!form.remember_me);
        assert_matches!(form.check_patient_login(), Ok(()));
    }

    #[test]
    fn short_password_is_rejected() {
        let errors = validate::<LoginForm>(&json!({ "emailOrPhone": "a@b.vn", "password": "123" }))
            .unwrap_err();
        assert_eq!(
            errors.field("password"),
            Some(&["Mật khẩu cần tối thiểu 8 kí tự".to_string()][..])
        );
    }

    #[test]
    fn patient_login_requires_email() {
        let mut form = LoginForm {
            email_or_phone: Some("0912345678".into()),
            password: Some("12345678".into()),
            ..LoginForm::default()
        };
        assert_matches!(form.check_patient_login(), Err(MSG_PATIENT_LOGIN_EMAIL));

        form.email_or_phone = Some("benhnhan@phongkham.vn".into());
        assert_matches!(form.check_patient_login(), Ok(()));
    }

    #[test]
    fn change_password_accepts_a_new_confirmed_password() {
        let form = validate::<ChangePasswordForm>(&json!({
            "oldPassword": "matkhaucu",
            "newPassword": "matkhaumoi",
            "confirmPassword": "matkhaumoi",
        }));
        assert!(form.is_ok());
    }

    #[test]
    fn change_password_rejects_mismatched_confirmation() {
        let errors = validate::<ChangePasswordForm>(&json!({
            "oldPassword": "matkhaucu",
            "newPassword": "matkhaumoi",
            "confirmPassword": "matkhaukhac",
        }))
        .unwrap_err();
        assert_eq!(
            errors.field("confirmPassword"),
            Some(&[MSG_PASSWORD_MISMATCH.to_string()][..])
        );
    }

    #[test]
    fn change_password_rejects_reusing_the_old_password() {
        let errors = validate::<ChangePasswordForm>(&json!({
            "oldPassword": "matkhaucu",
            "newPassword": "matkhaucu",
            "confirmPassword": "matkhaucu",
        }))
        .unwrap_err();
        assert_eq!(
            errors.field("newPassword"),
            Some(&[MSG_PASSWORD_UNCHANGED.to_string()][..])
        );
        assert!(errors.field("confirmPassword").is_none());
    }

    #[test]
    fn change_password_enforces_minimum_length() {
        let errors = validate::<ChangePasswordForm>(&json!({
            "oldPassword": "cu",
            "newPassword": "ngan",
            "confirmPassword": "ngan",
        }))
        .unwrap_err();
        assert!(errors.field("newPassword").is_some());
    }
}
