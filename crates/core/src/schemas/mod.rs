//! Validation schemas for every form the clinic pages post.
//!
//! Field-level rules live on the struct as `validator` attributes; rules
//! that look at several fields live in [`FormSchema::refine`]. Messages are
//! the exact Vietnamese strings the pages display.
//!
//! [`FormSchema::refine`]: crate::forms::FormSchema::refine

pub mod applications;
pub mod auth;
pub mod invoices;
pub mod materials;
pub mod patients;
pub mod records;
pub mod schedule;
pub mod treatments;
pub mod users;

use std::sync::LazyLock;

use chrono::{Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use validator::ValidationError;

use crate::forms::{rule_error, FormErrors};
use crate::roles::{Role, STAFF_ROLES};

pub const MSG_PHONE_TEN_DIGITS: &str = "Số điện thoại bao gồm 10 chữ số";
pub const MSG_PHONE_DIGITS_ONLY: &str = "Số điện thoại chỉ bao gồm chữ số";
pub const MSG_BIRTHDAY_FUTURE: &str = "Ngày sinh không được vượt qua ngày hiện tại";
pub const MSG_EMAIL_FORMAT: &str = "Vui lòng nhập đúng định dạng của email";
pub const MSG_ROLES_EMPTY: &str = "Nhân viên phải có ít nhât 1 vai trò";
pub const MSG_ROLE_UNKNOWN: &str = "Vai trò không hợp lệ";
pub const MSG_END_BEFORE_START: &str = "Thời gian kết thúc phải sau thời gian bắt đầu";

static TEN_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"));

/// Exactly ten ASCII digits.
pub fn is_phone_number(value: &str) -> bool {
    TEN_DIGITS_RE.is_match(value)
}

/// Staff phone: ten characters, all digits. Reports both failures like the
/// staff forms always have.
pub(crate) fn staff_phone(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() != 10 {
        return Err(rule_error("phone_length", MSG_PHONE_TEN_DIGITS));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(rule_error("phone_digits", MSG_PHONE_DIGITS_ONLY));
    }
    Ok(())
}

/// Optional phone: blank is fine, anything else must be ten digits.
pub(crate) fn phone_number(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_phone_number(value) {
        Ok(())
    } else {
        Err(rule_error("phone", MSG_PHONE_TEN_DIGITS))
    }
}

pub(crate) fn not_in_future(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > Local::now().date_naive() {
        Err(rule_error("birthday", MSG_BIRTHDAY_FUTURE))
    } else {
        Ok(())
    }
}

/// Every entry names a staff role.
pub(crate) fn staff_roles(values: &[String]) -> Result<(), ValidationError> {
    let known = values.iter().all(|name| {
        name.parse::<Role>()
            .is_ok_and(|role| STAFF_ROLES.contains(&role))
    });
    if known {
        Ok(())
    } else {
        Err(rule_error("roles", MSG_ROLE_UNKNOWN))
    }
}

/// Flag `endAt` when both ends are known and it does not come after `startAt`.
pub(crate) fn end_after_start(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    errors: &mut FormErrors,
) {
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            errors.add("endAt", MSG_END_BEFORE_START);
        }
    }
}

/// Flag `field` when `value` is longer than `max` characters.
pub(crate) fn max_chars(
    errors: &mut FormErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
    message: &str,
) {
    if value.is_some_and(|v| v.chars().count() > max) {
        errors.add(field, message);
    }
}

/// Wire names of all staff roles, the default role filter.
pub fn all_staff_role_names() -> Vec<String> {
    STAFF_ROLES.iter().map(|r| r.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn phone_rules() {
        assert!(is_phone_number("0912345678"));
        assert!(!is_phone_number("091234567"));
        assert!(!is_phone_number("٠١٢٣٤٥٦٧٨٩"));
        assert!(phone_number("").is_ok());
        assert!(phone_number("09123").is_err());

        let short = staff_phone("12345").unwrap_err();
        assert_eq!(short.message.as_deref(), Some(MSG_PHONE_TEN_DIGITS));
        let letters = staff_phone("09123a5678").unwrap_err();
        assert_eq!(letters.message.as_deref(), Some(MSG_PHONE_DIGITS_ONLY));
    }

    #[test]
    fn birthday_may_be_today_but_not_tomorrow() {
        let today = Local::now().date_naive();
        assert!(not_in_future(&today).is_ok());
        assert!(not_in_future(&(today + Duration::days(1))).is_err());
    }

    #[test]
    fn only_staff_roles_are_accepted() {
        assert!(staff_roles(&["admin".into(), "Doctor".into()]).is_ok());
        assert!(staff_roles(&["patient".into()]).is_err());
        assert!(staff_roles(&["janitor".into()]).is_err());
        assert_eq!(all_staff_role_names().len(), 5);
    }
}
