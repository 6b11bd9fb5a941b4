//! Staff management and profile forms.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::all_staff_role_names;
use crate::forms::{de, FormSchema};

/// Upper bound of the default salary filter.
pub const DEFAULT_MAX_SALARY: f64 = 100_000_000.0;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserForm {
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Tên nhân viên không dược để trống"),
        length(min = 1, message = "Tên nhân viên không dược để trống")
    )]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Email không dược để trống"),
        email(message = "Vui lòng nhập đúng định dạng của email")
    )]
    pub email: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Tên đăng nhập không được để trống"),
        length(min = 1, message = "Tên đăng nhập không được để trống")
    )]
    pub user_name: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Số điện thoại bao gồm 10 chữ số"),
        custom(function = "super::staff_phone")
    )]
    pub phone: Option<String>,
    #[serde(deserialize_with = "de::date")]
    #[validate(
        required(message = "Ngày sinh không được để trống"),
        custom(function = "super::not_in_future")
    )]
    pub birthday: Option<NaiveDate>,
    #[serde(deserialize_with = "de::number")]
    #[validate(
        required(message = "Lương không thể là giá trị âm"),
        range(min = 0.0, message = "Lương không thể là giá trị âm")
    )]
    pub salary: Option<f64>,
    #[serde(deserialize_with = "de::string_list")]
    #[validate(
        length(min = 1, message = "Nhân viên phải có ít nhât 1 vai trò"),
        custom(function = "super::staff_roles")
    )]
    pub roles: Vec<String>,
}

impl Default for CreateUserForm {
    fn default() -> Self {
        Self {
            name: None,
            email: None,
            user_name: None,
            phone: None,
            birthday: None,
            salary: Some(0.0),
            roles: Vec::new(),
        }
    }
}

impl FormSchema for CreateUserForm {
    const ID: &'static str = "create-user";
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EditUserForm {
    #[serde(deserialize_with = "de::integer")]
    #[validate(required(message = "Không tìm thấy nhân viên"))]
    pub id: Option<i64>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Số điện thoại bao gồm 10 chữ số"),
        custom(function = "super::staff_phone")
    )]
    pub phone: Option<String>,
    #[serde(deserialize_with = "de::number")]
    #[validate(
        required(message = "Lương không thể là giá trị âm"),
        range(min = 0.0, message = "Lương không thể là giá trị âm")
    )]
    pub salary: Option<f64>,
    #[serde(deserialize_with = "de::boolean")]
    pub status: Option<bool>,
    #[serde(deserialize_with = "de::integer")]
    pub assistant_id: Option<i64>,
    #[serde(deserialize_with = "de::string_list")]
    #[validate(
        length(min = 1, message = "Nhân viên phải có ít nhât 1 vai trò"),
        custom(function = "super::staff_roles")
    )]
    pub roles: Vec<String>,
}

impl Default for EditUserForm {
    fn default() -> Self {
        Self {
            id: None,
            phone: None,
            salary: Some(0.0),
            status: Some(true),
            assistant_id: None,
            roles: Vec::new(),
        }
    }
}

impl FormSchema for EditUserForm {
    const ID: &'static str = "edit-user";
}

fn digits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(de::string(deserializer)?.map(|s| s.chars().filter(char::is_ascii_digit).collect()))
}

/// Staff list filter. Phone keeps only its digits.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UserFilterForm {
    #[serde(deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "digits")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "de::number")]
    #[validate(range(min = 0.0, message = "Lương không thể là giá trị âm"))]
    pub from_salary: Option<f64>,
    #[serde(deserialize_with = "de::number")]
    #[validate(range(min = 0.0, message = "Lương không thể là giá trị âm"))]
    pub to_salary: Option<f64>,
    #[serde(deserialize_with = "de::string_list")]
    #[validate(custom(function = "super::staff_roles"))]
    pub roles: Vec<String>,
}

impl Default for UserFilterForm {
    fn default() -> Self {
        Self {
            name: None,
            email: None,
            phone: None,
            from_salary: Some(0.0),
            to_salary: Some(DEFAULT_MAX_SALARY),
            roles: all_staff_role_names(),
        }
    }
}

impl FormSchema for UserFilterForm {
    const ID: &'static str = "user-filter";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EditProfileForm {
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Tên người dùng không được để trống"),
        length(min = 1, message = "Tên người dùng không được để trống")
    )]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Số điện thoại bao gồm 10 chữ số"),
        custom(function = "super::staff_phone")
    )]
    pub phone: Option<String>,
    #[serde(deserialize_with = "de::date")]
    #[validate(
        required(message = "Ngày sinh không được để trống"),
        custom(function = "super::not_in_future")
    )]
    pub birthday: Option<NaiveDate>,
}

impl FormSchema for EditProfileForm {
    const ID: &'static str = "edit-profile";
}
