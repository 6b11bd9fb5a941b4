//! Vietnamese presentation helpers for page data.

use chrono::{Datelike, NaiveDate, Weekday};

/// `1234567` → `1.234.567 ₫`. Zero and missing amounts render empty.
pub fn currency_vnd(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| *a != 0.0 && a.is_finite()) else {
        return String::new();
    };

    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}\u{a0}₫")
}

/// `dd/MM/yyyy`.
pub fn compact_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// `Thứ Năm, 16 tháng 5, 2024`.
pub fn full_date(date: Option<NaiveDate>) -> String {
    let Some(date) = date else {
        return String::new();
    };
    format!(
        "{}, {} tháng {}, {}",
        weekday_name(date.weekday()),
        date.day(),
        date.month(),
        date.year()
    )
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Thứ Hai",
        Weekday::Tue => "Thứ Ba",
        Weekday::Wed => "Thứ Tư",
        Weekday::Thu => "Thứ Năm",
        Weekday::Fri => "Thứ Sáu",
        Weekday::Sat => "Thứ Bảy",
        Weekday::Sun => "Chủ Nhật",
    }
}

/// Backend validation errors use PascalCase keys (`PhoneNumber`); forms use
/// camelCase (`phoneNumber`).
pub fn pascal_to_camel(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency_vnd(Some(1_234_567.0)), "1.234.567\u{a0}₫");
        assert_eq!(currency_vnd(Some(500.0)), "500\u{a0}₫");
        assert_eq!(currency_vnd(Some(-15_000.0)), "-15.000\u{a0}₫");
    }

    #[test]
    fn currency_is_empty_for_zero_or_missing() {
        assert_eq!(currency_vnd(Some(0.0)), "");
        assert_eq!(currency_vnd(None), "");
    }

    #[test]
    fn dates() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 16);
        assert_eq!(compact_date(d), "16/05/2024");
        assert_eq!(full_date(d), "Thứ Năm, 16 tháng 5, 2024");
        assert_eq!(compact_date(None), "");
    }

    #[test]
    fn pascal_keys_become_camel() {
        assert_eq!(pascal_to_camel("PhoneNumber"), "phoneNumber");
        assert_eq!(pascal_to_camel("email"), "email");
        assert_eq!(pascal_to_camel(""), "");
    }
}
