//! Form validation plumbing shared by every schema.
//!
//! A schema is a plain struct that derives [`Validate`] for its per-field
//! rules and implements [`FormSchema::refine`] for rules spanning several
//! fields. [`validate`] runs both and returns either the coerced value or the
//! complete set of field errors, never a partial result.
//!
//! [`FormState`] is the envelope handed back to the browser: the submitted
//! (or default) data, per-field messages, and an optional form-level message.

pub mod de;

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Shown when the submitted body is not an object at all.
pub const MSG_MALFORMED: &str = "Dữ liệu gửi lên không hợp lệ";

/// Field name → messages, ordered for stable output.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub fields: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormErrors {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            fields: FieldErrors::new(),
            message: Some(message.into()),
        }
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.message.is_none()
    }

    /// Flatten `validator` output. Nested structs become `parent.child`, list
    /// items `list[0].child`.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut out = Self::default();
        collect(&mut out, None, errors);
        out
    }
}

fn collect(out: &mut FormErrors, prefix: Option<&str>, errors: &ValidationErrors) {
    for (field, kind) in errors.errors() {
        let field = snake_to_camel(field);
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field,
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.add(path.clone(), message_of(error));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(out, Some(&path), inner),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(out, Some(&format!("{path}[{index}]")), inner);
                }
            }
        }
    }
}

/// `validator` reports Rust field names; forms speak camelCase.
fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

/// Build a [`ValidationError`] carrying a user-facing message.
pub fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// A declarative form definition.
pub trait FormSchema: DeserializeOwned + Serialize + Validate + Default {
    /// Stable identifier the browser uses to match a form state to its form.
    const ID: &'static str;

    /// Rules spanning several fields. Runs after the per-field rules.
    fn refine(&self, _errors: &mut FormErrors) {}
}

/// Decode and validate a raw value bag against schema `S`.
pub fn validate<S: FormSchema>(raw: &Value) -> Result<S, FormErrors> {
    // serde would otherwise fill a struct from an array by position.
    if !raw.is_object() {
        tracing::debug!(form = S::ID, "Form body is not an object");
        return Err(FormErrors::with_message(MSG_MALFORMED));
    }
    let parsed = S::deserialize(raw).map_err(|e| {
        tracing::debug!(form = S::ID, error = %e, "Form body could not be decoded");
        FormErrors::with_message(MSG_MALFORMED)
    })?;

    let mut errors = match parsed.validate() {
        Ok(()) => FormErrors::default(),
        Err(e) => FormErrors::from_validation(&e),
    };
    parsed.refine(&mut errors);

    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(errors)
    }
}

/// Flatten a filter into query pairs for a backend list call.
///
/// Nulls and blank strings are dropped; arrays repeat their key.
pub fn query_pairs<S: Serialize>(filter: &S) -> Vec<(String, String)> {
    let Ok(Value::Object(fields)) = serde_json::to_value(filter) else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for (key, value) in fields {
        let items = match value {
            Value::Array(items) => items,
            scalar => vec![scalar],
        };
        for item in items {
            let text = match item {
                Value::Null => continue,
                Value::String(s) if s.is_empty() => continue,
                Value::String(s) => s,
                other => other.to_string(),
            };
            pairs.push((key.clone(), text));
        }
    }
    pairs
}

/// Form state returned to the browser with every page or action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub id: &'static str,
    pub valid: bool,
    pub posted: bool,
    pub data: Value,
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A value that passed its schema, with the state to echo back.
#[derive(Debug)]
pub struct Submitted<S> {
    pub value: S,
    pub form: FormState,
}

impl FormState {
    /// Defaults for a page load: nothing posted, no errors.
    pub fn empty<S: FormSchema>() -> Self {
        Self {
            id: S::ID,
            valid: false,
            posted: false,
            data: serde_json::to_value(S::default()).unwrap_or_default(),
            errors: FieldErrors::new(),
            message: None,
        }
    }

    /// Validate a posted value bag.
    ///
    /// On success the echoed data is the coerced value; on failure it is the
    /// raw submission so the browser can redisplay what the user typed.
    pub fn submit<S: FormSchema>(raw: Value) -> Result<Submitted<S>, FormState> {
        match validate::<S>(&raw) {
            Ok(value) => {
                let data = serde_json::to_value(&value).unwrap_or(raw);
                Ok(Submitted {
                    value,
                    form: Self {
                        id: S::ID,
                        valid: true,
                        posted: true,
                        data,
                        errors: FieldErrors::new(),
                        message: None,
                    },
                })
            }
            Err(errors) => Err(Self {
                id: S::ID,
                valid: false,
                posted: true,
                data: raw,
                errors: errors.fields,
                message: errors.message,
            }),
        }
    }

    /// Whether the form has a field with this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.data.as_object().is_some_and(|o| o.contains_key(name))
    }

    pub fn set_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Blank out fields that must never be echoed back (passwords).
    pub fn redact(&mut self, fields: &[&str]) {
        if let Some(data) = self.data.as_object_mut() {
            for field in fields {
                if let Some(value) = data.get_mut(*field) {
                    *value = Value::String(String::new());
                }
            }
        }
    }
}
