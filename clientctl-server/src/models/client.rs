//! Client record and request payload validation
//!
//! Create mode: name, email and phone are mandatory.
//! Update mode: every field is optional, but anything supplied must still be
//! well formed.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ValidationError, ValidationErrors};

/// Column width of `clients.name`
pub const MAX_NAME_LEN: usize = 255;

/// Column width of `clients.email`
pub const MAX_EMAIL_LEN: usize = 255;

/// Column width of `clients.phone`
pub const MAX_PHONE_LEN: usize = 20;

/// `local@domain.tld`, no whitespace and no extra `@` in any part
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Persisted client record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw request body for create and update.
///
/// Fields stay untyped JSON so a value of the wrong type is reported next to
/// every other rule instead of failing the whole body. `null` and a missing
/// key both deserialize to `None`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPayload {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub phone: Option<Value>,
}

/// Validated input for an insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ClientChanges {
    /// True when the request named no recognised field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

impl ClientPayload {
    /// Validate for creation, collecting every violation.
    ///
    /// # Example
    /// ```
    /// use clientctl_server::models::ClientPayload;
    /// use serde_json::json;
    ///
    /// let payload = ClientPayload {
    ///     name: None,
    ///     email: Some(json!("not-an-email")),
    ///     phone: Some(json!(11999999999u64)),
    /// };
    /// let errors = payload.into_new_client().unwrap_err();
    /// assert_eq!(errors.len(), 3);
    /// ```
    pub fn into_new_client(self) -> Result<NewClient, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required("Name", self.name, &mut errors, |v, errors| {
            within_limit("Name", v, MAX_NAME_LEN, errors)
        });
        let email = required("Email", self.email, &mut errors, check_email);
        let phone = required("Phone", self.phone, &mut errors, |v, errors| {
            within_limit("Phone", v, MAX_PHONE_LEN, errors)
        });

        match (name, email, phone) {
            (Some(name), Some(email), Some(phone)) if errors.is_empty() => {
                Ok(NewClient { name, email, phone })
            }
            _ => Err(errors),
        }
    }

    /// Validate for a partial update, collecting every violation.
    ///
    /// An empty result is not an error here; callers decide what "nothing to
    /// update" means.
    pub fn into_changes(self) -> Result<ClientChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = optional("Name", self.name, &mut errors, |v, errors| {
            within_limit("Name", v, MAX_NAME_LEN, errors)
        });
        let email = optional("Email", self.email, &mut errors, check_email);
        let phone = optional("Phone", self.phone, &mut errors, |v, errors| {
            within_limit("Phone", v, MAX_PHONE_LEN, errors)
        });

        if errors.is_empty() {
            Ok(ClientChanges { name, email, phone })
        } else {
            Err(errors)
        }
    }
}

/// A payload field after the type check
enum Raw {
    Absent,
    Text(String),
    WrongType,
}

fn raw(field: &'static str, value: Option<Value>, errors: &mut ValidationErrors) -> Raw {
    match value {
        None => Raw::Absent,
        Some(Value::String(text)) => Raw::Text(text),
        Some(_) => {
            errors.push(ValidationError::InvalidFormat {
                field,
                reason: "must be a string",
            });
            Raw::WrongType
        }
    }
}

/// Mandatory field: absent and `""` are both "required".
fn required<F>(
    field: &'static str,
    value: Option<Value>,
    errors: &mut ValidationErrors,
    check: F,
) -> Option<String>
where
    F: FnOnce(String, &mut ValidationErrors) -> Option<String>,
{
    match raw(field, value, errors) {
        Raw::WrongType => None,
        Raw::Text(v) if !v.is_empty() => check(v, errors),
        Raw::Absent | Raw::Text(_) => {
            errors.push(ValidationError::Required { field });
            None
        }
    }
}

/// Optional field: absent is fine, an explicit `""` is not.
fn optional<F>(
    field: &'static str,
    value: Option<Value>,
    errors: &mut ValidationErrors,
    check: F,
) -> Option<String>
where
    F: FnOnce(String, &mut ValidationErrors) -> Option<String>,
{
    match raw(field, value, errors) {
        Raw::Absent | Raw::WrongType => None,
        Raw::Text(v) if v.is_empty() => {
            errors.push(ValidationError::Empty { field });
            None
        }
        Raw::Text(v) => check(v, errors),
    }
}

fn check_email(email: String, errors: &mut ValidationErrors) -> Option<String> {
    if !is_valid_email(&email) {
        errors.push(ValidationError::InvalidFormat {
            field: "Email",
            reason: "must be a valid address",
        });
        return None;
    }
    within_limit("Email", email, MAX_EMAIL_LEN, errors)
}

fn within_limit(
    field: &'static str,
    value: String,
    max: usize,
    errors: &mut ValidationErrors,
) -> Option<String> {
    if value.chars().count() > max {
        errors.push(ValidationError::TooLong { field, max });
        None
    } else {
        Some(value)
    }
}

/// Whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(name: Option<&str>, email: Option<&str>, phone: Option<&str>) -> ClientPayload {
        ClientPayload {
            name: name.map(Value::from),
            email: email.map(Value::from),
            phone: phone.map(Value::from),
        }
    }

    fn messages(errors: &[ValidationError]) -> Vec<String> {
        errors.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn valid_emails() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("ana.souza+tag@mail.example.co"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana @example.com"));
        assert!(!is_valid_email("ana@@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@example."));
    }

    #[test]
    fn create_accepts_complete_payload() {
        let client = payload(Some("Ana"), Some("ana@example.com"), Some("(11) 99999-9999"))
            .into_new_client()
            .expect("valid payload");
        assert_eq!(client.name, "Ana");
        assert_eq!(client.email, "ana@example.com");
        assert_eq!(client.phone, "(11) 99999-9999");
    }

    #[test]
    fn create_reports_every_missing_field() {
        let errors = payload(None, None, None).into_new_client().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec!["Name is required", "Email is required", "Phone is required"]
        );
    }

    #[test]
    fn create_treats_empty_string_as_missing() {
        let errors = payload(Some(""), Some("ana@example.com"), Some(""))
            .into_new_client()
            .unwrap_err();
        assert_eq!(messages(&errors), vec!["Name is required", "Phone is required"]);
    }

    #[test]
    fn malformed_email_replaces_required_check() {
        let errors = payload(None, Some("not-an-email"), Some("123"))
            .into_new_client()
            .unwrap_err();
        assert_eq!(
            messages(&errors),
            vec!["Name is required", "Email must be a valid address"]
        );
    }

    #[test]
    fn create_rejects_oversized_phone() {
        let long_phone = "9".repeat(MAX_PHONE_LEN + 1);
        let errors = payload(Some("Ana"), Some("ana@example.com"), Some(&long_phone))
            .into_new_client()
            .unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::TooLong {
                field: "Phone",
                max: MAX_PHONE_LEN,
            }]
        );
    }

    #[test]
    fn length_is_counted_in_characters() {
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(payload(Some(&name), Some("ana@example.com"), Some("1"))
            .into_new_client()
            .is_ok());
    }

    #[test]
    fn update_allows_missing_fields() {
        let changes = payload(None, None, None).into_changes().expect("no errors");
        assert!(changes.is_empty());
    }

    #[test]
    fn update_keeps_only_supplied_fields() {
        let changes = payload(Some("Bia"), None, None)
            .into_changes()
            .expect("valid update");
        assert_eq!(changes.name.as_deref(), Some("Bia"));
        assert!(changes.email.is_none());
        assert!(changes.phone.is_none());
        assert!(!changes.is_empty());
    }

    #[test]
    fn update_checks_email_format() {
        let errors = payload(None, Some("not-an-email"), None)
            .into_changes()
            .unwrap_err();
        assert_eq!(messages(&errors), vec!["Email must be a valid address"]);
    }

    #[test]
    fn update_rejects_explicit_empty_values() {
        let errors = payload(Some(""), Some(""), Some("")).into_changes().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![
                "Name cannot be empty",
                "Email cannot be empty",
                "Phone cannot be empty"
            ]
        );
    }

    #[test]
    fn payload_ignores_unknown_keys_and_nulls() {
        let payload: ClientPayload =
            serde_json::from_str(r#"{"name": null, "phone": "123", "nickname": "x"}"#)
                .expect("deserialize");
        assert!(payload.name.is_none());
        assert_eq!(payload.phone, Some(json!("123")));
    }

    #[test]
    fn create_reports_every_wrongly_typed_field() {
        let payload = ClientPayload {
            name: Some(json!(1)),
            email: Some(json!(2)),
            phone: Some(json!("x")),
        };
        let errors = payload.into_new_client().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec!["Name must be a string", "Email must be a string"]
        );
    }

    #[test]
    fn update_reports_wrong_type_with_other_violations() {
        let payload = ClientPayload {
            name: Some(json!("")),
            email: Some(json!(["ana@example.com"])),
            phone: Some(json!(true)),
        };
        let errors = payload.into_changes().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![
                "Name cannot be empty",
                "Email must be a string",
                "Phone must be a string"
            ]
        );
    }
}
