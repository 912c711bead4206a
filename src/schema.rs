//! Contact form schema.
//!
//! Turns an untyped JSON value into a [`ContactFormData`] or the full list of
//! field-level problems with it. Every field is checked independently so a
//! client sees all of its mistakes in one response.

use crate::domain::{ContactGroup, EmailAddress, PhoneNumber};
use crate::models::ContactFormData;
use serde::Serialize;
use serde_json::{Map, Value};

/// Longest accepted contact name, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Machine-readable kind of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
    InvalidString,
    InvalidEnumValue,
    Custom,
}

/// One schema violation: which field, and what is wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    /// Field path from the document root; empty for the root itself
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, field: &str, message: impl Into<String>) -> Self {
        Self {
            code,
            path: vec![field.to_string()],
            message: message.into(),
        }
    }

    /// The dotted field path, e.g. `"email"`.
    pub fn field(&self) -> String {
        self.path.join(".")
    }
}

/// Validate an arbitrary JSON value against the contact form schema.
///
/// Unknown keys are ignored, which also drops any client-supplied `id`,
/// `createdAt` or `updatedAt`.
pub fn validate_contact_form(input: &Value) -> Result<ContactFormData, Vec<ValidationIssue>> {
    let Some(object) = input.as_object() else {
        return Err(vec![ValidationIssue {
            code: IssueCode::InvalidType,
            path: Vec::new(),
            message: format!("Expected object, received {}", type_name(input)),
        }]);
    };

    let mut issues = Vec::new();

    let name = collect(check_name(object), &mut issues);
    let email = collect(check_email(object), &mut issues);
    let phone = collect(check_phone(object), &mut issues);
    let group = collect(check_group(object), &mut issues);

    match (name, email, phone, group) {
        (Some(name), Some(email), Some(phone), Some(group)) if issues.is_empty() => {
            Ok(ContactFormData {
                name,
                email,
                phone,
                group,
            })
        }
        _ => Err(issues),
    }
}

fn collect<T>(result: Result<T, ValidationIssue>, issues: &mut Vec<ValidationIssue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(issue) => {
            issues.push(issue);
            None
        }
    }
}

/// Fetch a string field. `Ok(None)` means the key is absent.
fn string_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<Option<&'a str>, ValidationIssue> {
    match object.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ValidationIssue::new(
            IssueCode::InvalidType,
            field,
            format!("Expected string, received {}", type_name(other)),
        )),
    }
}

fn required_string_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, ValidationIssue> {
    string_field(object, field)?
        .ok_or_else(|| ValidationIssue::new(IssueCode::InvalidType, field, "Required"))
}

fn check_name(object: &Map<String, Value>) -> Result<String, ValidationIssue> {
    let name = required_string_field(object, "name")?;
    let length = name.chars().count();

    if length == 0 {
        return Err(ValidationIssue::new(
            IssueCode::TooSmall,
            "name",
            "Name is required",
        ));
    }
    if length > NAME_MAX_CHARS {
        return Err(ValidationIssue::new(
            IssueCode::TooBig,
            "name",
            "Name must be less than 100 characters",
        ));
    }
    Ok(name.to_string())
}

fn check_email(object: &Map<String, Value>) -> Result<EmailAddress, ValidationIssue> {
    let email = required_string_field(object, "email")?;
    EmailAddress::new(email).map_err(|_| {
        ValidationIssue::new(
            IssueCode::InvalidString,
            "email",
            "Please enter a valid email address",
        )
    })
}

fn check_phone(object: &Map<String, Value>) -> Result<Option<PhoneNumber>, ValidationIssue> {
    let Some(phone) = string_field(object, "phone")? else {
        return Ok(None);
    };

    // Separators alone count as "no phone".
    if PhoneNumber::strip_separators(phone).is_empty() {
        return Ok(None);
    }

    PhoneNumber::new(phone).map(Some).map_err(|_| {
        ValidationIssue::new(
            IssueCode::Custom,
            "phone",
            "Please enter a valid phone number",
        )
    })
}

fn check_group(object: &Map<String, Value>) -> Result<Option<ContactGroup>, ValidationIssue> {
    match string_field(object, "group")? {
        None | Some("") => Ok(None),
        Some(group) => group.parse::<ContactGroup>().map(Some).map_err(|_| {
            ValidationIssue::new(
                IssueCode::InvalidEnumValue,
                "group",
                format!(
                    "Invalid enum value. Expected {}, received '{}'",
                    ContactGroup::expected_values(),
                    group
                ),
            )
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
