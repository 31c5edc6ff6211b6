//! Field-level rules for incoming project and task payloads.
//!
//! Payload DTOs derive [`validator::Validate`] and point their `custom`
//! rules at the functions here. The request pipeline is always
//! trim -> validate -> escape, expressed through the [`Sanitize`] trait.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::task_status::TaskStatus;

/// Maximum length of a project name or task title, in characters.
pub const MAX_NAME_LEN: u64 = 255;

/// Maximum length of a description, in characters.
pub const MAX_DESCRIPTION_LEN: u64 = 2000;

static PROJECT_NAME_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-_.!?()]+$").expect("valid project name regex"));

/// A single failed rule, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Normalisation applied around validation.
///
/// `trim` runs before the rules so that whitespace-only input counts as
/// blank; `escape` runs after them so length limits apply to what the
/// client actually sent.
pub trait Sanitize {
    fn trim(&mut self);
    fn escape(&mut self);
}

pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub fn trim_opt(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        trim_in_place(v);
    }
}

pub fn escape_opt(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        *v = escape_html(v);
    }
}

/// Replace HTML-significant characters with entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn project_name_charset(name: &str) -> Result<(), ValidationError> {
    if PROJECT_NAME_CHARSET.is_match(name) {
        Ok(())
    } else {
        Err(rule("charset", "Project name contains invalid characters"))
    }
}

pub fn project_name_on_create(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(rule("required", "Project name is required"));
    }
    project_name_charset(name)
}

pub fn project_name_on_update(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(rule("not_empty", "Project name cannot be empty"));
    }
    project_name_charset(name)
}

pub fn task_title_on_create(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(rule("required", "Task title is required"));
    }
    Ok(())
}

pub fn task_title_on_update(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(rule("not_empty", "Task title cannot be empty"));
    }
    Ok(())
}

pub fn task_status(status: &str) -> Result<(), ValidationError> {
    status
        .parse::<TaskStatus>()
        .map(|_| ())
        .map_err(|_| rule("status", "Invalid status value"))
}

/// Flatten `validator`'s nested error map into an ordered list.
///
/// Fields are sorted by name; within a field, rules keep the order in which
/// they were declared on the DTO.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldError {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect()
}
