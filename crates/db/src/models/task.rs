//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::patch::{double_option, null_as_empty, present_null_as_empty};
use taskhub_core::types::{DbId, Timestamp};
use taskhub_core::validation::{escape_html, escape_opt, trim_in_place, trim_opt, Sanitize};
use validator::Validate;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// One of the [`taskhub_core::task_status::TaskStatus`] names.
    pub status: String,
    /// `None` once the owning project has been deleted.
    pub project_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
///
/// `project_id` is never read from the body; handlers set it from the URL.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTask {
    #[serde(skip_deserializing)]
    pub project_id: DbId,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "taskhub_core::validation::task_title_on_create"),
        length(max = 255, message = "Task title must be between 1 and 255 characters")
    )]
    pub title: String,
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,
    /// Defaults to `pending` if omitted. `null` is not a valid status.
    #[serde(default, deserialize_with = "present_null_as_empty")]
    #[validate(custom(function = "taskhub_core::validation::task_status"))]
    pub status: Option<String>,
}

/// DTO for updating an existing task.
///
/// Absent fields are left unchanged. An explicit `null` title or status is
/// rejected by the same rules as a blank value; an explicit `null`
/// description clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    #[serde(default, deserialize_with = "present_null_as_empty")]
    #[validate(
        custom(function = "taskhub_core::validation::task_title_on_update"),
        length(max = 255, message = "Task title must be between 1 and 255 characters")
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_null_as_empty")]
    #[validate(custom(function = "taskhub_core::validation::task_status"))]
    pub status: Option<String>,
}

impl Sanitize for CreateTask {
    fn trim(&mut self) {
        trim_in_place(&mut self.title);
        trim_opt(&mut self.description);
    }

    fn escape(&mut self) {
        self.title = escape_html(&self.title);
        escape_opt(&mut self.description);
    }
}

impl Sanitize for UpdateTask {
    fn trim(&mut self) {
        trim_opt(&mut self.title);
        if let Some(description) = self.description.as_mut() {
            trim_opt(description);
        }
    }

    fn escape(&mut self) {
        escape_opt(&mut self.title);
        if let Some(description) = self.description.as_mut() {
            escape_opt(description);
        }
    }
}
