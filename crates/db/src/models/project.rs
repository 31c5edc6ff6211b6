//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use taskhub_core::github::RepoSummary;
use taskhub_core::patch::{double_option, null_as_empty, present_null_as_empty};
use taskhub_core::types::{DbId, Timestamp};
use taskhub_core::validation::{escape_html, escape_opt, trim_in_place, trim_opt, Sanitize};
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Last repository list fetched by the enrichment flow.
    pub github_repos: Json<Vec<RepoSummary>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
///
/// A missing or `null` name deserializes to an empty string so that it is
/// reported by the required rule rather than as a malformed body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProject {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "taskhub_core::validation::project_name_on_create"),
        length(max = 255, message = "Project name must be between 1 and 255 characters")
    )]
    pub name: String,
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,
}

/// DTO for updating an existing project.
///
/// Absent fields are left unchanged. An explicit `null` name is reported as
/// blank; an explicit `null` description clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[serde(default, deserialize_with = "present_null_as_empty")]
    #[validate(
        custom(function = "taskhub_core::validation::project_name_on_update"),
        length(max = 255, message = "Project name must be between 1 and 255 characters")
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<Option<String>>,
}

impl Sanitize for CreateProject {
    fn trim(&mut self) {
        trim_in_place(&mut self.name);
        trim_opt(&mut self.description);
    }

    fn escape(&mut self) {
        self.name = escape_html(&self.name);
        escape_opt(&mut self.description);
    }
}

impl Sanitize for UpdateProject {
    fn trim(&mut self) {
        trim_opt(&mut self.name);
        if let Some(description) = self.description.as_mut() {
            trim_opt(description);
        }
    }

    fn escape(&mut self) {
        escape_opt(&mut self.name);
        if let Some(description) = self.description.as_mut() {
            escape_opt(description);
        }
    }
}
