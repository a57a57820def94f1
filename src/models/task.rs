use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle state of a task.
/// Corresponds to the `task_status` SQL enum; serializes as
/// `todo | in-progress | done`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type, ToSchema)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// Input for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskInput {
    /// Between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// At most 1000 characters when provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Defaults to `todo` when omitted.
    #[serde(default)]
    pub status: TaskStatus,
}

/// Partial update for a task: absent fields keep their stored values.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

/// A task row as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Identifier of the owning user.
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Creation-time sort direction for task listings.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query parameters for `GET /api/tasks`.
///
/// `status` deserializes through the enum, so an unknown value is rejected
/// before the handler runs.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TaskQuery {
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
    /// Sort by creation time, ascending by default.
    pub sort: Option<SortOrder>,
    /// Only return tasks with this exact status.
    pub status: Option<TaskStatus>,
}

impl Task {
    /// Builds a new task owned by `user_id`, with a fresh UUID and the
    /// current time as `created_at`.
    pub fn new(input: TaskInput, user_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status,
            user_id,
            created_at: Utc::now(),
        }
    }
}
