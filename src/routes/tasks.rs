use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{SortOrder, Task, TaskInput, TaskQuery, TaskUpdate},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TASK_COLUMNS: &str = "id, title, description, status, user_id, created_at";

/// List the authenticated user's tasks
///
/// Supports an optional exact `status` filter, a case-insensitive `search`
/// on the title, and a `sort` direction on creation time (ascending by
/// default). Only tasks owned by the caller are ever returned.
#[utoipa::path(
    context_path = "/api/tasks",
    params(TaskQuery),
    responses(
        (status = 200, description = "List of tasks"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Error fetching tasks")
    ),
    security(("bearerAuth" = [])),
    tag = "tasks"
)]
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query: web::Query<TaskQuery>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    // Owner scoping is unconditional; the filters are appended around it.
    let mut sql = format!(
        "SELECT {} FROM tasks WHERE user_id = $1",
        TASK_COLUMNS
    );
    let mut param_count = 2;

    if query.status.is_some() {
        sql.push_str(&format!(" AND status = ${}", param_count));
        param_count += 1;
    }
    if query.search.is_some() {
        sql.push_str(&format!(" AND title ILIKE ${}", param_count));
    }

    sql.push_str(match query.sort.unwrap_or_default() {
        SortOrder::Asc => " ORDER BY created_at ASC",
        SortOrder::Desc => " ORDER BY created_at DESC",
    });

    let mut query_builder = sqlx::query_as::<_, Task>(&sql).bind(user.0);

    if let Some(status) = query.status {
        query_builder = query_builder.bind(status);
    }
    if let Some(search) = &query.search {
        query_builder = query_builder.bind(format!("%{}%", search));
    }

    let tasks = query_builder.fetch_all(pool.get_ref()).await.map_err(|e| {
        log::error!("list tasks failed: {}", e);
        AppError::Internal("Error fetching tasks".into())
    })?;

    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// Create a new task
///
/// The task is owned by the authenticated user; `status` defaults to `todo`.
#[utoipa::path(
    context_path = "/api/tasks",
    request_body = TaskInput,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Error creating task")
    ),
    security(("bearerAuth" = [])),
    tag = "tasks"
)]
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    payload: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = Task::new(payload.into_inner(), user.0);

    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, title, description, status, user_id) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.status)
    .bind(task.user_id)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("create task failed: {}", e);
        AppError::Internal("Error creating task".into())
    })?;

    Ok(HttpResponse::Created().json(json!({ "task": task })))
}

/// Get a single task by id
///
/// Scoped to the owner: a task belonging to another user looks the same as a
/// task that does not exist.
#[utoipa::path(
    context_path = "/api/tasks",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task retrieved successfully", body = Task),
        (status = 400, description = "Task not found"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Error fetching task")
    ),
    security(("bearerAuth" = [])),
    tag = "tasks"
)]
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
        TASK_COLUMNS
    ))
    .bind(task_id.into_inner())
    .bind(user.0)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("fetch task failed: {}", e);
        AppError::Internal("Error fetching task".into())
    })?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Update a task by id
///
/// Accepts a partial body; omitted fields keep their stored values. Returns
/// the updated task. Scoped to the owner.
#[utoipa::path(
    context_path = "/api/tasks",
    params(("id" = Uuid, Path, description = "Task id")),
    request_body = TaskUpdate,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Task not found"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Error updating task")
    ),
    security(("bearerAuth" = [])),
    tag = "tasks"
)]
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    payload: web::Json<TaskUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET \
             title = COALESCE($1, title), \
             description = COALESCE($2, description), \
             status = COALESCE($3, status) \
         WHERE id = $4 AND user_id = $5 RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.status)
    .bind(task_id.into_inner())
    .bind(user.0)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        log::error!("update task failed: {}", e);
        AppError::Internal("Error updating task".into())
    })?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Delete a task by id
///
/// Responds 204 with an empty body on success. Deleting an already-deleted
/// task hits the not-found path. Scoped to the owner.
#[utoipa::path(
    context_path = "/api/tasks",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 400, description = "Task not found"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Error deleting task")
    ),
    security(("bearerAuth" = [])),
    tag = "tasks"
)]
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id.into_inner())
        .bind(user.0)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            log::error!("delete task failed: {}", e);
            AppError::Internal("Error deleting task".into())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
