//! OpenAPI document and Swagger UI, served under `/api-docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{AuthResponse, GoogleLoginRequest, LoginRequest, SignupRequest};
use crate::models::{PublicUser, SortOrder, Task, TaskInput, TaskStatus, TaskUpdate};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task Manager API",
        version = "1.0.0",
        description = "API documentation for the Task Manager application"
    ),
    paths(
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::auth::google_login,
        crate::routes::tasks::create_task,
        crate::routes::tasks::list_tasks,
        crate::routes::tasks::get_task,
        crate::routes::tasks::update_task,
        crate::routes::tasks::delete_task,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        GoogleLoginRequest,
        AuthResponse,
        PublicUser,
        Task,
        TaskInput,
        TaskUpdate,
        TaskStatus,
        SortOrder,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "users", description = "User management API"),
        (name = "tasks", description = "Task management API")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api-docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi())
}
