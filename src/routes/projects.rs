//! Admin CRUD for portfolio projects. Unlike the public content routes,
//! these see unpublished rows too.

use crate::auth::{RequireAdmin, RequireStaff};
use crate::db::AgencyDb;
use crate::error::ApiError;
use crate::models::{DataResponse, MessageResponse, Project};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket_db_pools::{Connection, sqlx};
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProjectPayload {
    pub client_id: Option<i32>,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub tech_stack: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl ProjectPayload {
    fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() || self.slug.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "title and slug are required".to_string(),
            ));
        }
        Ok(())
    }
}

const PROJECT_COLUMNS: &str =
    "id, client_id, title, slug, description, tech_stack, image_url, published, created_at";

/// List all projects, newest first.
#[openapi(tag = "Projects")]
#[get("/projects")]
pub async fn list_projects(
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<DataResponse<Vec<Project>>>, ApiError> {
    let projects: Vec<Project> = sqlx::query_as(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
    ))
    .fetch_all(&mut **db)
    .await?;

    Ok(Json(DataResponse { data: projects }))
}

/// Get a single project by id.
#[openapi(tag = "Projects")]
#[get("/projects/<id>")]
pub async fn get_project(
    id: i32,
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<Project>, ApiError> {
    let project: Project =
        sqlx::query_as(&format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"))
            .bind(id)
            .fetch_one(&mut **db)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => {
                    ApiError::NotFound(format!("Project {} not found", id))
                }
                other => ApiError::from(other),
            })?;

    Ok(Json(project))
}

/// Create a project. A duplicate slug maps to a 400 conflict.
#[openapi(tag = "Projects")]
#[post("/projects", data = "<payload>")]
pub async fn create_project(
    payload: Json<ProjectPayload>,
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<status::Created<Json<Project>>, ApiError> {
    payload.validate()?;

    let project: Project = sqlx::query_as(&format!(
        r#"INSERT INTO projects (client_id, title, slug, description, tech_stack, image_url, published)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING {PROJECT_COLUMNS}"#
    ))
    .bind(payload.client_id)
    .bind(payload.title.trim())
    .bind(payload.slug.trim())
    .bind(payload.description.as_deref())
    .bind(payload.tech_stack.as_deref())
    .bind(payload.image_url.as_deref())
    .bind(payload.published)
    .fetch_one(&mut **db)
    .await?;

    Ok(status::Created::new("").body(Json(project)))
}

/// Update a project.
#[openapi(tag = "Projects")]
#[put("/projects/<id>", data = "<payload>")]
pub async fn update_project(
    id: i32,
    payload: Json<ProjectPayload>,
    _staff: RequireStaff,
    mut db: Connection<AgencyDb>,
) -> Result<Json<Project>, ApiError> {
    payload.validate()?;

    let project: Project = sqlx::query_as(&format!(
        r#"UPDATE projects
           SET client_id = $1, title = $2, slug = $3, description = $4,
               tech_stack = $5, image_url = $6, published = $7
           WHERE id = $8
           RETURNING {PROJECT_COLUMNS}"#
    ))
    .bind(payload.client_id)
    .bind(payload.title.trim())
    .bind(payload.slug.trim())
    .bind(payload.description.as_deref())
    .bind(payload.tech_stack.as_deref())
    .bind(payload.image_url.as_deref())
    .bind(payload.published)
    .bind(id)
    .fetch_one(&mut **db)
    .await
    .map_err(|err| match err {
        sqlx::Error::RowNotFound => ApiError::NotFound(format!("Project {} not found", id)),
        other => ApiError::from(other),
    })?;

    Ok(Json(project))
}

/// Delete a project. Admin only.
#[openapi(tag = "Projects")]
#[delete("/projects/<id>")]
pub async fn delete_project(
    id: i32,
    _admin: RequireAdmin,
    mut db: Connection<AgencyDb>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(&mut **db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("Project {} not found", id)));
    }

    Ok(Json(MessageResponse {
        message: format!("Project {} deleted", id),
    }))
}
