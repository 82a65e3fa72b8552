//! Public marketing-site content: services, team, testimonials, and the
//! published slice of the project portfolio. No authentication; read only.

use crate::db::AgencyDb;
use crate::error::ApiError;
use crate::models::{DataResponse, Project, Service, TeamMember, Testimonial};
use rocket::serde::json::Json;
use rocket_db_pools::{Connection, sqlx};
use rocket_okapi::openapi;

/// List the services offered, in display order.
#[openapi(tag = "Content")]
#[get("/services")]
pub async fn list_services(
    mut db: Connection<AgencyDb>,
) -> Result<Json<DataResponse<Vec<Service>>>, ApiError> {
    let services: Vec<Service> = sqlx::query_as(
        r#"SELECT id, title, description, icon, display_order
           FROM services
           ORDER BY display_order ASC, title ASC"#,
    )
    .fetch_all(&mut **db)
    .await?;

    Ok(Json(DataResponse { data: services }))
}

/// List team members, in display order.
#[openapi(tag = "Content")]
#[get("/team")]
pub async fn list_team(
    mut db: Connection<AgencyDb>,
) -> Result<Json<DataResponse<Vec<TeamMember>>>, ApiError> {
    let members: Vec<TeamMember> = sqlx::query_as(
        r#"SELECT id, name, role_title, bio, avatar_url, display_order
           FROM team_members
           ORDER BY display_order ASC, name ASC"#,
    )
    .fetch_all(&mut **db)
    .await?;

    Ok(Json(DataResponse { data: members }))
}

/// List client testimonials, in display order.
#[openapi(tag = "Content")]
#[get("/testimonials")]
pub async fn list_testimonials(
    mut db: Connection<AgencyDb>,
) -> Result<Json<DataResponse<Vec<Testimonial>>>, ApiError> {
    let testimonials: Vec<Testimonial> = sqlx::query_as(
        r#"SELECT id, author, company, quote, display_order
           FROM testimonials
           ORDER BY display_order ASC, author ASC"#,
    )
    .fetch_all(&mut **db)
    .await?;

    Ok(Json(DataResponse { data: testimonials }))
}

/// List published portfolio projects. Unpublished rows are only visible
/// through the admin API.
#[openapi(tag = "Content")]
#[get("/projects")]
pub async fn list_published_projects(
    mut db: Connection<AgencyDb>,
) -> Result<Json<DataResponse<Vec<Project>>>, ApiError> {
    let projects: Vec<Project> = sqlx::query_as(
        r#"SELECT id, client_id, title, slug, description, tech_stack, image_url, published, created_at
           FROM projects
           WHERE published = true
           ORDER BY created_at DESC"#,
    )
    .fetch_all(&mut **db)
    .await?;

    Ok(Json(DataResponse { data: projects }))
}

/// Get a single published project by slug.
#[openapi(tag = "Content")]
#[get("/projects/<slug>")]
pub async fn get_published_project(
    slug: String,
    mut db: Connection<AgencyDb>,
) -> Result<Json<Project>, ApiError> {
    let project: Project = sqlx::query_as(
        r#"SELECT id, client_id, title, slug, description, tech_stack, image_url, published, created_at
           FROM projects
           WHERE slug = $1 AND published = true"#,
    )
    .bind(&slug)
    .fetch_one(&mut **db)
    .await
    .map_err(|err| match err {
        sqlx::Error::RowNotFound => ApiError::NotFound(format!("Project '{}' not found", slug)),
        other => ApiError::from(other),
    })?;

    Ok(Json(project))
}
