use actix_web::web::{block, Data, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use auth::CurrentUser;
use db::{get_conn, models::Project, PgPool};
use errors::Error;

use crate::validate::validate;

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct SaveProjectRequest {
    #[validate(length(min = "1"))]
    project_name: String,
    #[validate(length(min = "1"))]
    category: String,
    #[validate(length(min = "1"))]
    team_url: String,
    #[validate(length(min = "1"))]
    description: String,
    #[validate(length(min = "1"))]
    data_sources: String,
    video_link: Option<String>,
    github_link: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SaveProjectResponse {
    pub id: i32,
    pub title: String,
}

pub async fn save_project(
    user: CurrentUser,
    pool: Data<PgPool>,
    params: Json<SaveProjectRequest>,
) -> Result<Json<SaveProjectResponse>, Error> {
    validate(&params)?;
    let params = params.into_inner();

    let project = block(move || {
        let conn = get_conn(&pool)?;

        // The fixed sub-fields ride along with every save, as the original
        // intake form defined them.
        let meta = json!({
            "category": params.category.trim(),
            "team_url": params.team_url.trim(),
            "data_sources": params.data_sources.trim(),
            "video_link": params.video_link.as_deref().unwrap_or("").trim(),
            "github_link": params.github_link.as_deref().unwrap_or("").trim(),
            "team_work_score": 5,
            "user_experience_score": 5,
            "is_nasa_data_usage_score": 5,
            "is_challenge_category_score": 1,
            "id_project_link_score": 1,
            "is_nasa_global_team_url_score": 1,
        });

        Project::save_details(
            &conn,
            user.id,
            params.project_name.trim(),
            params.description.trim(),
            &meta,
        )
    })
    .await??;

    Ok(Json(SaveProjectResponse {
        id: project.id,
        title: project.title,
    }))
}
