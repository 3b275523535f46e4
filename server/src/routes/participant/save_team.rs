use actix_web::web::{block, Data, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use auth::CurrentUser;
use db::{get_conn, models::Project, PgPool};
use errors::Error;

#[derive(Clone, Deserialize, Serialize)]
pub struct SaveTeamRequest {
    pub members: Value,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SaveTeamResponse {
    pub members: Value,
}

/// Stores the roster on the participant's project, creating the project row
/// on first save. Any existing project_meta is preserved.
pub async fn save_team(
    user: CurrentUser,
    pool: Data<PgPool>,
    params: Json<SaveTeamRequest>,
) -> Result<Json<SaveTeamResponse>, Error> {
    let params = params.into_inner();

    if !params.members.is_array() {
        return Err(Error::ValidationError(vec![
            "members must be a list".to_string()
        ]));
    }

    let project = block(move || {
        let conn = get_conn(&pool)?;
        Project::save_members(&conn, user.id, &params.members)
    })
    .await??;

    Ok(Json(SaveTeamResponse {
        members: project.members(),
    }))
}
