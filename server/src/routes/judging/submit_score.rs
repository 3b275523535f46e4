use actix_web::web::{block, Data, Json, Path};
use serde::{Deserialize, Serialize};

use auth::CurrentUser;
use db::{
    get_conn,
    models::{ProjectRoom, Score, ScoreValues},
    PgPool,
};
use errors::Error;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ScoreParams {
    pub influence: i32,
    pub creativity: i32,
    pub validity: i32,
    pub relevance: i32,
    pub presentation: i32,
    pub confirm: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScoreResponse {
    pub scored: bool,
    pub values: Option<ScoreValues>,
}

/// Submits this judge's score for a team, or withdraws it when `confirm` is
/// false. Withdrawing deletes the row outright so the team reopens for
/// scoring.
pub async fn submit_score(
    user: CurrentUser,
    registration_id: Path<i32>,
    pool: Data<PgPool>,
    params: Json<ScoreParams>,
) -> Result<Json<ScoreResponse>, Error> {
    let registration_id = registration_id.into_inner();
    let params = params.into_inner();

    let response = block(move || {
        let conn = get_conn(&pool)?;

        if !ProjectRoom::is_assigned_to(&conn, user.id, registration_id)? {
            return Err(Error::NotFound("Team not found".to_string()));
        }

        if !params.confirm {
            Score::retract(&conn, user.id, registration_id)?;
            return Ok(ScoreResponse {
                scored: false,
                values: None,
            });
        }

        let score = Score::upsert(
            &conn,
            user.id,
            registration_id,
            &ScoreValues {
                influence: params.influence,
                creativity: params.creativity,
                validity: params.validity,
                relevance: params.relevance,
                presentation: params.presentation,
            },
        )?;

        Ok(ScoreResponse {
            scored: true,
            values: Some(ScoreValues {
                influence: score.influence,
                creativity: score.creativity,
                validity: score.validity,
                relevance: score.relevance,
                presentation: score.presentation,
            }),
        })
    })
    .await??;

    Ok(Json(response))
}
