use actix_web::web::{block, Data, Json, Path};
use serde::{Deserialize, Serialize};

use db::{get_conn, models::Application, PgPool};
use errors::Error;

#[derive(Debug, Deserialize, Serialize)]
pub struct ScoreReport {
    pub registration_id: i32,
    pub judge_count: usize,
    pub average_total: Option<f64>,
}

/// Aggregate for reporting, computed on read across every judge who scored
/// the application.
pub async fn application_score(
    application_id: Path<i32>,
    pool: Data<PgPool>,
) -> Result<Json<ScoreReport>, Error> {
    let application_id = application_id.into_inner();

    let (judge_count, average_total) = block(move || {
        let conn = get_conn(&pool)?;
        Application::aggregate_score(&conn, application_id)
    })
    .await??;

    Ok(Json(ScoreReport {
        registration_id: application_id,
        judge_count,
        average_total,
    }))
}
