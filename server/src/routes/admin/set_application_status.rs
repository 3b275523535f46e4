use actix_web::web::{block, Data, Json, Path};
use serde::{Deserialize, Serialize};

use db::{get_conn, models::Application, PgPool};
use errors::Error;

#[derive(Clone, Deserialize, Serialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StatusResponse {
    pub id: i32,
    pub status: String,
}

/// Admin decision on a participant application. Only approved/rejected are
/// accepted; applications start out pending and never go back.
pub async fn set_application_status(
    application_id: Path<i32>,
    pool: Data<PgPool>,
    params: Json<StatusRequest>,
) -> Result<Json<StatusResponse>, Error> {
    let application_id = application_id.into_inner();
    let params = params.into_inner();

    if params.status != "approved" && params.status != "rejected" {
        return Err(Error::ValidationError(vec![
            "status must be approved or rejected".to_string(),
        ]));
    }

    let application = block(move || {
        let conn = get_conn(&pool)?;
        Application::set_status(&conn, application_id, &params.status)
    })
    .await??;

    Ok(Json(StatusResponse {
        id: application.id,
        status: application.status,
    }))
}
