use actix_web::web::{block, Data, Json, Path};
use serde::{Deserialize, Serialize};

use db::{get_conn, models::ProjectRoom, PgPool};
use errors::Error;

#[derive(Clone, Deserialize, Serialize)]
pub struct AssignProjectRequest {
    pub project_id: i32,
}

/// A project can only ever sit in one room; attempting to move it without
/// unassigning first comes back as a 400 with a message.
pub async fn assign_project(
    room_id: Path<i32>,
    pool: Data<PgPool>,
    params: Json<AssignProjectRequest>,
) -> Result<Json<()>, Error> {
    let room_id = room_id.into_inner();
    let params = params.into_inner();

    block(move || {
        let conn = get_conn(&pool)?;
        ProjectRoom::assign(&conn, params.project_id, room_id)
    })
    .await??;

    Ok(Json(()))
}
