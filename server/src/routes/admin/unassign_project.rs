use actix_web::web::{block, Data, Json, Path};

use db::{get_conn, models::ProjectRoom, PgPool};
use errors::Error;

/// Removes a project from a room. Safe to repeat.
pub async fn unassign_project(
    path: Path<(i32, i32)>,
    pool: Data<PgPool>,
) -> Result<Json<()>, Error> {
    let (room_id, project_id) = path.into_inner();

    block(move || {
        let conn = get_conn(&pool)?;
        ProjectRoom::unassign(&conn, project_id, room_id)
    })
    .await??;

    Ok(Json(()))
}
