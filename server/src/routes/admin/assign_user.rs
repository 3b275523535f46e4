use actix_web::web::{block, Data, Json, Path};
use serde::{Deserialize, Serialize};

use db::{
    get_conn,
    models::{RoomUser, User},
    PgPool,
};
use errors::Error;

#[derive(Clone, Deserialize, Serialize)]
pub struct AssignUserRequest {
    pub user_id: i32,
}

/// Puts a judge or volunteer into a room. Assigning someone twice is a
/// no-op.
pub async fn assign_user(
    room_id: Path<i32>,
    pool: Data<PgPool>,
    params: Json<AssignUserRequest>,
) -> Result<Json<()>, Error> {
    let room_id = room_id.into_inner();
    let params = params.into_inner();

    block(move || {
        let conn = get_conn(&pool)?;

        let user = User::find(&conn, params.user_id)?;
        if user.role != "judge" && user.role != "volunteer" {
            return Err(Error::BadRequest(
                "Only judges and volunteers can be assigned to rooms".to_string(),
            ));
        }

        RoomUser::assign(&conn, params.user_id, room_id)
    })
    .await??;

    Ok(Json(()))
}
