use actix_web::web::{block, Data, Json};

use db::{get_conn, models::Room, PgPool};
use errors::Error;

pub async fn list_rooms(pool: Data<PgPool>) -> Result<Json<Vec<Room>>, Error> {
    let rooms = block(move || {
        let conn = get_conn(&pool)?;
        Room::list(&conn)
    })
    .await??;

    Ok(Json(rooms))
}
