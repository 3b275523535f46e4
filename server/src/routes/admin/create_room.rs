use actix_web::web::{block, Data, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use db::{get_conn, models::Room, PgPool};
use errors::Error;

use crate::validate::validate;

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = "1"))]
    pub name: String,
}

pub async fn create_room(
    pool: Data<PgPool>,
    params: Json<CreateRoomRequest>,
) -> Result<Json<Room>, Error> {
    validate(&params)?;
    let params = params.into_inner();

    let room = block(move || {
        let conn = get_conn(&pool)?;
        Room::create(&conn, params.name.trim())
    })
    .await??;

    Ok(Json(room))
}

#[cfg(test)]
mod tests {
    use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

    use auth::Role;
    use db::{
        get_conn,
        models::{Room, User},
        new_pool,
        schema::{rooms, users},
    };

    use super::CreateRoomRequest;
    use crate::tests::helpers::tests::{session_cookie, test_post};

    #[actix_rt::test]
    async fn test_create_room() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let admin = User::create(
            &conn,
            "Admin",
            "room-admin@example.com",
            "password123",
            Role::Admin,
        )
        .unwrap();
        let cookie = session_cookie(&conn, admin.id);

        let res: (u16, Room) = test_post(
            "/api/admin/rooms",
            CreateRoomRequest {
                name: "Hall A".to_string(),
            },
            Some(cookie),
        )
        .await;

        assert_eq!(res.0, 200);
        assert_eq!(res.1.name, "Hall A");
        assert_eq!(res.1.status, "active");

        diesel::delete(rooms::table.filter(rooms::id.eq(res.1.id)))
            .execute(&conn)
            .unwrap();
        diesel::delete(users::table.filter(users::email.eq("room-admin@example.com")))
            .execute(&conn)
            .unwrap();
    }
}
