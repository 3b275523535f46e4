use actix_web::web::{block, Data, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use auth::Role;
use db::{
    get_conn,
    models::{Application, User, UserDetails},
    PgPool,
};
use errors::Error;

use crate::validate::validate;

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = "1"))]
    name: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = "8"))]
    password: String,
    // participant/judge/volunteer; admins come from the seed binary
    role: Option<String>,
    // team metadata that becomes the participant application payload
    team: Option<Value>,
}

pub async fn register(
    pool: Data<PgPool>,
    params: Json<RegisterRequest>,
) -> Result<Json<UserDetails>, Error> {
    validate(&params)?;
    let params = params.into_inner();

    let user = block(move || {
        let conn = get_conn(&pool)?;

        let email = params.email.trim().to_lowercase();
        let role = params
            .role
            .as_deref()
            .and_then(Role::parse)
            .filter(|role| *role != Role::Admin)
            .unwrap_or(Role::Participant);

        if User::find_by_email(&conn, &email)?.is_some() {
            return Err(Error::BadRequest("Email is already registered".to_string()));
        }

        let user = User::create(&conn, params.name.trim(), &email, &params.password, role)?;

        if role == Role::Participant {
            let team = params.team.unwrap_or_else(|| json!({}));
            Application::create(&conn, user.id, &team)?;
        }

        Ok(user)
    })
    .await??;

    Ok(Json(UserDetails::from(&user)))
}
