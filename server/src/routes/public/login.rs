use actix_web::{
    cookie::Cookie,
    web::{block, Data, Json},
    HttpResponse,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::{verify_password, CookieSigner, SESSION_COOKIE};
use db::{
    get_conn,
    models::{Session, User, UserDetails},
    PgPool,
};
use errors::Error;

use crate::validate::validate;

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    email: String,
    #[validate(length(min = "1"))]
    password: String,
}

pub async fn login(
    pool: Data<PgPool>,
    signer: Data<CookieSigner>,
    params: Json<LoginRequest>,
) -> Result<HttpResponse, Error> {
    validate(&params)?;
    let params = params.into_inner();

    let (user, token) = block(move || {
        let conn = get_conn(&pool)?;

        let email = params.email.trim().to_lowercase();
        let user = match User::find_active_by_email(&conn, &email)? {
            Some(user) => user,
            None => return Err(Error::Unauthorized("Invalid email or password".to_string())),
        };

        if !verify_password(&params.password, &user.password_hash) {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }

        let token = Session::create(&conn, user.id)?;

        Ok((user, token))
    })
    .await??;

    let cookie = Cookie::build(SESSION_COOKIE, signer.sign(&token))
        .path("/")
        .http_only(true)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(UserDetails::from(&user)))
}
