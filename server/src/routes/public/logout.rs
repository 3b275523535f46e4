use actix_web::{
    cookie::Cookie,
    web::{block, Data},
    HttpRequest, HttpResponse,
};

use auth::{CookieSigner, SESSION_COOKIE};
use db::{get_conn, models::Session, PgPool};
use errors::Error;

/// Destroys the session row if the cookie holds a validly signed token, and
/// clears the cookie either way. Safe to call when already logged out.
pub async fn logout(
    req: HttpRequest,
    pool: Data<PgPool>,
    signer: Data<CookieSigner>,
) -> Result<HttpResponse, Error> {
    let token = req
        .cookie(SESSION_COOKIE)
        .and_then(|cookie| signer.unsign(cookie.value()));

    if let Some(token) = token {
        block(move || {
            let conn = get_conn(&pool)?;
            Session::destroy(&conn, &token)
        })
        .await??;
    }

    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").http_only(true).finish();
    removal.make_removal();

    Ok(HttpResponse::Ok().cookie(removal).json(()))
}
