use actix_web::web::{block, Data, Json};

use db::{
    get_conn,
    models::{Application, ApplicationSummary},
    PgPool,
};
use errors::Error;

pub async fn list_applications(pool: Data<PgPool>) -> Result<Json<Vec<ApplicationSummary>>, Error> {
    let applications = block(move || {
        let conn = get_conn(&pool)?;
        Application::list(&conn)
    })
    .await??;

    Ok(Json(applications))
}
