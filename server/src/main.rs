#[cfg(test)]
#[macro_use]
extern crate diesel;
#[macro_use]
extern crate log;
#[macro_use]
extern crate validator_derive;

use std::env;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenv::dotenv;

mod middleware;
mod routes;
mod tests;
mod validate;

use crate::routes::routes;
use auth::CookieSigner;
use db;
use errors::ErrorResponse;

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let signer = CookieSigner::new(env::var("APP_SECRET").expect("APP_SECRET must be set"));
    let pool = db::new_pool();

    info!("starting server on 0.0.0.0:8080");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Logger::new("%a %{User-Agent}i"))
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(signer.clone()))
            .configure(routes)
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(ErrorResponse::from("Not Found"))
            }))
    })
    .bind("0.0.0.0:8080")?
    .run()
    .await
}
