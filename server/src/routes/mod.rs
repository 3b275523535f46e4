use actix_web::web;

use auth::Role;

use crate::middleware::Auth;

pub mod admin;
pub mod judging;
pub mod participant;
pub mod public;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(public::register))
                    .route("/login", web::post().to(public::login))
                    .route("/logout", web::post().to(public::logout)),
            )
            .service(
                web::scope("/participant")
                    .wrap(Auth::role(Role::Participant))
                    .route("", web::get().to(participant::dashboard))
                    .route("/team", web::post().to(participant::save_team))
                    .route("/project", web::post().to(participant::save_project)),
            )
            .service(
                web::scope("/admin")
                    .wrap(Auth::role(Role::Admin))
                    .route("/applications", web::get().to(admin::list_applications))
                    .route(
                        "/applications/{id}/status",
                        web::post().to(admin::set_application_status),
                    )
                    .route(
                        "/applications/{id}/score",
                        web::get().to(admin::application_score),
                    )
                    .route("/rooms", web::post().to(admin::create_room))
                    .route("/rooms", web::get().to(admin::list_rooms))
                    .route("/rooms/{id}/users", web::post().to(admin::assign_user))
                    .route("/rooms/{id}/projects", web::post().to(admin::assign_project))
                    .route(
                        "/rooms/{id}/projects/{project_id}",
                        web::delete().to(admin::unassign_project),
                    ),
            )
            .service(
                web::scope("/judging")
                    .wrap(Auth::roles(&[Role::Judge, Role::Volunteer]))
                    .route("/teams", web::get().to(judging::assigned_teams))
                    .route("/teams/{id}", web::get().to(judging::team_detail))
                    .route("/teams/{id}/score", web::post().to(judging::submit_score)),
            ),
    );
}
