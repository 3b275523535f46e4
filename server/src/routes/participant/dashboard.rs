use actix_web::web::{block, Data, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use auth::CurrentUser;
use db::{
    get_conn,
    models::{Application, Project},
    PgPool,
};
use errors::Error;

#[derive(Debug, Deserialize, Serialize)]
pub struct DashboardResponse {
    pub application_status: String,
    pub application_data: Value,
    pub project_title: String,
    pub project_description: String,
    pub members: Value,
    pub project_meta: Value,
}

pub async fn dashboard(
    user: CurrentUser,
    pool: Data<PgPool>,
) -> Result<Json<DashboardResponse>, Error> {
    let response = block(move || {
        let conn = get_conn(&pool)?;

        let application = Application::latest_for_user(&conn, user.id)?;
        let project = Project::find_by_participant(&conn, user.id)?;

        let (application_status, application_data) = match application {
            Some(application) => (application.status.clone(), application.data_value()),
            None => ("pending".to_string(), json!({})),
        };

        let (project_title, project_description, members, project_meta) = match project {
            Some(project) => (
                project.title.clone(),
                project.description.clone(),
                project.members(),
                project.meta(),
            ),
            None => ("".to_string(), "".to_string(), json!([]), json!({})),
        };

        Ok::<DashboardResponse, Error>(DashboardResponse {
            application_status,
            application_data,
            project_title,
            project_description,
            members,
            project_meta,
        })
    })
    .await??;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
    use serde_json::json;

    use auth::Role;
    use db::{
        get_conn,
        models::{Application, User},
        new_pool,
        schema::users,
    };

    use super::DashboardResponse;
    use crate::tests::helpers::tests::{session_cookie, test_get};

    #[actix_rt::test]
    async fn test_dashboard_reflects_application_status() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let user = User::create(
            &conn,
            "Lead",
            "dashboard@example.com",
            "password123",
            Role::Participant,
        )
        .unwrap();
        Application::create(&conn, user.id, &json!({ "team_name": "Rocketeers" })).unwrap();
        let cookie = session_cookie(&conn, user.id);

        let res: (u16, DashboardResponse) = test_get("/api/participant", Some(cookie)).await;

        assert_eq!(res.0, 200);
        assert_eq!(res.1.application_status, "pending");
        assert_eq!(res.1.application_data["team_name"], "Rocketeers");
        assert_eq!(res.1.project_title, "");

        diesel::delete(users::table.filter(users::email.eq("dashboard@example.com")))
            .execute(&conn)
            .unwrap();
    }
}
