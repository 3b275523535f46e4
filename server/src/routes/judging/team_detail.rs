use actix_web::web::{block, Data, Json, Path};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use auth::CurrentUser;
use db::{
    get_conn,
    models::{Application, Project, ProjectRoom, Score, ScoreValues},
    PgPool,
};
use errors::Error;

#[derive(Debug, Deserialize, Serialize)]
pub struct TeamDetailResponse {
    pub registration_id: i32,
    pub team_name: Option<String>,
    pub members: Value,
    pub title: String,
    pub description: String,
    pub project_meta: Value,
    pub score: Option<ScoreValues>,
}

/// Full view of one team for the scoring screen. A registration outside the
/// caller's rooms comes back as a 404, same as one that does not exist.
pub async fn team_detail(
    user: CurrentUser,
    registration_id: Path<i32>,
    pool: Data<PgPool>,
) -> Result<Json<TeamDetailResponse>, Error> {
    let registration_id = registration_id.into_inner();

    let detail = block(move || {
        let conn = get_conn(&pool)?;

        if !ProjectRoom::is_assigned_to(&conn, user.id, registration_id)? {
            return Err(Error::NotFound("Team not found".to_string()));
        }

        let application = Application::find(&conn, registration_id)?;
        let project = Project::find_by_participant(&conn, application.user_id)?
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;
        let score = Score::find(&conn, user.id, registration_id)?;

        let data = application.data_value();
        Ok(TeamDetailResponse {
            registration_id,
            team_name: data
                .get("team_name")
                .and_then(|name| name.as_str())
                .map(|name| name.to_string()),
            members: project.members(),
            title: project.title.clone(),
            description: project.description.clone(),
            project_meta: project.meta(),
            score: score.map(|score| ScoreValues {
                influence: score.influence,
                creativity: score.creativity,
                validity: score.validity,
                relevance: score.relevance,
                presentation: score.presentation,
            }),
        })
    })
    .await??;

    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
    use serde_json::json;

    use auth::Role;
    use db::{
        get_conn,
        models::{Application, Project, ProjectRoom, Room, RoomUser, User},
        new_pool,
        schema::{rooms, users},
    };

    use super::TeamDetailResponse;
    use crate::tests::helpers::tests::{session_cookie, test_get, test_get_status};

    #[actix_rt::test]
    async fn test_detail_for_assigned_team() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let judge = User::create(
            &conn,
            "Judge",
            "detail-judge@example.com",
            "password123",
            Role::Judge,
        )
        .unwrap();
        let lead = User::create(
            &conn,
            "Lead",
            "detail-lead@example.com",
            "password123",
            Role::Participant,
        )
        .unwrap();

        let application =
            Application::create(&conn, lead.id, &json!({ "team_name": "Stargazers" })).unwrap();
        Project::save_members(&conn, lead.id, &json!([{ "name": "Ana" }])).unwrap();
        let project = Project::save_details(
            &conn,
            lead.id,
            "Orbit Tracker",
            "Tracks orbits",
            &json!({ "category": "software" }),
        )
        .unwrap();

        let room = Room::create(&conn, "Detail Room").unwrap();
        RoomUser::assign(&conn, judge.id, room.id).unwrap();
        ProjectRoom::assign(&conn, project.id, room.id).unwrap();

        let cookie = session_cookie(&conn, judge.id);
        let res: (u16, TeamDetailResponse) = test_get(
            &format!("/api/judging/teams/{}", application.id),
            Some(cookie),
        )
        .await;

        assert_eq!(res.0, 200);
        assert_eq!(res.1.team_name, Some("Stargazers".to_string()));
        assert_eq!(res.1.title, "Orbit Tracker");
        assert_eq!(res.1.members, json!([{ "name": "Ana" }]));
        assert_eq!(res.1.project_meta["category"], "software");
        assert!(res.1.score.is_none());

        diesel::delete(rooms::table.filter(rooms::id.eq(room.id)))
            .execute(&conn)
            .unwrap();
        for email in &["detail-lead@example.com", "detail-judge@example.com"] {
            diesel::delete(users::table.filter(users::email.eq(*email)))
                .execute(&conn)
                .unwrap();
        }
    }

    #[actix_rt::test]
    async fn test_team_outside_rooms_is_404() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let judge = User::create(
            &conn,
            "Judge",
            "outside-judge@example.com",
            "password123",
            Role::Judge,
        )
        .unwrap();
        let lead = User::create(
            &conn,
            "Lead",
            "outside-lead@example.com",
            "password123",
            Role::Participant,
        )
        .unwrap();

        let application =
            Application::create(&conn, lead.id, &json!({ "team_name": "Hidden" })).unwrap();
        let project = Project::save_members(&conn, lead.id, &json!([])).unwrap();
        let room = Room::create(&conn, "Unjoined Room").unwrap();
        ProjectRoom::assign(&conn, project.id, room.id).unwrap();

        let cookie = session_cookie(&conn, judge.id);
        let status = test_get_status(
            &format!("/api/judging/teams/{}", application.id),
            Some(cookie),
        )
        .await;
        assert_eq!(status, 404);

        diesel::delete(rooms::table.filter(rooms::id.eq(room.id)))
            .execute(&conn)
            .unwrap();
        for email in &["outside-lead@example.com", "outside-judge@example.com"] {
            diesel::delete(users::table.filter(users::email.eq(*email)))
                .execute(&conn)
                .unwrap();
        }
    }
}
