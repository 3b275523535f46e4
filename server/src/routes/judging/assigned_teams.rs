use actix_web::web::{block, Data, Json};

use auth::CurrentUser;
use db::{
    get_conn,
    models::{AssignedTeam, ProjectRoom},
    PgPool,
};
use errors::Error;

/// Teams visible to the requesting judge/volunteer through their room
/// memberships, each flagged with whether they already scored it.
pub async fn assigned_teams(
    user: CurrentUser,
    pool: Data<PgPool>,
) -> Result<Json<Vec<AssignedTeam>>, Error> {
    let teams = block(move || {
        let conn = get_conn(&pool)?;
        ProjectRoom::assigned_teams(&conn, user.id)
    })
    .await??;

    Ok(Json(teams))
}

#[cfg(test)]
mod tests {
    use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
    use serde_json::json;

    use auth::Role;
    use db::{
        get_conn,
        models::{
            Application, AssignedTeam, Project, ProjectRoom, Room, RoomUser, Score, ScoreValues,
            User, UserDetails,
        },
        new_pool,
        schema::{rooms, users},
    };

    use crate::routes::admin::{AssignProjectRequest, AssignUserRequest, StatusRequest};
    use crate::routes::judging::{ScoreParams, ScoreResponse};
    use crate::tests::helpers::tests::{session_cookie, test_get, test_post};

    #[actix_rt::test]
    async fn test_judge_sees_teams_in_their_rooms_only() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let judge = User::create(
            &conn,
            "Judge",
            "visible-judge@example.com",
            "password123",
            Role::Judge,
        )
        .unwrap();
        let lead_in = User::create(
            &conn,
            "Lead In",
            "visible-lead-in@example.com",
            "password123",
            Role::Participant,
        )
        .unwrap();
        let lead_out = User::create(
            &conn,
            "Lead Out",
            "visible-lead-out@example.com",
            "password123",
            Role::Participant,
        )
        .unwrap();

        let application_in =
            Application::create(&conn, lead_in.id, &json!({ "team_name": "Inside" })).unwrap();
        Application::create(&conn, lead_out.id, &json!({ "team_name": "Outside" })).unwrap();

        let project_in = Project::save_members(&conn, lead_in.id, &json!([])).unwrap();
        let project_out = Project::save_members(&conn, lead_out.id, &json!([])).unwrap();

        let room = Room::create(&conn, "Judged Room").unwrap();
        let other_room = Room::create(&conn, "Other Room").unwrap();
        RoomUser::assign(&conn, judge.id, room.id).unwrap();
        ProjectRoom::assign(&conn, project_in.id, room.id).unwrap();
        ProjectRoom::assign(&conn, project_out.id, other_room.id).unwrap();

        let cookie = session_cookie(&conn, judge.id);
        let res: (u16, Vec<AssignedTeam>) = test_get("/api/judging/teams", Some(cookie)).await;

        assert_eq!(res.0, 200);
        assert_eq!(res.1.len(), 1);
        assert_eq!(res.1[0].registration_id, application_in.id);
        assert_eq!(res.1[0].team_name, "Inside");
        assert_eq!(res.1[0].scored, false);

        for room_id in &[room.id, other_room.id] {
            diesel::delete(rooms::table.filter(rooms::id.eq(*room_id)))
                .execute(&conn)
                .unwrap();
        }
        for email in &[
            "visible-lead-in@example.com",
            "visible-lead-out@example.com",
            "visible-judge@example.com",
        ] {
            diesel::delete(users::table.filter(users::email.eq(*email)))
                .execute(&conn)
                .unwrap();
        }
    }

    // The whole path a team takes before a judge can score it: registration,
    // admin approval, room setup, assignment, then the judging list.
    #[actix_rt::test]
    async fn test_registration_through_judging_flow() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let admin = User::create(
            &conn,
            "Admin",
            "flow-admin@example.com",
            "password123",
            Role::Admin,
        )
        .unwrap();
        let admin_cookie = session_cookie(&conn, admin.id);

        let res: (u16, UserDetails) = test_post(
            "/api/auth/register",
            json!({
                "name": "Flow Lead",
                "email": "flow-lead@example.com",
                "password": "password123",
                "team": { "team_name": "Flow Crew" }
            }),
            None,
        )
        .await;
        assert_eq!(res.0, 200);
        let lead_id = res.1.id;

        let res: (u16, UserDetails) = test_post(
            "/api/auth/register",
            json!({
                "name": "Flow Judge",
                "email": "flow-judge@example.com",
                "password": "password123",
                "role": "judge"
            }),
            None,
        )
        .await;
        assert_eq!(res.0, 200);
        let judge_id = res.1.id;
        let judge_cookie = session_cookie(&conn, judge_id);

        let application = Application::latest_for_user(&conn, lead_id).unwrap().unwrap();
        assert_eq!(application.status, "pending");

        // nothing visible before the room wiring exists
        let res: (u16, Vec<AssignedTeam>) =
            test_get("/api/judging/teams", Some(judge_cookie.clone())).await;
        assert_eq!(res.0, 200);
        assert!(res.1.is_empty());

        let res: (u16, serde_json::Value) = test_post(
            &format!("/api/admin/applications/{}/status", application.id),
            StatusRequest {
                status: "approved".to_string(),
            },
            Some(admin_cookie.clone()),
        )
        .await;
        assert_eq!(res.0, 200);

        let project = Project::save_members(&conn, lead_id, &json!([])).unwrap();
        let room = Room::create(&conn, "Flow Room").unwrap();

        let res: (u16, ()) = test_post(
            &format!("/api/admin/rooms/{}/users", room.id),
            AssignUserRequest { user_id: judge_id },
            Some(admin_cookie.clone()),
        )
        .await;
        assert_eq!(res.0, 200);

        let res: (u16, ()) = test_post(
            &format!("/api/admin/rooms/{}/projects", room.id),
            AssignProjectRequest {
                project_id: project.id,
            },
            Some(admin_cookie),
        )
        .await;
        assert_eq!(res.0, 200);

        let res: (u16, Vec<AssignedTeam>) =
            test_get("/api/judging/teams", Some(judge_cookie.clone())).await;
        assert_eq!(res.0, 200);
        assert_eq!(res.1.len(), 1);
        assert_eq!(res.1[0].team_name, "Flow Crew");
        assert!(!res.1[0].scored);

        let res: (u16, ScoreResponse) = test_post(
            &format!("/api/judging/teams/{}/score", application.id),
            ScoreParams {
                influence: 15,
                creativity: 14,
                validity: 13,
                relevance: 12,
                presentation: 11,
                confirm: true,
            },
            Some(judge_cookie.clone()),
        )
        .await;
        assert_eq!(res.0, 200);

        let res: (u16, Vec<AssignedTeam>) =
            test_get("/api/judging/teams", Some(judge_cookie)).await;
        assert!(res.1[0].scored);

        diesel::delete(rooms::table.filter(rooms::id.eq(room.id)))
            .execute(&conn)
            .unwrap();
        for email in &[
            "flow-lead@example.com",
            "flow-judge@example.com",
            "flow-admin@example.com",
        ] {
            diesel::delete(users::table.filter(users::email.eq(*email)))
                .execute(&conn)
                .unwrap();
        }
    }

    #[actix_rt::test]
    async fn test_scored_flag_tracks_this_judge() {
        let pool = new_pool();
        let conn = get_conn(&pool).unwrap();

        let judge = User::create(
            &conn,
            "Judge",
            "scored-judge@example.com",
            "password123",
            Role::Judge,
        )
        .unwrap();
        let other_judge = User::create(
            &conn,
            "Other Judge",
            "scored-other-judge@example.com",
            "password123",
            Role::Judge,
        )
        .unwrap();
        let lead = User::create(
            &conn,
            "Lead",
            "scored-lead@example.com",
            "password123",
            Role::Participant,
        )
        .unwrap();

        let application =
            Application::create(&conn, lead.id, &json!({ "team_name": "Crew" })).unwrap();
        let project = Project::save_members(&conn, lead.id, &json!([])).unwrap();
        let room = Room::create(&conn, "Score Room").unwrap();
        RoomUser::assign(&conn, judge.id, room.id).unwrap();
        RoomUser::assign(&conn, other_judge.id, room.id).unwrap();
        ProjectRoom::assign(&conn, project.id, room.id).unwrap();

        // only the other judge has scored
        Score::upsert(
            &conn,
            other_judge.id,
            application.id,
            &ScoreValues {
                influence: 10,
                creativity: 10,
                validity: 10,
                relevance: 10,
                presentation: 10,
            },
        )
        .unwrap();

        let cookie = session_cookie(&conn, judge.id);
        let res: (u16, Vec<AssignedTeam>) = test_get("/api/judging/teams", Some(cookie)).await;
        assert_eq!(res.0, 200);
        assert_eq!(res.1[0].scored, false);

        let cookie = session_cookie(&conn, other_judge.id);
        let res: (u16, Vec<AssignedTeam>) = test_get("/api/judging/teams", Some(cookie)).await;
        assert_eq!(res.0, 200);
        assert_eq!(res.1[0].scored, true);

        diesel::delete(rooms::table.filter(rooms::id.eq(room.id)))
            .execute(&conn)
            .unwrap();
        for email in &[
            "scored-lead@example.com",
            "scored-other-judge@example.com",
            "scored-judge@example.com",
        ] {
            diesel::delete(users::table.filter(users::email.eq(*email)))
                .execute(&conn)
                .unwrap();
        }
    }
}
