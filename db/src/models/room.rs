use chrono::{DateTime, Utc};
use diesel::result::{DatabaseErrorKind, Error as DBError};
use diesel::{
    BoolExpressionMethods, ExpressionMethods, JoinOnDsl, NullableExpressionMethods,
    OptionalExtension, PgConnection, QueryDsl, RunQueryDsl,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use errors::Error;

use crate::schema::{participant_applications, project_rooms, projects, room_users, rooms, scores};

#[derive(Debug, Queryable, Identifiable, Serialize, Deserialize)]
pub struct Room {
    pub id: i32,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "rooms"]
pub struct NewRoom {
    pub name: String,
}

#[derive(Debug, Queryable, Identifiable, Serialize, Deserialize)]
pub struct RoomUser {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "room_users"]
pub struct NewRoomUser {
    pub user_id: i32,
    pub room_id: i32,
}

#[derive(Debug, Queryable, Identifiable, Serialize, Deserialize)]
pub struct ProjectRoom {
    pub id: i32,
    pub project_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "project_rooms"]
pub struct NewProjectRoom {
    pub project_id: i32,
    pub room_id: i32,
}

/// A team as seen from a judge's room assignments.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct AssignedTeam {
    pub registration_id: i32,
    pub project_id: i32,
    pub team_name: String,
    pub scored: bool,
}

impl Room {
    pub fn create(connection: &PgConnection, name: &str) -> Result<Room, Error> {
        let room = diesel::insert_into(rooms::table)
            .values(NewRoom {
                name: name.to_string(),
            })
            .get_result(connection)?;

        Ok(room)
    }

    pub fn list(connection: &PgConnection) -> Result<Vec<Room>, Error> {
        use crate::schema::rooms::dsl::{id, rooms as rooms_table};

        let results = rooms_table.order(id.asc()).load::<Room>(connection)?;

        Ok(results)
    }
}

impl RoomUser {
    /// Duplicate assignments are simply ignored.
    pub fn assign(connection: &PgConnection, user_id: i32, room_id: i32) -> Result<(), Error> {
        diesel::insert_into(room_users::table)
            .values(NewRoomUser { user_id, room_id })
            .on_conflict((room_users::user_id, room_users::room_id))
            .do_nothing()
            .execute(connection)?;

        Ok(())
    }
}

impl ProjectRoom {
    /// A project lives in at most one room. Re-assigning to the same room is
    /// a no-op; a different room is rejected with a user-facing message. The
    /// unique constraint stays authoritative for concurrent assigns, so a
    /// violation from a racing writer gets the same message.
    pub fn assign(connection: &PgConnection, project_id: i32, room_id: i32) -> Result<(), Error> {
        use crate::schema::project_rooms::dsl::{
            project_id as project_id_field, project_rooms as project_rooms_table,
        };

        let existing = project_rooms_table
            .filter(project_id_field.eq(project_id))
            .first::<ProjectRoom>(connection)
            .optional()?;

        if let Some(assignment) = existing {
            if assignment.room_id == room_id {
                return Ok(());
            }
            return Err(Error::BadRequest(
                "Project is already assigned to a room".to_string(),
            ));
        }

        let result = diesel::insert_into(project_rooms::table)
            .values(NewProjectRoom {
                project_id,
                room_id,
            })
            .execute(connection);

        match result {
            Ok(_) => Ok(()),
            Err(DBError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Err(
                Error::BadRequest("Project is already assigned to a room".to_string()),
            ),
            Err(err) => Err(err.into()),
        }
    }

    pub fn unassign(connection: &PgConnection, project_id: i32, room_id: i32) -> Result<(), Error> {
        use crate::schema::project_rooms::dsl::{
            project_id as project_id_field, project_rooms as project_rooms_table,
            room_id as room_id_field,
        };

        diesel::delete(
            project_rooms_table
                .filter(project_id_field.eq(project_id))
                .filter(room_id_field.eq(room_id)),
        )
        .execute(connection)?;

        Ok(())
    }

    /// Teams visible to a judge/volunteer: room membership -> project_rooms
    /// -> projects -> applications, with a flag for whether this judge has
    /// already scored each one.
    pub fn assigned_teams(
        connection: &PgConnection,
        judge_id: i32,
    ) -> Result<Vec<AssignedTeam>, Error> {
        let rows = room_users::table
            .inner_join(
                project_rooms::table.on(project_rooms::room_id.eq(room_users::room_id)),
            )
            .inner_join(projects::table.on(projects::id.eq(project_rooms::project_id)))
            .inner_join(
                participant_applications::table
                    .on(participant_applications::user_id.eq(projects::participant_id)),
            )
            .left_join(
                scores::table.on(scores::application_id
                    .eq(participant_applications::id)
                    .and(scores::judge_id.eq(room_users::user_id))),
            )
            .filter(room_users::user_id.eq(judge_id))
            .select((
                participant_applications::id,
                projects::id,
                participant_applications::data,
                scores::id.nullable(),
            ))
            .distinct()
            .order(participant_applications::id.desc())
            .load::<(i32, i32, Option<String>, Option<i32>)>(connection)?;

        Ok(rows
            .into_iter()
            .map(|(registration_id, project_id, data, score_id)| AssignedTeam {
                registration_id,
                project_id,
                team_name: team_name_from_data(data.as_deref()),
                scored: score_id.is_some(),
            })
            .collect())
    }

    /// Scoping check used before showing or scoring a team.
    pub fn is_assigned_to(
        connection: &PgConnection,
        judge_id: i32,
        registration_id: i32,
    ) -> Result<bool, Error> {
        let row = room_users::table
            .inner_join(
                project_rooms::table.on(project_rooms::room_id.eq(room_users::room_id)),
            )
            .inner_join(projects::table.on(projects::id.eq(project_rooms::project_id)))
            .inner_join(
                participant_applications::table
                    .on(participant_applications::user_id.eq(projects::participant_id)),
            )
            .filter(room_users::user_id.eq(judge_id))
            .filter(participant_applications::id.eq(registration_id))
            .select(participant_applications::id)
            .first::<i32>(connection)
            .optional()?;

        Ok(row.is_some())
    }
}

fn team_name_from_data(data: Option<&str>) -> String {
    data.and_then(|raw| serde_json::from_str::<Value>(raw).ok())
        .and_then(|value| {
            value
                .get("team_name")
                .and_then(|name| name.as_str())
                .map(|name| name.to_string())
        })
        .unwrap_or_else(|| "—".to_string())
}
