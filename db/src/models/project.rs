use chrono::{DateTime, Utc};
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use errors::Error;

use crate::schema::projects;

/// One project per participant. `team_data` holds the
/// `{"members": [...], "project_meta": {...}}` payload as JSON text.
#[derive(Debug, Queryable, Identifiable, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub participant_id: i32,
    pub title: String,
    pub description: String,
    pub team_data: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "projects"]
pub struct NewProject {
    pub participant_id: i32,
    pub title: String,
    pub description: String,
    pub team_data: Option<String>,
}

impl Project {
    pub fn find_by_participant(
        connection: &PgConnection,
        user_id: i32,
    ) -> Result<Option<Project>, Error> {
        use crate::schema::projects::dsl::{
            participant_id as participant_id_field, projects as projects_table,
        };

        let project = projects_table
            .filter(participant_id_field.eq(user_id))
            .first::<Project>(connection)
            .optional()?;

        Ok(project)
    }

    /// Replaces the roster while keeping whatever project_meta is already
    /// stored.
    pub fn save_members(
        connection: &PgConnection,
        user_id: i32,
        members: &Value,
    ) -> Result<Project, Error> {
        let existing = Project::find_by_participant(connection, user_id)?;
        let meta = existing
            .as_ref()
            .map(|project| project.meta())
            .unwrap_or_else(|| json!({}));

        let payload = json!({ "members": members, "project_meta": meta });

        match existing {
            Some(project) => {
                use crate::schema::projects::dsl::{
                    projects as projects_table, team_data, updated_at,
                };

                let project = diesel::update(projects_table.find(project.id))
                    .set((
                        team_data.eq(Some(payload.to_string())),
                        updated_at.eq(Utc::now()),
                    ))
                    .get_result(connection)?;

                Ok(project)
            }
            None => {
                let project = diesel::insert_into(projects::table)
                    .values(NewProject {
                        participant_id: user_id,
                        title: "".to_string(),
                        description: "".to_string(),
                        team_data: Some(payload.to_string()),
                    })
                    .get_result(connection)?;

                Ok(project)
            }
        }
    }

    /// Saves title/description and the project_meta block, keeping the
    /// existing members list.
    pub fn save_details(
        connection: &PgConnection,
        user_id: i32,
        title: &str,
        description: &str,
        meta: &Value,
    ) -> Result<Project, Error> {
        let existing = Project::find_by_participant(connection, user_id)?;
        let members = existing
            .as_ref()
            .map(|project| project.members())
            .unwrap_or_else(|| json!([]));

        let payload = json!({ "members": members, "project_meta": meta });

        match existing {
            Some(project) => {
                use crate::schema::projects::dsl::{
                    description as description_field, projects as projects_table, team_data,
                    title as title_field, updated_at,
                };

                let project = diesel::update(projects_table.find(project.id))
                    .set((
                        title_field.eq(title),
                        description_field.eq(description),
                        team_data.eq(Some(payload.to_string())),
                        updated_at.eq(Utc::now()),
                    ))
                    .get_result(connection)?;

                Ok(project)
            }
            None => {
                let project = diesel::insert_into(projects::table)
                    .values(NewProject {
                        participant_id: user_id,
                        title: title.to_string(),
                        description: description.to_string(),
                        team_data: Some(payload.to_string()),
                    })
                    .get_result(connection)?;

                Ok(project)
            }
        }
    }

    pub fn payload(&self) -> Value {
        self.team_data
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_else(|| json!({}))
    }

    pub fn members(&self) -> Value {
        self.payload()
            .get("members")
            .cloned()
            .unwrap_or_else(|| json!([]))
    }

    pub fn meta(&self) -> Value {
        self.payload()
            .get("project_meta")
            .cloned()
            .unwrap_or_else(|| json!({}))
    }
}
