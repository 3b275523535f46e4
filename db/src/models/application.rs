use chrono::{DateTime, Utc};
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use errors::Error;

use crate::schema::{participant_applications, users};

#[derive(Debug, Queryable, Identifiable, Serialize, Deserialize)]
#[table_name = "participant_applications"]
pub struct Application {
    pub id: i32,
    pub user_id: i32,
    pub data: Option<String>,
    pub final_score: Option<f64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "participant_applications"]
pub struct NewApplication {
    pub user_id: i32,
    pub data: Option<String>,
}

/// Admin listing row: application joined to its applicant.
#[derive(Debug, Deserialize, Serialize, Queryable)]
pub struct ApplicationSummary {
    pub id: i32,
    pub user_id: i32,
    pub applicant_name: String,
    pub applicant_email: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Application {
    pub fn create(
        connection: &PgConnection,
        user_id: i32,
        data: &Value,
    ) -> Result<Application, Error> {
        let application = diesel::insert_into(participant_applications::table)
            .values(NewApplication {
                user_id,
                data: Some(data.to_string()),
            })
            .get_result(connection)?;

        Ok(application)
    }

    pub fn find(connection: &PgConnection, application_id: i32) -> Result<Application, Error> {
        use crate::schema::participant_applications::dsl::participant_applications as applications_table;

        let application = applications_table
            .find(application_id)
            .first::<Application>(connection)?;

        Ok(application)
    }

    /// The schema allows several applications per user; application logic
    /// always takes the newest one.
    pub fn latest_for_user(
        connection: &PgConnection,
        user_id: i32,
    ) -> Result<Option<Application>, Error> {
        use crate::schema::participant_applications::dsl::{
            id, participant_applications as applications_table, user_id as user_id_field,
        };

        let application = applications_table
            .filter(user_id_field.eq(user_id))
            .order(id.desc())
            .first::<Application>(connection)
            .optional()?;

        Ok(application)
    }

    pub fn set_status(
        connection: &PgConnection,
        application_id: i32,
        status: &str,
    ) -> Result<Application, Error> {
        use crate::schema::participant_applications::dsl::{
            participant_applications as applications_table, status as status_field,
            updated_at as updated_at_field,
        };

        let application = diesel::update(applications_table.find(application_id))
            .set((status_field.eq(status), updated_at_field.eq(Utc::now())))
            .get_result(connection)?;

        Ok(application)
    }

    pub fn list(connection: &PgConnection) -> Result<Vec<ApplicationSummary>, Error> {
        use crate::schema::participant_applications::dsl::{
            created_at, id, participant_applications as applications_table, status,
            user_id as user_id_field,
        };

        let results = applications_table
            .inner_join(users::table)
            .select((
                id,
                user_id_field,
                users::name,
                users::email,
                status,
                created_at,
            ))
            .order(id.desc())
            .load::<ApplicationSummary>(connection)?;

        Ok(results)
    }

    /// Aggregation on read: average per-judge total for the application. The
    /// final_score column exists in the schema but is never maintained.
    pub fn aggregate_score(
        connection: &PgConnection,
        application_id: i32,
    ) -> Result<(usize, Option<f64>), Error> {
        use crate::schema::scores::dsl::{
            application_id as application_id_field, creativity, influence, presentation,
            relevance, scores as scores_table, validity,
        };

        let rows = scores_table
            .filter(application_id_field.eq(application_id))
            .select((influence, creativity, validity, relevance, presentation))
            .load::<(i32, i32, i32, i32, i32)>(connection)?;

        if rows.is_empty() {
            return Ok((0, None));
        }

        let total: i32 = rows.iter().map(|(i, c, v, r, p)| i + c + v + r + p).sum();
        let average = f64::from(total) / rows.len() as f64;

        Ok((rows.len(), Some(average)))
    }

    /// The data blob is semi-structured; a missing or unparseable value
    /// degrades to an empty object.
    pub fn data_value(&self) -> Value {
        self.data
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_else(|| Value::Object(Default::default()))
    }
}
