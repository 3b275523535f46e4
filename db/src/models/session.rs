use chrono::{DateTime, Duration, Utc};
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use auth::{generate_session_token, CurrentUser, Role, SESSION_DAYS};
use errors::Error;

use crate::schema::{sessions, users};

#[derive(Debug, Queryable, Identifiable, Serialize, Deserialize)]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "sessions"]
pub struct NewSession {
    pub user_id: i32,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Persists a fresh token valid for SESSION_DAYS. Multiple concurrent
    /// sessions per user are fine; each login gets its own row.
    pub fn create(connection: &PgConnection, user_id: i32) -> Result<String, Error> {
        let token = generate_session_token();
        let expires_at = Utc::now() + Duration::days(SESSION_DAYS);

        diesel::insert_into(sessions::table)
            .values(NewSession {
                user_id,
                token: token.clone(),
                expires_at,
            })
            .execute(connection)?;

        Ok(token)
    }

    /// Looks the token up joined to its user, filtered to non-expired rows.
    /// Expired rows are left in place and simply stop resolving; the expiry
    /// is not extended on use.
    pub fn resolve(connection: &PgConnection, token: &str) -> Result<Option<CurrentUser>, Error> {
        use crate::schema::sessions::dsl::{
            expires_at, sessions as sessions_table, token as token_field,
        };

        let row = sessions_table
            .inner_join(users::table)
            .filter(token_field.eq(token))
            .filter(expires_at.gt(Utc::now()))
            .select((users::id, users::name, users::email, users::role))
            .first::<(i32, String, String, String)>(connection)
            .optional()?;

        Ok(row.and_then(|(id, name, email, role)| {
            Role::parse(&role).map(|role| CurrentUser {
                id,
                name,
                email,
                role,
            })
        }))
    }

    /// No-op when the token is already gone.
    pub fn destroy(connection: &PgConnection, token: &str) -> Result<(), Error> {
        use crate::schema::sessions::dsl::{sessions as sessions_table, token as token_field};

        diesel::delete(sessions_table.filter(token_field.eq(token))).execute(connection)?;

        Ok(())
    }
}
