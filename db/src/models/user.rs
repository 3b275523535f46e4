use chrono::{DateTime, Utc};
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use auth::{hash_password, Role};
use errors::Error;

use crate::schema::users;

#[derive(Debug, Queryable, Identifiable, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// What gets serialized back to clients. Deliberately excludes the
/// password hash.
#[derive(Debug, Deserialize, Serialize)]
pub struct UserDetails {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl From<&User> for UserDetails {
    fn from(user: &User) -> Self {
        UserDetails {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            status: user.status.clone(),
        }
    }
}

impl User {
    pub fn create(
        connection: &PgConnection,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, Error> {
        let user = diesel::insert_into(users::table)
            .values(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password),
                role: role.as_str().to_string(),
            })
            .get_result(connection)?;

        Ok(user)
    }

    pub fn find(connection: &PgConnection, user_id: i32) -> Result<User, Error> {
        use crate::schema::users::dsl::users as users_table;

        let user = users_table.find(user_id).first::<User>(connection)?;

        Ok(user)
    }

    pub fn find_by_email(connection: &PgConnection, email: &str) -> Result<Option<User>, Error> {
        use crate::schema::users::dsl::{email as email_field, users as users_table};

        let user = users_table
            .filter(email_field.eq(email))
            .first::<User>(connection)
            .optional()?;

        Ok(user)
    }

    pub fn find_active_by_email(
        connection: &PgConnection,
        email: &str,
    ) -> Result<Option<User>, Error> {
        use crate::schema::users::dsl::{
            email as email_field, status as status_field, users as users_table,
        };

        let user = users_table
            .filter(email_field.eq(email))
            .filter(status_field.eq("active"))
            .first::<User>(connection)
            .optional()?;

        Ok(user)
    }
}
