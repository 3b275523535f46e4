use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{err, ok, Ready};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use errors::Error;

mod password;
mod signer;

pub use crate::password::{hash_password, verify_password};
pub use crate::signer::CookieSigner;

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_DAYS: i64 = 7;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Participant,
    Admin,
    Judge,
    Volunteer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Participant => "participant",
            Role::Admin => "admin",
            Role::Judge => "judge",
            Role::Volunteer => "volunteer",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "participant" => Some(Role::Participant),
            "admin" => Some(Role::Admin),
            "judge" => Some(Role::Judge),
            "volunteer" => Some(Role::Volunteer),
            _ => None,
        }
    }
}

/// The user a session token resolved to. Inserted into request extensions by
/// the server's auth middleware, read back by handlers through `FromRequest`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CurrentUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ok(user.clone()),
            None => err(Error::AuthRequired),
        }
    }
}

/// 256-bit random session token, hex encoded. Uniqueness is enforced by the
/// sessions table constraint; with this much entropy a collision is fatal by
/// policy rather than handled.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
