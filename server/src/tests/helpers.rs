#[cfg(test)]
pub mod tests {
    use std::env;

    use actix_http::Request;
    use actix_web::{
        body::MessageBody,
        cookie::Cookie,
        dev::{Service, ServiceResponse},
        error::Error,
        test,
        web::Data,
        App,
    };
    use diesel::PgConnection;
    use serde::{de::DeserializeOwned, Serialize};
    use serde_json;

    use auth::{CookieSigner, SESSION_COOKIE};
    use db::models::Session;

    use crate::routes::routes;

    /// Same signer the service under test uses, so tests can mint cookies.
    pub fn signer() -> CookieSigner {
        CookieSigner::new(env::var("APP_SECRET").unwrap_or_else(|_| "test-secret".to_string()))
    }

    pub async fn get_service(
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
        test::init_service(
            App::new()
                .app_data(Data::new(db::new_pool()))
                .app_data(Data::new(signer()))
                .configure(routes),
        )
        .await
    }

    /// Logs a user in the direct way: a session row plus a signed cookie
    /// value for it.
    pub fn session_cookie(conn: &PgConnection, user_id: i32) -> String {
        let token = Session::create(conn, user_id).unwrap();
        signer().sign(&token)
    }

    /// Helper for HTTP GET integration tests
    pub async fn test_get<R>(route: &str, session: Option<String>) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let app = get_service().await;
        let mut req = test::TestRequest::get().uri(route);
        if let Some(session) = session {
            req = req.cookie(Cookie::new(SESSION_COOKIE, session));
        }

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;
        let json_body = serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                String::from_utf8(body.to_vec())
                    .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string()),
                status
            )
        });

        (status, json_body)
    }

    /// GET that only cares about the status code (redirects have no JSON
    /// body to read).
    pub async fn test_get_status(route: &str, session: Option<String>) -> u16 {
        let app = get_service().await;
        let mut req = test::TestRequest::get().uri(route);
        if let Some(session) = session {
            req = req.cookie(Cookie::new(SESSION_COOKIE, session));
        }

        let res = test::call_service(&app, req.to_request()).await;
        res.status().as_u16()
    }

    /// Helper for HTTP POST integration tests
    pub async fn test_post<T: Serialize, R>(
        route: &str,
        params: T,
        session: Option<String>,
    ) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let app = get_service().await;

        let mut req = test::TestRequest::post().set_json(&params).uri(route);
        if let Some(session) = session {
            req = req.cookie(Cookie::new(SESSION_COOKIE, session));
        }

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;
        let json_body = serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                String::from_utf8(body.to_vec())
                    .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string()),
                status
            )
        });

        (status, json_body)
    }

    /// Helper for HTTP DELETE integration tests
    pub async fn test_delete<R>(route: &str, session: Option<String>) -> (u16, R)
    where
        R: DeserializeOwned,
    {
        let app = get_service().await;
        let mut req = test::TestRequest::delete().uri(route);
        if let Some(session) = session {
            req = req.cookie(Cookie::new(SESSION_COOKIE, session));
        }

        let res = test::call_service(&app, req.to_request()).await;

        let status = res.status().as_u16();
        let body = test::read_body(res).await;
        let json_body = serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!(
                "read_response_json failed during deserialization. response: {} status: {}",
                String::from_utf8(body.to_vec())
                    .unwrap_or_else(|_| "Could not convert Bytes -> String".to_string()),
                status
            )
        });

        (status, json_body)
    }
}
