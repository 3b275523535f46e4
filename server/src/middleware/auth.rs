use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web::{block, Data},
    Error, HttpMessage, HttpResponse,
};
use futures::{
    future::{ok, Ready},
    Future,
};

use auth::{CookieSigner, CurrentUser, Role, SESSION_COOKIE};
use db::{get_conn, models::Session, PgPool};
use errors::{Error as AppError, ErrorResponse};

/// Session gate for a scope. Unsigns the session cookie and resolves the
/// token against the sessions table; every failure along the way looks the
/// same to the client: a redirect to the login page. With roles configured,
/// an authenticated user outside the allow-list gets a 403 instead.
pub struct Auth {
    roles: Vec<Role>,
}

impl Auth {
    pub fn role(role: Role) -> Self {
        Auth { roles: vec![role] }
    }

    pub fn roles(roles: &[Role]) -> Self {
        Auth {
            roles: roles.to_vec(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Auth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddleware {
            service: Rc::new(service),
            roles: Rc::new(self.roles.clone()),
        })
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    roles: Rc<Vec<Role>>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let roles = Rc::clone(&self.roles);

        Box::pin(async move {
            let token = req.cookie(SESSION_COOKIE).and_then(|cookie| {
                let signer = req.app_data::<Data<CookieSigner>>()?;
                signer.unsign(cookie.value())
            });

            let user = match (token, req.app_data::<Data<PgPool>>().cloned()) {
                (Some(token), Some(pool)) => block(move || {
                    let conn = get_conn(&pool)?;
                    Session::resolve(&conn, &token)
                })
                .await
                .map_err(AppError::from)??,
                _ => None,
            };

            let user = match user {
                Some(user) => user,
                None => {
                    let response = HttpResponse::Found()
                        .append_header((header::LOCATION, "/login"))
                        .finish();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            if !roles.is_empty() && !roles.contains(&user.role) {
                let response =
                    HttpResponse::Forbidden().json(ErrorResponse::from("Forbidden"));
                return Ok(req.into_response(response).map_into_right_body());
            }

            req.extensions_mut().insert::<CurrentUser>(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
