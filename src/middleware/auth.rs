use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

pub use crate::services::auth_service::Claims;
use crate::services::auth_service::CredentialService;
use crate::utils::AppError;

/// Resolves the caller's identity from the `Authorization` header.
///
/// Accepts `Bearer <token>` (scheme matched case-insensitively) as well as a
/// bare token. Missing and invalid credentials are both `Unauthorized`.
pub fn authorize(headers: &HeaderMap, credentials: &CredentialService) -> Result<Claims, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("unauthorized Access".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("unauthorized access".to_string()))?
        .trim();
    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => value,
    };
    if token.is_empty() {
        return Err(AppError::Unauthorized("unauthorized Access".to_string()));
    }

    credentials.verify_token(token)
}

/// Rejects requests without a valid token; otherwise stores the `Claims` in the
/// request extensions for `web::ReqData<Claims>` extractors.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let credentials = match req.app_data::<web::Data<CredentialService>>() {
            Some(credentials) => credentials.clone(),
            None => {
                return Box::pin(async move {
                    Err(AppError::Internal("CredentialService is not registered".to_string()).into())
                })
            }
        };

        match authorize(req.headers(), &credentials) {
            Ok(claims) => {
                log::debug!("🔓 {} {} as {}", req.method(), req.path(), claims.email);
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            Err(e) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                Box::pin(async move { Err(e.into()) })
            }
        }
    }
}
