use crate::common::{ApiError, UserId};
use crate::domains::auth::{Actor, JwtService};
use crate::domains::users::UserRole;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds AuthUser to request extensions.
/// If no token or invalid token, request continues without AuthUser; handlers that
/// take `AuthUser` then reject it with 401.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!("Authenticated user: {} ({:?})", user.user_id, user.role);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    // Verify token
    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        user_id: claims.user_id,
        email: claims.email,
        role: claims.role,
    })
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret", "test_issuer".to_string())
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = service();
        let user_id = UserId::new();
        let token = jwt_service
            .create_token(user_id, "employer@example.com".to_string(), UserRole::Employer)
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.user_id, user_id);
        assert_eq!(auth_user.role, UserRole::Employer);
        assert_eq!(auth_user.actor(), Actor::new(user_id, UserRole::Employer));
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = service();
        let user_id = UserId::new();
        let token = jwt_service
            .create_token(user_id, "candidate@example.com".to_string(), UserRole::Candidate)
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert_eq!(auth_user.map(|u| u.user_id), Some(user_id));
    }

    #[test]
    fn test_no_auth_header() {
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &service()).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &service()).is_none());
    }

    #[test]
    fn test_token_from_other_issuer_rejected() {
        let other = JwtService::new("test_secret", "someone_else".to_string());
        let token = other
            .create_token(UserId::new(), "x@example.com".to_string(), UserRole::Admin)
            .unwrap();
        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &service()).is_none());
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_user() {
        let (mut parts, _) = axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_extractor_reads_extension() {
        let (mut parts, _) = axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts();
        let user_id = UserId::new();
        parts.extensions.insert(AuthUser {
            user_id,
            email: "c@example.com".to_string(),
            role: UserRole::Candidate,
        });

        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.user_id, user_id);
    }
}
