//! Authentication and permission middleware
//!
//! A single static admin token (from [`Config::admin_token`]) grants the
//! `catalog:manage` permission. Requests presenting it get a [`CurrentUser`]
//! injected into the request extensions; mutating routes then gate on
//! [`require_permission`]. When no admin token is configured, auth is
//! disabled and every request runs as an unrestricted local operator.
//!
//! [`Config::admin_token`]: crate::core::Config

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use crate::utils::AppError;

/// Authenticated caller, injected into request extensions by [`require_auth`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub name: String,
    pub permissions: Vec<String>,
}

impl CurrentUser {
    /// Unrestricted operator used when auth is disabled
    pub fn local_operator() -> Self {
        Self {
            name: "local".into(),
            permissions: vec!["all".into()],
        }
    }

    /// Admin token holder
    pub fn admin() -> Self {
        Self {
            name: "admin".into(),
            permissions: vec!["catalog:manage".into()],
        }
    }

    /// Check a `resource:action` permission. `all` and `resource:*`
    /// wildcards are honored.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| {
            if p == "all" || p == permission {
                return true;
            }
            match (p.split_once(':'), permission.split_once(':')) {
                (Some((resource, "*")), Some((wanted, _))) => resource == wanted,
                _ => false,
            }
        })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").map(str::trim)
}

/// Authentication middleware.
///
/// Skips OPTIONS (CORS preflight) and non-`/api/` paths. With no admin
/// token configured, every request passes as the local operator.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !req.uri().path().starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let Some(expected) = &state.config.admin_token else {
        req.extensions_mut().insert(CurrentUser::local_operator());
        return Ok(next.run(req).await);
    };

    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer);

    match token {
        Some(token) if token == expected => {
            req.extensions_mut().insert(CurrentUser::admin());
            Ok(next.run(req).await)
        }
        Some(_) => {
            tracing::warn!(uri = %req.uri(), "rejected invalid admin token");
            Err(AppError::not_authenticated())
        }
        None => {
            // Unauthenticated read access stays open; mutating routes are
            // still gated by require_permission
            Ok(next.run(req).await)
        }
    }
}

/// Permission check middleware factory.
///
/// ```ignore
/// Router::new()
///     .route("/api/items", post(handler::create))
///     .layer(middleware::from_fn(require_permission("catalog:manage")));
/// ```
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;

            if !user.has_permission(permission) {
                tracing::warn!(
                    user = %user.name,
                    required = permission,
                    "permission denied"
                );
                return Err(AppError::permission_denied(format!(
                    "Permission denied: {permission}"
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_permission_matches() {
        let user = CurrentUser::admin();
        assert!(user.has_permission("catalog:manage"));
        assert!(!user.has_permission("catalog:delete"));
        assert!(!user.has_permission("users:manage"));
    }

    #[test]
    fn all_wildcard_grants_everything() {
        let user = CurrentUser::local_operator();
        assert!(user.has_permission("catalog:manage"));
        assert!(user.has_permission("anything:at-all"));
    }

    #[test]
    fn resource_wildcard_matches_actions() {
        let user = CurrentUser {
            name: "t".into(),
            permissions: vec!["catalog:*".into()],
        };
        assert!(user.has_permission("catalog:manage"));
        assert!(!user.has_permission("orders:manage"));
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer("Basic abc"), None);
    }
}
