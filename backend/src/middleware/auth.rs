//! Authentication middleware
//!
//! JWT authentication and permission checks for protected routes

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Permission, User, UserRole};
use crate::services::auth::Claims;
use crate::services::{AuthService, UserService};
use crate::AppState;

/// Authenticated user information extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub permissions: Vec<Permission>,
}

impl AuthUser {
    /// Check if user has a specific permission
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Permission guard for use in handlers
    pub fn require(&self, permission: Permission) -> AppResult<()> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            tracing::debug!(
                user_id = %self.user_id,
                role = self.role.as_str(),
                required = permission.as_str(),
                "Permission denied"
            );
            Err(AppError::InsufficientPermissions)
        }
    }
}

/// Reject accounts that can no longer sign in
pub fn ensure_active(user: &User) -> AppResult<()> {
    if user.is_active {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Account is deactivated".to_string()))
    }
}

impl AuthUser {
    /// Replace token claims with the stored account state.
    /// Role and permission changes apply on the next request.
    pub fn refresh(self, user: &User) -> AppResult<Self> {
        if user.id != self.user_id {
            return Err(AppError::InvalidToken);
        }
        ensure_active(user)?;
        Ok(Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            permissions: user.permissions.clone(),
        })
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;
        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(|_| AppError::InvalidToken)?;
        let permissions = claims
            .permissions
            .iter()
            .map(|p| p.parse::<Permission>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| AppError::InvalidToken)?;

        Ok(Self {
            user_id,
            email: claims.email,
            role,
            permissions,
        })
    }
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Some(token) => token.to_string(),
        None => {
            return AppError::Unauthorized("Missing or invalid Authorization header".to_string())
                .into_response()
        }
    };

    let auth_user = match authenticate(&state, &token).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

async fn authenticate(state: &AppState, token: &str) -> AppResult<AuthUser> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let claimed = AuthUser::try_from(auth_service.validate_token(token)?)?;

    let user = match UserService::new(state.db.clone()).get(claimed.user_id).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return Err(AppError::InvalidToken),
        Err(err) => return Err(err),
    };
    claimed.refresh(&user)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str, permissions: &[&str]) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            email: "ops@example.com".to_string(),
            role: role.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn test_claims_to_auth_user() {
        let user = AuthUser::try_from(claims("operator", &["view_dashboard", "manage_orders"]))
            .unwrap();
        assert_eq!(user.role, UserRole::Operator);
        assert!(user.require(Permission::ManageOrders).is_ok());
        assert!(matches!(
            user.require(Permission::ManageSuppliers),
            Err(AppError::InsufficientPermissions)
        ));
    }

    fn stored_user(id: Uuid, role: UserRole, is_active: bool) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            name: "Anita Desai".to_string(),
            email: "anita@example.com".to_string(),
            role,
            department: crate::models::Department::Operations,
            avatar: String::new(),
            is_active,
            last_login: None,
            permissions: role.default_permissions(),
            preferences: Default::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_refresh_applies_demotion() {
        let claimed = AuthUser::try_from(claims("manager", &["view_dashboard", "manage_orders"]))
            .unwrap();
        let stored = stored_user(claimed.user_id, UserRole::Viewer, true);

        let user = claimed.refresh(&stored).unwrap();
        assert_eq!(user.role, UserRole::Viewer);
        assert!(matches!(
            user.require(Permission::ManageOrders),
            Err(AppError::InsufficientPermissions)
        ));
        assert!(user.require(Permission::ViewDashboard).is_ok());
    }

    #[test]
    fn test_refresh_rejects_deactivated_account() {
        let claimed = AuthUser::try_from(claims("admin", &["system_admin"])).unwrap();
        let stored = stored_user(claimed.user_id, UserRole::Admin, false);
        assert!(matches!(
            claimed.refresh(&stored),
            Err(AppError::Unauthorized(ref msg)) if msg == "Account is deactivated"
        ));
    }

    #[test]
    fn test_deactivated_account_cannot_load_profile() {
        let id = Uuid::new_v4();
        assert!(ensure_active(&stored_user(id, UserRole::Operator, true)).is_ok());
        let response = ensure_active(&stored_user(id, UserRole::Operator, false))
            .unwrap_err()
            .into_response();
        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_refresh_rejects_other_account() {
        let claimed = AuthUser::try_from(claims("viewer", &[])).unwrap();
        let stored = stored_user(Uuid::new_v4(), UserRole::Viewer, true);
        assert!(matches!(claimed.refresh(&stored), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_unknown_permission_rejects_token() {
        let result = AuthUser::try_from(claims("viewer", &["launch_rockets"]));
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_bad_subject_rejects_token() {
        let mut bad = claims("viewer", &[]);
        bad.sub = "not-a-uuid".to_string();
        assert!(matches!(AuthUser::try_from(bad), Err(AppError::InvalidToken)));
    }
}
