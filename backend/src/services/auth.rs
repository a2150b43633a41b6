//! Authentication service for registration, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Department, User, UserRole};
use crate::services::user::{password_strength, NewUser, UserService};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    token_expiry: i64,
}

/// Self-registration input. The role is assigned by the server.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom = "password_strength")]
    pub password: String,
    pub department: Department,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token plus the signed-in account
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    password_hash: String,
    is_active: bool,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            token_expiry: config.jwt.token_expiry,
        }
    }

    /// Register an account. The first account on a fresh install becomes admin.
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthResponse> {
        input.validate()?;

        let users = UserService::new(self.db.clone());
        let role = if users.count().await? == 0 {
            UserRole::Admin
        } else {
            UserRole::Viewer
        };

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = users
            .insert(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
                role,
                department: input.department,
                avatar: String::new(),
                is_active: true,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Account registered");
        self.issue(user)
    }

    /// Authenticate user with email and password
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthResponse> {
        input.validate()?;

        let credentials = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, password_hash, is_active FROM users WHERE email = $1",
        )
        .bind(input.email.trim().to_lowercase())
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(&input.password, &credentials.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        if !credentials.is_active {
            return Err(AppError::Unauthorized("Account is deactivated".to_string()));
        }

        // Update last login
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(credentials.id)
            .execute(&self.db)
            .await?;

        let user = UserService::new(self.db.clone()).get(credentials.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        self.issue(user)
    }

    /// Validate access token and return claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
    }

    fn issue(&self, user: User) -> AppResult<AuthResponse> {
        let token = self.generate_token(&user)?;
        Ok(AuthResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_expiry,
            user,
        })
    }

    fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            permissions: user
                .permissions
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Permission, UserPreferences};
    use sqlx::postgres::PgPoolOptions;

    fn service(expiry: i64) -> AuthService {
        // Lazy pool never connects in these tests
        let db = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        AuthService {
            db,
            jwt_secret: "test-secret".to_string(),
            token_expiry: expiry,
        }
    }

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Rajesh Kumar".to_string(),
            email: "rajesh@example.com".to_string(),
            role: UserRole::Manager,
            department: Department::Procurement,
            avatar: String::new(),
            is_active: true,
            last_login: None,
            permissions: UserRole::Manager.default_permissions(),
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_token_round_trip_carries_permissions() {
        let service = service(3600);
        let user = user();
        let token = service.generate_token(&user).unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, "manager");
        assert!(claims
            .permissions
            .contains(&Permission::ManageOrders.as_str().to_string()));
    }

    #[test]
    fn test_register_password_rule() {
        let input = |password: &str| RegisterInput {
            name: "Vikram Joshi".to_string(),
            email: "vikram@example.com".to_string(),
            password: password.to_string(),
            department: Department::Inventory,
        };
        assert!(input("monsoon").validate().is_ok());
        let err = AppError::from(input("12345").validate().unwrap_err());
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "password"));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let service = service(-3600);
        let token = service.generate_token(&user()).unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn test_wrong_secret() {
        let token = service(3600).generate_token(&user()).unwrap();
        let mut other = service(3600);
        other.jwt_secret = "another-secret".to_string();
        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::InvalidToken)
        ));
    }
}
