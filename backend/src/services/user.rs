//! User account management

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::{Department, User, UserPreferences, UserRole};
use crate::services::parse_column;

pub(crate) const USER_COLUMNS: &str = r#"
    id, name, email, role, department, avatar, is_active, last_login,
    permissions, preferences, created_at, updated_at
"#;

/// User service for account administration
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    department: String,
    avatar: String,
    is_active: bool,
    last_login: Option<DateTime<Utc>>,
    permissions: Vec<String>,
    preferences: Json<UserPreferences>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let permissions = row
            .permissions
            .iter()
            .map(|p| parse_column("users.permissions", p))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            role: parse_column("users.role", &row.role)?,
            department: parse_column("users.department", &row.department)?,
            avatar: row.avatar,
            is_active: row.is_active,
            last_login: row.last_login,
            permissions,
            preferences: row.preferences.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(crate) fn password_strength(password: &str) -> Result<(), ValidationError> {
    shared::validate_password(password).map_err(|message| {
        let mut error = ValidationError::new("password");
        error.message = Some(message.into());
        error
    })
}

/// Input for creating a user as an administrator
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom = "password_strength")]
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    pub department: Department,
    pub avatar: Option<String>,
    pub is_active: Option<bool>,
}

/// Input for updating a user. The password is not changed here.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub department: Option<Department>,
    pub avatar: Option<String>,
    pub is_active: Option<bool>,
    pub preferences: Option<UserPreferences>,
}

/// Fields needed to insert an account row
pub(crate) struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub department: Department,
    pub avatar: String,
    pub is_active: bool,
}

fn permission_names(role: UserRole) -> Vec<String> {
    role.default_permissions()
        .iter()
        .map(|p| p.as_str().to_string())
        .collect()
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY created_at",
            USER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    pub async fn get(&self, user_id: Uuid) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        User::try_from(row)
    }

    pub async fn create(&self, input: CreateUserInput) -> AppResult<User> {
        input.validate()?;

        let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        self.insert(NewUser {
            name: input.name,
            email: input.email,
            password_hash,
            role: input.role,
            department: input.department,
            avatar: input.avatar.unwrap_or_default(),
            is_active: input.is_active.unwrap_or(true),
        })
        .await
    }

    pub(crate) async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let email = new_user.email.trim().to_lowercase();
        self.ensure_email_free(&email, None).await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, department, avatar,
                               is_active, permissions, preferences)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&email)
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(new_user.department.as_str())
        .bind(&new_user.avatar)
        .bind(new_user.is_active)
        .bind(permission_names(new_user.role))
        .bind(Json(UserPreferences::default()))
        .fetch_one(&self.db)
        .await?;

        let user = User::try_from(row)?;
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "User created");
        Ok(user)
    }

    /// Partial update; a role change also resets the permission set
    pub async fn update(&self, user_id: Uuid, input: UpdateUserInput) -> AppResult<User> {
        input.validate()?;

        let mut user = self.get(user_id).await?;

        if let Some(email) = input.email {
            let email = email.trim().to_lowercase();
            self.ensure_email_free(&email, Some(user_id)).await?;
            user.email = email;
        }
        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(role) = input.role {
            if role != user.role {
                user.permissions = role.default_permissions();
            }
            user.role = role;
        }
        if let Some(department) = input.department {
            user.department = department;
        }
        if let Some(avatar) = input.avatar {
            user.avatar = avatar;
        }
        if let Some(is_active) = input.is_active {
            user.is_active = is_active;
        }
        if let Some(preferences) = input.preferences {
            user.preferences = preferences;
        }

        let permissions: Vec<String> = user
            .permissions
            .iter()
            .map(|p| p.as_str().to_string())
            .collect();

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = $2, email = $3, role = $4, department = $5, avatar = $6,
                is_active = $7, permissions = $8, preferences = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(user.department.as_str())
        .bind(&user.avatar)
        .bind(user.is_active)
        .bind(permissions)
        .bind(Json(&user.preferences))
        .fetch_one(&self.db)
        .await?;

        tracing::info!(user_id = %user_id, "User updated");
        User::try_from(row)
    }

    pub(crate) async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    async fn ensure_email_free(&self, email: &str, except: Option<Uuid>) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(except)
        .fetch_one(&self.db)
        .await?;

        if taken {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_names_follow_role() {
        assert_eq!(permission_names(UserRole::Viewer), vec!["view_dashboard"]);
        assert_eq!(permission_names(UserRole::Admin).len(), 8);
    }

    #[test]
    fn test_create_input_validation() {
        let input = CreateUserInput {
            name: "Priya Sharma".to_string(),
            email: "priya@example.com".to_string(),
            password: "short".to_string(),
            role: UserRole::Operator,
            department: Department::Logistics,
            avatar: None,
            is_active: None,
        };
        let err = AppError::from(input.validate().unwrap_err());
        assert!(matches!(
            err,
            AppError::Validation { ref field, ref message }
                if field == "password" && message == "Password must be at least 6 characters"
        ));
    }
}
