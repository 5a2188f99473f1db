use crate::entities::{Role, user_entity as users};
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The authenticated principal of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }

    /// Returns the owner's user id, or `Unauthorized` for customers.
    pub fn require_owner(&self) -> AppResult<i64> {
        match self.role {
            Role::Owner => Ok(self.user_id),
            Role::Customer => Err(AppError::Unauthorized(
                "Owner privileges required".to_string(),
            )),
        }
    }

    /// Returns the customer's user id, or `Unauthorized` for owners.
    pub fn require_customer(&self) -> AppResult<i64> {
        match self.role {
            Role::Customer => Ok(self.user_id),
            Role::Owner => Err(AppError::Unauthorized(
                "Customer access only".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ravi")]
    pub username: String,
    #[schema(example = "ravi@example.com")]
    pub email: String,
    #[schema(example = "dabba-pass-123")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ravi")]
    pub username: String,
    #[schema(example = "dabba-pass-123")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(m: users::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            role: m.role,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}
