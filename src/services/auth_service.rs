use crate::entities::{Role, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 150;

pub fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(AppError::ValidationError(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AppError::ValidationError(
            "Username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
    clock: SharedClock,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService, clock: SharedClock) -> Self {
        Self {
            pool,
            jwt_service,
            clock,
        }
    }

    pub async fn register_customer(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        self.register(request, Role::Customer).await
    }

    pub async fn register_owner(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        self.register(request, Role::Owner).await
    }

    async fn register(&self, request: RegisterRequest, role: Role) -> AppResult<AuthResponse> {
        let username = request.username.trim().to_string();
        validate_username(&username)?;
        validate_password(&request.password)?;

        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(username.as_str()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Username already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;

        let user = users::ActiveModel {
            username: Set(username),
            email: Set(request.email.trim().to_string()),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(self.clock.now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::ValidationError("Username already exists".to_string())
            } else {
                AppError::DatabaseError(e)
            }
        })?;

        log::info!("Registered {} account {} ({})", user.role, user.id, user.username);
        self.issue_tokens(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(request.username.trim()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid username or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            log::warn!("Failed login for user {}", user.id);
            return Err(AppError::AuthError(
                "Invalid username or password".to_string(),
            ));
        }

        self.issue_tokens(user)
    }

    /// Exchanges a refresh token for a fresh token pair. The role is read
    /// back from storage rather than trusted from the old claims.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("User no longer exists".to_string()))?;

        self.issue_tokens(user)
    }

    fn issue_tokens(&self, user: users::Model) -> AppResult<AuthResponse> {
        let access_token = self.jwt_service.generate_access_token(user.id, user.role)?;
        let refresh_token = self.jwt_service.generate_refresh_token(user.id, user.role)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
