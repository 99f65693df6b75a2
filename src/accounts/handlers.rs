use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    accounts::{
        dto::{
            Ack, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest,
            UpdateProfileRequest, UpdatedResponse, UserSummary,
        },
        jwt::{AuthUser, JwtKeys},
        password,
        repo_types::{Role, User},
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user/:user_id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/me", get(me))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// A field is missing when absent or blank after trimming.
fn require(field: &Option<String>, message: &str) -> Result<String, AppError> {
    match field {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(AppError::Validation(message.to_string())),
    }
}

fn parse_role(value: Option<&str>) -> Result<Option<Role>, AppError> {
    value.map(str::parse).transpose()
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Ack>), AppError> {
    const REQUIRED: &str = "Username, email, password, and phone number are required.";

    let username = require(&payload.username, REQUIRED)?;
    let email = require(&payload.email, REQUIRED)?.trim().to_lowercase();
    let password = require(&payload.password, REQUIRED)?;
    let phone_number = require(&payload.phone_number, REQUIRED)?;

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email.".into()));
    }
    let role = parse_role(payload.role.as_deref())?.unwrap_or_default();

    let hash = password::hash_password(&password)?;

    // Duplicate email/username surfaces as a conflict from the insert itself.
    let user = User::create(&state.db, &username, &email, &hash, &phone_number, role).await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(Ack::ok("User registered successfully.")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    const REQUIRED: &str = "Email and password are required.";

    let email = require(&payload.email, REQUIRED)?.trim().to_lowercase();
    let password = require(&payload.password, REQUIRED)?;

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(AppError::NotFound("User not found.".into()));
        }
    };

    if !password::verify_password(&password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.username)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful.".into(),
        token,
        user: UserSummary {
            username: user.username,
            role: user.role,
        },
    }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: user.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UpdatedResponse>, AppError> {
    const REQUIRED: &str = "Username and email are required.";

    let username = require(&payload.username, REQUIRED)?;
    let email = require(&payload.email, REQUIRED)?.trim().to_lowercase();

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email.".into()));
    }
    let role = parse_role(payload.role.as_deref())?;
    let phone_number = payload
        .phone_number
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let user = User::update(&state.db, user_id, &username, &email, phone_number, role)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(UpdatedResponse {
        success: true,
        message: "User updated successfully.".into(),
        user: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Ack>, AppError> {
    if !User::delete(&state.db, user_id).await? {
        return Err(AppError::NotFound("User not found.".into()));
    }

    info!(user_id = %user_id, "user deleted");
    Ok(Json(Ack::ok("User deleted successfully.")))
}

#[instrument(skip(state, claims))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found.".into()))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: user.into(),
    }))
}
