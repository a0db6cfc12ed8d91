use axum::{
    Json,
    extract::{OriginalUri, Path, RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::error::FoodgramError;
use crate::handlers::pagination::{PageQuery, Paginated};
use crate::handlers::response::{CreatedUserResponse, UserResponse};
use crate::handlers::{json_body, parse_query, path_id, required};
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteAvatarUseCase, GetUserUseCase, ListUsersUseCase,
    SetAvatarUseCase, SetPasswordUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Deserialize)]
pub struct AvatarRequest {
    pub avatar: Option<String>,
}

#[derive(Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Paginated<UserResponse>>, FoodgramError> {
    let query: PageQuery = parse_query(raw_query)?;
    let page = query.to_request(state.page_size);
    let uc = ListUsersUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let users = uc.execute(identity.map(|i| i.user_id), page).await?;
    let users = users.map(|view| UserResponse::from_view(view, &state));
    Ok(Json(Paginated::new(users, page, &state.public_url, &uri)))
}

// ── POST /api/users ──────────────────────────────────────────────────────────

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), FoodgramError> {
    let body = json_body(body)?;
    let input = CreateUserInput {
        email: required("email", body.email)?,
        username: required("username", body.username)?,
        first_name: required("first_name", body.first_name)?,
        last_name: required("last_name", body.last_name)?,
        password: required("password", body.password)?,
    };
    let uc = CreateUserUseCase {
        users: state.user_repo(),
    };
    let user = uc.execute(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let id = path_id(&id, FoodgramError::UserNotFound)?;
    let uc = GetUserUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let view = uc.execute(identity.map(|i| i.user_id), id).await?;
    Ok(Json(UserResponse::from_view(view, &state)))
}

// ── GET /api/users/me ────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let view = uc
        .execute(Some(identity.user_id), identity.user_id)
        .await
        .map_err(|e| match e {
            FoodgramError::UserNotFound => FoodgramError::Unauthorized,
            other => other,
        })?;
    Ok(Json(UserResponse::from_view(view, &state)))
}

// ── POST /api/users/set_password ─────────────────────────────────────────────

pub async fn set_password(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<SetPasswordRequest>, JsonRejection>,
) -> Result<StatusCode, FoodgramError> {
    let body = json_body(body)?;
    let current = required("current_password", body.current_password)?;
    let new = required("new_password", body.new_password)?;
    let uc = SetPasswordUseCase {
        users: state.user_repo(),
    };
    uc.execute(identity.user_id, &current, &new).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /api/users/me/avatar ─────────────────────────────────────────────────

pub async fn set_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<AvatarRequest>, JsonRejection>,
) -> Result<Json<AvatarResponse>, FoodgramError> {
    let avatar = required("avatar", json_body(body)?.avatar)?;
    let uc = SetAvatarUseCase {
        users: state.user_repo(),
        images: state.image_store(),
    };
    let path = uc.execute(identity.user_id, &avatar).await?;
    Ok(Json(AvatarResponse {
        avatar: state.media_url(&path),
    }))
}

// ── DELETE /api/users/me/avatar ──────────────────────────────────────────────

pub async fn delete_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, FoodgramError> {
    let uc = DeleteAvatarUseCase {
        users: state.user_repo(),
        images: state.image_store(),
    };
    uc.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
