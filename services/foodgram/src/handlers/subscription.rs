use axum::{
    Json,
    extract::{OriginalUri, Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::error::FoodgramError;
use crate::handlers::pagination::Paginated;
use crate::handlers::{parse_query, path_id};
use crate::handlers::response::AuthorResponse;
use crate::state::AppState;
use crate::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

#[derive(Deserialize, Default)]
pub struct SubscriptionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u64>,
}

// ── GET /api/users/subscriptions ─────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Paginated<AuthorResponse>>, FoodgramError> {
    let query: SubscriptionQuery = parse_query(raw_query)?;
    let page = PageRequest::new(query.page, query.limit, state.page_size);
    let uc = ListSubscriptionsUseCase {
        subscriptions: state.subscription_repo(),
        recipes: state.recipe_repo(),
    };
    let authors = uc
        .execute(identity.user_id, page, query.recipes_limit)
        .await?;
    let authors = authors.map(|view| AuthorResponse::new(view, &state));
    Ok(Json(Paginated::new(authors, page, &state.public_url, &uri)))
}

// ── POST /api/users/{id}/subscribe ───────────────────────────────────────────

pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<(StatusCode, Json<AuthorResponse>), FoodgramError> {
    let author_id = path_id(&author_id, FoodgramError::UserNotFound)?;
    let query: SubscriptionQuery = parse_query(raw_query)?;
    let uc = SubscribeUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
        recipes: state.recipe_repo(),
    };
    let view = uc
        .execute(identity.user_id, author_id, query.recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(AuthorResponse::new(view, &state))))
}

// ── DELETE /api/users/{id}/subscribe ─────────────────────────────────────────

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> Result<StatusCode, FoodgramError> {
    let author_id = path_id(&author_id, FoodgramError::UserNotFound)?;
    let uc = UnsubscribeUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    uc.execute(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
