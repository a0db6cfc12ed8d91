use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::types::RecipeRelation;

/// Foodgram service error variants.
#[derive(Debug, thiserror::Error)]
pub enum FoodgramError {
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("cannot subscribe to yourself")]
    SelfSubscription,
    #[error("already subscribed to {0}")]
    AlreadySubscribed(String),
    #[error("subscription not found")]
    NotSubscribed,
    #[error("recipe \"{name}\" is already in {relation}")]
    AlreadyRelated {
        relation: RecipeRelation,
        name: String,
    },
    #[error("recipe is not in {0}")]
    NotRelated(RecipeRelation),
    #[error("wrong password")]
    WrongPassword,
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("invalid query parameters")]
    InvalidQuery,
    #[error("authentication required")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FoodgramError {
    /// Field-level validation error.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::AlreadySubscribed(_) => "ALREADY_SUBSCRIBED",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::AlreadyRelated {
                relation: RecipeRelation::Favorite,
                ..
            } => "ALREADY_FAVORITED",
            Self::AlreadyRelated {
                relation: RecipeRelation::ShoppingCart,
                ..
            } => "ALREADY_IN_SHOPPING_CART",
            Self::NotRelated(RecipeRelation::Favorite) => "NOT_FAVORITED",
            Self::NotRelated(RecipeRelation::ShoppingCart) => "NOT_IN_SHOPPING_CART",
            Self::WrongPassword => "WRONG_PASSWORD",
            Self::Validation { .. } => "VALIDATION",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Request field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::WrongPassword => Some("current_password"),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound => StatusCode::NOT_FOUND,
            Self::SelfSubscription
            | Self::AlreadySubscribed(_)
            | Self::NotSubscribed
            | Self::AlreadyRelated { .. }
            | Self::NotRelated(_)
            | Self::WrongPassword
            | Self::Validation { .. }
            | Self::InvalidQuery => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FoodgramError {
    fn into_response(self) -> Response {
        let status = self.status();
        // TraceLayer already records every response status; only 500s carry detail worth logging.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Some(field) = self.field() {
            body["field"] = serde_json::Value::from(field);
        }
        (status, axum::Json(body)).into_response()
    }
}
