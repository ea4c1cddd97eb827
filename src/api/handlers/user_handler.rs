//! User handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateUser, UpdateUser, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, Created, NoContent};

const EMAIL_TAKEN: &str = "The email has already been taken.";

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
}

/// Reject an email already held by a different user.
async fn ensure_email_available(state: &AppState, email: &str, owner: Option<i32>) -> AppResult<()> {
    match state.user_service.get_user_by_email(email).await? {
        Some(existing) if Some(existing.id) != owner => Err(AppError::validation("email", EMAIL_TAKEN)),
        _ => Ok(()),
    }
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.user_service.get_all_users().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed JSON"),
        (status = 409, description = "Email taken by a concurrent request"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<Created<UserResponse>> {
    ensure_email_available(&state, &payload.email, None).await?;

    let user = state.user_service.create_user(payload).await?;
    Ok(Created(UserResponse::from(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Update user (partial)
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email taken by a concurrent request"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    if let Some(ref email) = payload.email {
        ensure_email_available(&state, email, Some(id)).await?;
    }

    let user = state.user_service.update_user(id, payload).await?;
    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        "User updated",
    )))
}

/// Delete user. Declared for route completeness; deletion is not supported
/// and nothing is mutated.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "No-op")
    )
)]
pub async fn delete_user(Path(id): Path<i32>) -> NoContent {
    tracing::debug!(user_id = id, "Ignoring delete request");
    NoContent
}
