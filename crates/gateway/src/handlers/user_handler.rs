//! User handlers.
//!
//! Each handler decodes the HTTP request into a [`UserRequest`], runs it
//! through the endpoint layer under a fresh request context and returns the
//! resulting envelope as-is.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::Envelope;
use domain::UserPatch;
use user_service_lib::endpoint::{
    CreateRequest, DeleteRequest, GetAllRequest, GetRequest, UpdateRequest, UserRequest,
};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// List query. Numeric values that do not parse are treated as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Case-insensitive substring of the first name
    pub first_name: Option<String>,
    /// Case-insensitive substring of the last name
    pub last_name: Option<String>,
    /// Page size, configured default when absent or below 1
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// 1-based page number
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
}

impl From<ListUsersQuery> for GetAllRequest {
    fn from(query: ListUsersQuery) -> Self {
        GetAllRequest {
            first_name: query.first_name,
            last_name: query.last_name,
            limit: lenient_int(query.limit.as_deref()),
            page: lenient_int(query.page.as_deref()),
        }
    }
}

fn lenient_int(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Create user routes.
///
/// `/users/` has an empty id segment and is routed to the id handlers so it
/// gets the blank-id answer rather than the collection.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(list_users).post(create_user).patch(update_user),
        )
        .route("/users/", get(get_user).delete(delete_user))
        .route("/users/:id", get(get_user).delete(delete_user))
}

/// Id path segment; absent on `/users/`
fn path_id(id: Option<Path<String>>) -> String {
    id.map(|Path(id)| id).unwrap_or_default()
}

async fn dispatch(state: &AppState, request: UserRequest) -> Envelope {
    let ctx = state.request_context();
    // Cancels in-flight store calls if the client goes away.
    let _guard = ctx.drop_guard();

    state.endpoints.handle(&ctx, request).await
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateRequest,
    responses(
        (status = 201, description = "User created", body = Envelope),
        (status = 400, description = "Missing name or malformed JSON", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateRequest>,
) -> Envelope {
    dispatch(&state, UserRequest::Create(req)).await
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = Envelope),
        (status = 400, description = "Blank id", body = Envelope),
        (status = 404, description = "User not found", body = Envelope)
    )
)]
pub async fn get_user(State(state): State<AppState>, id: Option<Path<String>>) -> Envelope {
    let id = path_id(id);
    dispatch(&state, UserRequest::Get(GetRequest { id })).await
}

/// List users with filters and pagination
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users with pagination metadata", body = Envelope),
        (status = 500, description = "Store failure or invalid page size default", body = Envelope)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Envelope {
    dispatch(&state, UserRequest::GetAll(query.into())).await
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/users",
    tag = "Users",
    request_body = UserPatch,
    responses(
        (status = 200, description = "Patch applied, echoed back", body = Envelope),
        (status = 400, description = "Blank id or malformed JSON", body = Envelope),
        (status = 404, description = "User not found", body = Envelope)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateRequest>,
) -> Envelope {
    dispatch(&state, UserRequest::Update(req)).await
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted, id returned", body = Envelope),
        (status = 400, description = "Blank id", body = Envelope),
        (status = 404, description = "User not found", body = Envelope)
    )
)]
pub async fn delete_user(State(state): State<AppState>, id: Option<Path<String>>) -> Envelope {
    let id = path_id(id);
    dispatch(&state, UserRequest::Delete(DeleteRequest { id })).await
}
