//! OpenAPI documentation.

use utoipa::OpenApi;

use common::Envelope;
use domain::{Pagination, User, UserPatch};
use user_service_lib::endpoint::CreateRequest;

use crate::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            CreateRequest,
            UserPatch,
            User,
            Pagination,
            Envelope,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
