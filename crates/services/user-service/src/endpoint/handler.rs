//! Dispatch of [`UserRequest`]s to the user service.

use std::sync::Arc;

use common::{AppError, AppResult, Envelope, PaginationConfig, RequestContext};
use domain::{Pagination, UserPatch, ERR_ID_REQUIRED};

use super::requests::{CreateRequest, DeleteRequest, GetAllRequest, GetRequest, UserRequest};
use crate::service::UserService;

const MSG_CREATED: &str = "Success";
const MSG_FETCHED: &str = "successful user fetch";
const MSG_UPDATED: &str = "User updated successfully";
const MSG_DELETED: &str = "User deleted successfully";

/// Endpoint set for the user resource.
#[derive(Clone)]
pub struct Endpoints {
    service: Arc<dyn UserService>,
    pagination: PaginationConfig,
}

impl Endpoints {
    pub fn new(service: Arc<dyn UserService>, pagination: PaginationConfig) -> Self {
        Self {
            service,
            pagination,
        }
    }

    /// Run one request to completion and classify its outcome.
    pub async fn handle(&self, ctx: &RequestContext, request: UserRequest) -> Envelope {
        let operation = request.name();

        let result = match request {
            UserRequest::Create(req) => self.create(ctx, req).await,
            UserRequest::Get(req) => self.get(ctx, req).await,
            UserRequest::GetAll(req) => self.get_all(ctx, req).await,
            UserRequest::Update(req) => self.update(ctx, req).await,
            UserRequest::Delete(req) => self.delete(ctx, req).await,
        };

        match result {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(operation, code = err.code(), error = %err, "Request failed");
                Envelope::from_error(&err)
            }
        }
    }

    async fn create(&self, ctx: &RequestContext, req: CreateRequest) -> AppResult<Envelope> {
        let user = self.service.create(ctx, req.into()).await?;
        Envelope::created(MSG_CREATED, &user)
    }

    async fn get(&self, ctx: &RequestContext, req: GetRequest) -> AppResult<Envelope> {
        let id = required_id(&req.id)?;
        let user = self.service.get_by_id(ctx, id).await?;
        Envelope::ok(MSG_FETCHED, &user, None)
    }

    async fn get_all(&self, ctx: &RequestContext, req: GetAllRequest) -> AppResult<Envelope> {
        let filters = req.filters();

        let total = self.service.count(ctx, &filters).await?;
        let meta = Pagination::new(total, req.page, req.limit, &self.pagination.default_limit)?;
        let users = self
            .service
            .get_all(ctx, &filters, meta.offset(), meta.limit())
            .await?;

        Envelope::ok(MSG_FETCHED, &users, Some(meta))
    }

    async fn update(&self, ctx: &RequestContext, req: UserPatch) -> AppResult<Envelope> {
        let patch = self.service.update(ctx, req).await?;
        Envelope::ok(MSG_UPDATED, &patch, None)
    }

    async fn delete(&self, ctx: &RequestContext, req: DeleteRequest) -> AppResult<Envelope> {
        let id = required_id(&req.id)?;
        let deleted = self.service.delete(ctx, id).await?;
        Envelope::ok(MSG_DELETED, &deleted, None)
    }
}

fn required_id(id: &str) -> AppResult<&str> {
    if id.trim().is_empty() {
        return Err(AppError::bad_request(ERR_ID_REQUIRED));
    }
    Ok(id)
}
