//! User service - Handles user-related business logic.
//!
//! Validation lives here; everything else is forwarded to the repository.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, RequestContext};
use domain::{NewUser, User, UserFilters, UserPatch};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and persist a new user
    async fn create(&self, ctx: &RequestContext, user: NewUser) -> AppResult<User>;

    /// Apply the present fields of the patch, returning the patch as submitted
    async fn update(&self, ctx: &RequestContext, patch: UserPatch) -> AppResult<UserPatch>;

    /// Delete a user, returning the deleted id
    async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<String>;

    /// Get user by ID
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<User>;

    /// Filtered page of users, newest first
    async fn get_all(
        &self,
        ctx: &RequestContext,
        filters: &UserFilters,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<User>>;

    /// Number of users matching the filters
    async fn count(&self, ctx: &RequestContext, filters: &UserFilters) -> AppResult<u64>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create(&self, ctx: &RequestContext, user: NewUser) -> AppResult<User> {
        if let Err(e) = user.validate() {
            tracing::debug!(error = %e, "Rejected user creation");
            return Err(e.into());
        }

        self.repo.create(ctx, user).await
    }

    async fn update(&self, ctx: &RequestContext, patch: UserPatch) -> AppResult<UserPatch> {
        patch.validate()?;

        self.repo.update(ctx, &patch).await?;
        Ok(patch)
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<String> {
        self.repo.delete(ctx, id).await?;
        Ok(id.to_string())
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<User> {
        self.repo.get_by_id(ctx, id).await
    }

    async fn get_all(
        &self,
        ctx: &RequestContext,
        filters: &UserFilters,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<User>> {
        self.repo.get_all(ctx, filters, offset, limit).await
    }

    async fn count(&self, ctx: &RequestContext, filters: &UserFilters) -> AppResult<u64> {
        self.repo.count(ctx, filters).await
    }
}
