//! User repository implementation backed by SeaORM.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt, RequestContext};
use domain::{NewUser, User, UserFilters, UserPatch, MAX_OFFSET};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every call is a single store operation run under the request context.
/// Store errors are forwarded unchanged; nothing is retried.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; id and timestamps are assigned here
    async fn create(&self, ctx: &RequestContext, user: NewUser) -> AppResult<User>;

    /// Point lookup, `NotFound` when no row has this id
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<User>;

    /// Filtered page of users, newest first
    async fn get_all(
        &self,
        ctx: &RequestContext,
        filters: &UserFilters,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<User>>;

    /// Write the present fields of the patch.
    ///
    /// An empty patch performs no write. A write that matches no row is
    /// `NotFound`.
    async fn update(&self, ctx: &RequestContext, patch: &UserPatch) -> AppResult<()>;

    /// Delete by id, `NotFound` when the statement removed nothing
    async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<()>;

    /// Number of users matching the filters, ignoring any paging
    async fn count(&self, ctx: &RequestContext, filters: &UserFilters) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, ctx: &RequestContext, user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            phone: Set(user.phone),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = ctx
            .run(async { active_model.insert(&self.db).await.map_err(AppError::from) })
            .await?;

        tracing::info!(user_id = %model.id, "User created");
        Ok(User::from(model))
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<User> {
        let model = ctx
            .run(async {
                UserEntity::find_by_id(id.to_string())
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        model.map(User::from).ok_or_not_found(id)
    }

    async fn get_all(
        &self,
        ctx: &RequestContext,
        filters: &UserFilters,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<User>> {
        let query = apply_filters(UserEntity::find(), filters)
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .offset(offset.min(MAX_OFFSET))
            .limit(limit.min(MAX_OFFSET));

        let models = ctx
            .run(async { query.all(&self.db).await.map_err(AppError::from) })
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn update(&self, ctx: &RequestContext, patch: &UserPatch) -> AppResult<()> {
        if !patch.has_changes() {
            tracing::debug!(user_id = %patch.id, "Empty patch, nothing to write");
            return Ok(());
        }

        let mut query = UserEntity::update_many();
        if let Some(first_name) = &patch.first_name {
            query = query.col_expr(user::Column::FirstName, Expr::value(first_name.clone()));
        }
        if let Some(last_name) = &patch.last_name {
            query = query.col_expr(user::Column::LastName, Expr::value(last_name.clone()));
        }
        if let Some(email) = &patch.email {
            query = query.col_expr(user::Column::Email, Expr::value(email.clone()));
        }
        if let Some(phone) = &patch.phone {
            query = query.col_expr(user::Column::Phone, Expr::value(phone.clone()));
        }
        let query = query
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(patch.id.as_str()));

        let result = ctx
            .run(async { query.exec(&self.db).await.map_err(AppError::from) })
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(patch.id.as_str()));
        }

        tracing::info!(user_id = %patch.id, "User updated");
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        let result = ctx
            .run(async {
                UserEntity::delete_by_id(id.to_string())
                    .exec(&self.db)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(id));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn count(&self, ctx: &RequestContext, filters: &UserFilters) -> AppResult<u64> {
        let query = apply_filters(UserEntity::find(), filters);

        ctx.run(async { query.count(&self.db).await.map_err(AppError::from) })
            .await
    }
}

/// Case-insensitive "contains" predicates for the present name filters.
fn apply_filters<Q: QueryFilter>(mut query: Q, filters: &UserFilters) -> Q {
    if let Some(first_name) = &filters.first_name {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col(user::Column::FirstName)))
                .like(contains_pattern(first_name)),
        );
    }
    if let Some(last_name) = &filters.last_name {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col(user::Column::LastName)))
                .like(contains_pattern(last_name)),
        );
    }
    query
}

/// `%value%` over the lowercased value
fn contains_pattern(value: &str) -> String {
    format!("%{}%", value.to_lowercase())
}
