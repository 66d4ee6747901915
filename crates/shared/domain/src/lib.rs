//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user record, its create/patch shapes, list filters and the
//! pagination contract used by list endpoints.

pub mod constants;
pub mod error;
pub mod pagination;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use pagination::{Pagination, MAX_OFFSET};
pub use user::{NewUser, User, UserFilters, UserPatch};
