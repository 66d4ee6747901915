//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Returned when a user is created without a first name
pub const ERR_FIRST_NAME_REQUIRED: &str = "first name is required";

/// Returned when a user is created without a last name
pub const ERR_LAST_NAME_REQUIRED: &str = "last name is required";

/// Returned when a patch carries an empty or blank identifier
pub const ERR_ID_REQUIRED: &str = "user id cannot be empty";

// =============================================================================
// Pagination
// =============================================================================

/// First page of a listing (pages are 1-based)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Page size used when `PAGINATION_PER_PAGE_DEFAULT` is not configured
pub const DEFAULT_PER_PAGE: &str = "10";
