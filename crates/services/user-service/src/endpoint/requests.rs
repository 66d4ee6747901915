//! Request shapes accepted by the endpoint layer.

use serde::Deserialize;

use domain::{NewUser, UserFilters, UserPatch};

/// Create a user
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateRequest {
    /// Required, non-empty
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Ann"))]
    pub first_name: String,
    /// Required, non-empty
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Lee"))]
    pub last_name: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "ann@example.com"))]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<CreateRequest> for NewUser {
    fn from(req: CreateRequest) -> Self {
        NewUser::new(req.first_name, req.last_name, req.email, req.phone)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetRequest {
    pub id: String,
}

/// List users. Limits and pages below 1 fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct GetAllRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub limit: i64,
    pub page: i64,
}

impl GetAllRequest {
    pub fn filters(&self) -> UserFilters {
        UserFilters::new(self.first_name.clone(), self.last_name.clone())
    }
}

pub type UpdateRequest = UserPatch;

#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub id: String,
}

/// Every operation the endpoint layer serves.
#[derive(Debug, Clone)]
pub enum UserRequest {
    Create(CreateRequest),
    Get(GetRequest),
    GetAll(GetAllRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
}

impl UserRequest {
    /// Operation name for logs
    pub fn name(&self) -> &'static str {
        match self {
            UserRequest::Create(_) => "create",
            UserRequest::Get(_) => "get",
            UserRequest::GetAll(_) => "get_all",
            UserRequest::Update(_) => "update",
            UserRequest::Delete(_) => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_missing_names_decode_empty() {
        let req: CreateRequest = serde_json::from_str(r#"{"email": "a@b.com"}"#).unwrap();
        assert_eq!(req.first_name, "");
        assert_eq!(req.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_get_all_empty_names_are_unset() {
        let req = GetAllRequest {
            first_name: Some(String::new()),
            last_name: Some("lee".into()),
            ..Default::default()
        };
        let filters = req.filters();

        assert!(filters.first_name.is_none());
        assert_eq!(filters.last_name.as_deref(), Some("lee"));
    }
}
