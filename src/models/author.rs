//! Author model and request types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Author record.
///
/// The book side of the relationship is authoritative, so authors carry no
/// serialized back-reference to books; that direction is derived by query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

/// Create author request (POST). The id is never accepted from the client.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[serde(rename = "firstName")]
    #[validate(length(min = 1, max = 25, message = "First name must be 1-25 characters"))]
    pub first_name: String,
    #[serde(rename = "lastName")]
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
}

/// Full replace request (PUT) - the target id travels in the body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReplaceAuthor {
    pub id: i32,
    #[serde(rename = "firstName")]
    #[validate(length(min = 1, max = 25, message = "First name must be 1-25 characters"))]
    pub first_name: String,
    #[serde(rename = "lastName")]
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
}

/// Partial update request (PATCH) - absent fields keep their stored value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PatchAuthor {
    #[serde(rename = "firstName")]
    #[validate(length(min = 1, max = 25, message = "First name must be 1-25 characters"))]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: Option<String>,
}
