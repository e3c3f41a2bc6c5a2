//! Category domain entity

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Restaurant category (cuisine), used by the listing filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
