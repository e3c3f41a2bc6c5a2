//! View rendering
//!
//! Read endpoints hand a named view and its data to a `ViewRenderer`.
//! `JsonViewRenderer` answers `{"view": <name>, "data": <mapping>}`;
//! an HTML template engine can be plugged in behind the same trait.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use super::common::ApiError;
use crate::shared::errors::InfraError;

/// View names understood by every renderer
pub mod views {
    pub const RESTAURANTS: &str = "restaurants";
    pub const RESTAURANT: &str = "restaurant";
    pub const FEEDS: &str = "feeds";
    pub const DASHBOARD: &str = "dashboard";
    pub const TOP_RESTAURANT: &str = "topRestaurant";
}

pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &str, data: Value) -> Response;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonViewRenderer;

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, view: &str, data: Value) -> Response {
        Json(json!({ "view": view, "data": data })).into_response()
    }
}

/// Serialize `data` and pass it to the renderer.
pub fn render_view<T: Serialize>(
    renderer: &dyn ViewRenderer,
    view: &str,
    data: &T,
) -> Result<Response, ApiError> {
    let value = serde_json::to_value(data).map_err(InfraError::from)?;
    Ok(renderer.render(view, value))
}
