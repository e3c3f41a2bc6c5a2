//! HTTP interface
//!
//! - `common`: response envelope, `ApiError`, `ValidatedForm`
//! - `middleware`: current-user resolution from `X-User-Id`
//! - `modules`: handlers per feature
//! - `view`: `ViewRenderer` and the JSON renderer
//! - `router`: routes, layers and Swagger UI

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod view;

pub use router::{create_app_router, ApiDoc};
pub use state::AppState;
pub use view::{JsonViewRenderer, ViewRenderer};
