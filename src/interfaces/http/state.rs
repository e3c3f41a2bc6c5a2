//! Shared handler state

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;

use super::modules::metrics::MetricsState;
use super::view::{JsonViewRenderer, ViewRenderer};
use crate::application::{CommentService, ListingSettings, RestaurantService};
use crate::domain::RepositoryProvider;

#[derive(Clone)]
pub struct AppState {
    pub restaurants: Arc<RestaurantService>,
    pub comments: Arc<CommentService>,
    pub repos: Arc<dyn RepositoryProvider>,
    pub views: Arc<dyn ViewRenderer>,
    pub metrics: MetricsState,
    pub started_at: Instant,
}

impl AppState {
    /// State with the JSON view renderer.
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        settings: ListingSettings,
        metrics: PrometheusHandle,
    ) -> Self {
        Self {
            restaurants: Arc::new(RestaurantService::new(repos.clone(), settings)),
            comments: Arc::new(CommentService::new(repos.clone())),
            repos,
            views: Arc::new(JsonViewRenderer),
            metrics: MetricsState { handle: metrics },
            started_at: Instant::now(),
        }
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        s.metrics.clone()
    }
}
