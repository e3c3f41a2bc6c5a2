//! Site router with Swagger UI

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::middleware::current_user_middleware;
use super::modules::{comments, health, metrics, restaurants};
use super::state::AppState;
use crate::application::{Feed, RestaurantListing};
use crate::domain::RestaurantDetail;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        metrics::prometheus_metrics,
        // Restaurants
        restaurants::list_restaurants,
        restaurants::get_feeds,
        restaurants::get_top_restaurants,
        restaurants::get_restaurant,
        restaurants::get_dashboard,
        // Comments
        comments::post_comment,
    ),
    components(
        schemas(
            ApiResponse<String>,
            RestaurantListing,
            RestaurantDetail,
            Feed,
            restaurants::DashboardView,
            restaurants::TopRestaurantsView,
            comments::CommentForm,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and Prometheus metrics"),
        (name = "Restaurants", description = "Restaurant listing, detail, feed, dashboard and ranking views"),
        (name = "Comments", description = "Posting review comments"),
    ),
    info(
        title = "Restaurant Review Service",
        version = "0.1.0",
        description = "Browse restaurants by category, read and post comments, see the most favorited places"
    )
)]
pub struct ApiDoc;

/// Create the router with all routes
pub fn create_app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let site_routes = Router::new()
        .route("/restaurants", get(restaurants::list_restaurants))
        .route("/restaurants/feeds", get(restaurants::get_feeds))
        .route("/restaurants/top", get(restaurants::get_top_restaurants))
        .route("/restaurants/{id}", get(restaurants::get_restaurant))
        .route("/restaurants/{id}/dashboard", get(restaurants::get_dashboard))
        .route("/comments", post(comments::post_comment))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            current_user_middleware,
        ));

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .merge(site_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
