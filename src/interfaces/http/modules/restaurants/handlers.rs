//! Restaurant page handlers
//!
//! Each handler delegates to `RestaurantService` and hands the result to
//! the configured `ViewRenderer`.

use axum::{
    extract::{Path, Query, State},
    response::Response,
};

use super::dto::{DashboardView, ListRestaurantsParams, TopRestaurantsView};
use crate::application::{Feed, RestaurantListing};
use crate::domain::RestaurantDetail;
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::middleware::Viewer;
use crate::interfaces::http::state::AppState;
use crate::interfaces::http::view::{render_view, views};

#[utoipa::path(
    get,
    path = "/restaurants",
    tag = "Restaurants",
    params(ListRestaurantsParams),
    responses(
        (status = 200, description = "`restaurants` view", body = RestaurantListing)
    )
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(params): Query<ListRestaurantsParams>,
) -> Result<Response, ApiError> {
    let listing = state
        .restaurants
        .list_restaurants(params.to_query(), &viewer.relations)
        .await?;
    render_view(state.views.as_ref(), views::RESTAURANTS, &listing)
}

#[utoipa::path(
    get,
    path = "/restaurants/feeds",
    tag = "Restaurants",
    responses(
        (status = 200, description = "`feeds` view", body = Feed)
    )
)]
pub async fn get_feeds(State(state): State<AppState>) -> Result<Response, ApiError> {
    let feed = state.restaurants.get_feeds().await?;
    render_view(state.views.as_ref(), views::FEEDS, &feed)
}

#[utoipa::path(
    get,
    path = "/restaurants/top",
    tag = "Restaurants",
    responses(
        (status = 200, description = "`topRestaurant` view", body = TopRestaurantsView)
    )
)]
pub async fn get_top_restaurants(
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<Response, ApiError> {
    let restaurants = state
        .restaurants
        .get_top_restaurants(&viewer.relations)
        .await?;
    render_view(
        state.views.as_ref(),
        views::TOP_RESTAURANT,
        &TopRestaurantsView { restaurants },
    )
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    tag = "Restaurants",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "`restaurant` view", body = RestaurantDetail),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let detail = state
        .restaurants
        .get_restaurant(id, &viewer.relations)
        .await?;
    render_view(state.views.as_ref(), views::RESTAURANT, &detail)
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}/dashboard",
    tag = "Restaurants",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "`dashboard` view", body = DashboardView),
        (status = 404, description = "Not found", body = ApiResponse<String>)
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let restaurant = state.restaurants.get_dashboard(id).await?;
    render_view(
        state.views.as_ref(),
        views::DASHBOARD,
        &DashboardView { restaurant },
    )
}
