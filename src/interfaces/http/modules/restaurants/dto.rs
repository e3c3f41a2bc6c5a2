//! Restaurant view DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::RestaurantQuery;
use crate::domain::{RankedRestaurant, RestaurantProfile};

/// Query string of the listing page. Values arrive as raw strings so that
/// junk falls back to defaults instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListRestaurantsParams {
    /// Page number, 1-based. Missing, zero or non-numeric means 1.
    #[param(value_type = Option<u64>)]
    pub page: Option<String>,
    /// Category filter. Missing, zero or non-numeric means all categories.
    #[param(value_type = Option<i32>)]
    pub category_id: Option<String>,
}

impl ListRestaurantsParams {
    pub fn to_query(&self) -> RestaurantQuery {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);
        let category_id = self
            .category_id
            .as_deref()
            .and_then(|c| c.trim().parse::<i32>().ok())
            .filter(|c| *c > 0);
        RestaurantQuery { page, category_id }
    }
}

/// Data of the `dashboard` view
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardView {
    pub restaurant: RestaurantProfile,
}

/// Data of the `topRestaurant` view
#[derive(Debug, Serialize, ToSchema)]
pub struct TopRestaurantsView {
    pub restaurants: Vec<RankedRestaurant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, category_id: Option<&str>) -> ListRestaurantsParams {
        ListRestaurantsParams {
            page: page.map(String::from),
            category_id: category_id.map(String::from),
        }
    }

    #[test]
    fn junk_page_falls_back_to_first() {
        for raw in [None, Some(""), Some("0"), Some("abc"), Some("-2")] {
            assert_eq!(params(raw, None).to_query().page, 1, "page={:?}", raw);
        }
        assert_eq!(params(Some(" 7 "), None).to_query().page, 7);
    }

    #[test]
    fn zero_or_junk_category_means_unfiltered() {
        for raw in [None, Some("0"), Some("x"), Some("-1")] {
            assert_eq!(params(None, raw).to_query().category_id, None);
        }
        assert_eq!(params(None, Some("3")).to_query().category_id, Some(3));
    }
}
