//! Favorite ranking

use std::cmp::Reverse;

use super::model::RankedRestaurant;

/// The `n` most favorited restaurants, highest count first.
///
/// The sort is stable: restaurants with equal counts keep their input order.
pub fn top_by_favorites(items: &[RankedRestaurant], n: usize) -> Vec<RankedRestaurant> {
    let mut ranked = items.to_vec();
    ranked.sort_by_key(|r| Reverse(r.favorite_count));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::restaurant::RestaurantSummary;
    use proptest::prelude::*;

    fn ranked(id: i32, favorite_count: u64) -> RankedRestaurant {
        RankedRestaurant {
            summary: RestaurantSummary {
                id,
                name: format!("R{}", id),
                description: String::new(),
                image: None,
                category_id: None,
                category_name: None,
                is_favorited: false,
                is_liked: false,
            },
            favorite_count,
        }
    }

    fn ids(items: &[RankedRestaurant]) -> Vec<i32> {
        items.iter().map(|r| r.summary.id).collect()
    }

    #[test]
    fn ties_keep_fetch_order() {
        let items = vec![ranked(1, 3), ranked(2, 5), ranked(3, 5)];
        let top = top_by_favorites(&items, 2);
        assert_eq!(ids(&top), vec![2, 3]);
        // input untouched
        assert_eq!(ids(&items), vec![1, 2, 3]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(top_by_favorites(&[], 10).is_empty());
    }

    #[test]
    fn n_larger_than_input_returns_everything_sorted() {
        let items = vec![ranked(1, 0), ranked(2, 4), ranked(3, 1)];
        assert_eq!(ids(&top_by_favorites(&items, 10)), vec![2, 3, 1]);
    }

    #[test]
    fn zero_n_returns_nothing() {
        assert!(top_by_favorites(&[ranked(1, 1)], 0).is_empty());
    }

    proptest! {
        #[test]
        fn output_is_sorted_stable_and_bounded(
            counts in proptest::collection::vec(0u64..6, 0..40),
            n in 1usize..50,
        ) {
            let items: Vec<_> = counts
                .iter()
                .enumerate()
                .map(|(i, c)| ranked(i as i32, *c))
                .collect();
            let top = top_by_favorites(&items, n);

            prop_assert_eq!(top.len(), n.min(items.len()));
            for pair in top.windows(2) {
                prop_assert!(pair[0].favorite_count >= pair[1].favorite_count);
                if pair[0].favorite_count == pair[1].favorite_count {
                    prop_assert!(pair[0].summary.id < pair[1].summary.id);
                }
            }
        }
    }
}
