//! Catalog view engine: search, category filtering, sorting, and the
//! aggregate helpers behind the dashboard.
//!
//! Everything here is pure and synchronous. A query is applied as a strict
//! pipeline (search filter, then category filter, then sort) over a borrowed
//! catalog; the input is never reordered or mutated, so the same query on the
//! same catalog always produces the same result.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::Utc;
use thiserror::Error;

use crate::domain::meme::{Category, EnrichedMeme, MemeId};
use crate::errors::CatalogError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// Sort keys over the enriched catalog. `size` compares pixel area
/// (width × height).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    RatingDesc,
    RatingAsc,
    SizeDesc,
    SizeAsc,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown sort key `{0}`")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name_asc" => Ok(SortKey::NameAsc),
            "name_desc" => Ok(SortKey::NameDesc),
            "rating_desc" => Ok(SortKey::RatingDesc),
            "rating_asc" => Ok(SortKey::RatingAsc),
            "size_desc" => Ok(SortKey::SizeDesc),
            "size_asc" => Ok(SortKey::SizeAsc),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// One view request. Transient: built per render, never persisted.
/// `sort: None` leaves the post-filter order unchanged, which is also the
/// defensive fallback boundaries use for unrecognized sort spellings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search_term: String,
    pub category: CategoryFilter,
    pub sort: Option<SortKey>,
}

/// Applies `query` to `catalog`: case-insensitive substring search on the
/// name, exact category filter, then a stable sort. Equal-keyed items keep
/// their post-filter relative order.
pub fn view(catalog: &[EnrichedMeme], query: &CatalogQuery) -> Vec<EnrichedMeme> {
    let needle = query.search_term.to_lowercase();

    let mut result: Vec<EnrichedMeme> = catalog
        .iter()
        .filter(|meme| needle.is_empty() || meme.name.to_lowercase().contains(&needle))
        .filter(|meme| match query.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => meme.category == category,
        })
        .cloned()
        .collect();

    if let Some(sort) = query.sort {
        match sort {
            SortKey::NameAsc => result.sort_by(|a, b| name_key(a).cmp(&name_key(b))),
            SortKey::NameDesc => result.sort_by(|a, b| name_key(b).cmp(&name_key(a))),
            SortKey::RatingDesc => result.sort_by(|a, b| b.rating.cmp(&a.rating)),
            SortKey::RatingAsc => result.sort_by(|a, b| a.rating.cmp(&b.rating)),
            SortKey::SizeDesc => result.sort_by(|a, b| b.pixel_area().cmp(&a.pixel_area())),
            SortKey::SizeAsc => result.sort_by(|a, b| a.pixel_area().cmp(&b.pixel_area())),
        }
    }

    result
}

// Unicode-lowercase collation key. Locale tailoring is deliberately out:
// catalog names are ASCII in practice and no collation crate is carried.
fn name_key(meme: &EnrichedMeme) -> String {
    meme.name.to_lowercase()
}

/// Count of distinct categories present in `items`.
pub fn distinct_category_count(items: &[EnrichedMeme]) -> usize {
    items.iter().map(|meme| meme.category).collect::<HashSet<Category>>().len()
}

/// Item with the maximum rating; ties go to the first occurrence in input
/// order. `None` on empty input.
pub fn most_popular(items: &[EnrichedMeme]) -> Option<&EnrichedMeme> {
    items.iter().reduce(|best, meme| if meme.rating > best.rating { meme } else { best })
}

/// Deterministically rotating featured item: `items[day_index % len]`.
/// `None` on empty input. No randomness; the same day index against the same
/// catalog always features the same item.
pub fn item_of_period(items: &[EnrichedMeme], day_index: u64) -> Option<&EnrichedMeme> {
    if items.is_empty() {
        return None;
    }

    let index = (day_index % items.len() as u64) as usize;
    items.get(index)
}

/// Day index for [`item_of_period`]: whole days since the Unix epoch, UTC.
pub fn current_day_index() -> u64 {
    let seconds = Utc::now().timestamp();
    u64::try_from(seconds.div_euclid(86_400)).unwrap_or(0)
}

/// Lookup by id. The upstream API has no single-item endpoint, so detail
/// views resolve ids against an already-fetched catalog.
pub fn find_meme<'a>(
    items: &'a [EnrichedMeme],
    id: &MemeId,
) -> Result<&'a EnrichedMeme, CatalogError> {
    items
        .iter()
        .find(|meme| &meme.id == id)
        .ok_or_else(|| CatalogError::NotFound(id.0.clone()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::meme::{Category, EnrichedMeme, MemeId};
    use crate::errors::CatalogError;

    use super::{
        distinct_category_count, find_meme, item_of_period, most_popular, view, CatalogQuery,
        CategoryFilter, SortKey,
    };

    fn meme(id: &str, name: &str, rating: u8, category: Category, width: u32) -> EnrichedMeme {
        EnrichedMeme {
            id: MemeId(id.to_string()),
            name: name.to_string(),
            url: format!("https://i.imgflip.com/{id}.jpg"),
            width,
            height: 100,
            rating,
            category,
            price: Decimal::from(u32::from(rating) * 25),
        }
    }

    fn sample() -> Vec<EnrichedMeme> {
        vec![
            meme("1", "Doge", 3, Category::Animals, 500),
            meme("2", "Cat", 5, Category::Animals, 300),
            meme("3", "PEPE", 5, Category::Random, 400),
            meme("4", "Frog", 2, Category::Animals, 200),
            meme("5", "Success Kid", 4, Category::School, 600),
        ]
    }

    fn ids(items: &[EnrichedMeme]) -> Vec<&str> {
        items.iter().map(|meme| meme.id.0.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_whole_catalog_in_source_order() {
        let catalog = sample();
        let result = view(&catalog, &CatalogQuery::default());

        assert_eq!(result.len(), catalog.len());
        assert_eq!(ids(&result), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn search_is_case_insensitive_substring_match() {
        let catalog = sample();
        let query = CatalogQuery {
            search_term: "e".to_string(),
            sort: Some(SortKey::NameAsc),
            ..CatalogQuery::default()
        };

        let result = view(&catalog, &query);
        let names: Vec<&str> = result.iter().map(|meme| meme.name.as_str()).collect();
        assert_eq!(names, ["Doge", "PEPE", "Success Kid"]);
    }

    #[test]
    fn category_filter_keeps_exact_matches_only() {
        let catalog = sample();
        let query = CatalogQuery {
            category: CategoryFilter::Only(Category::Animals),
            ..CatalogQuery::default()
        };

        assert_eq!(ids(&view(&catalog, &query)), ["1", "2", "4"]);
    }

    #[test]
    fn view_is_idempotent() {
        let catalog = sample();
        let query = CatalogQuery {
            search_term: "o".to_string(),
            category: CategoryFilter::All,
            sort: Some(SortKey::RatingDesc),
        };

        assert_eq!(view(&catalog, &query), view(&catalog, &query));
    }

    #[test]
    fn view_does_not_mutate_its_input() {
        let catalog = sample();
        let before = ids(&catalog).join(",");
        let _ = view(
            &catalog,
            &CatalogQuery { sort: Some(SortKey::NameDesc), ..CatalogQuery::default() },
        );

        assert_eq!(ids(&catalog).join(","), before);
    }

    #[test]
    fn rating_sorts_reverse_each_other_and_stay_stable_on_ties() {
        let catalog = sample();

        let desc = view(
            &catalog,
            &CatalogQuery { sort: Some(SortKey::RatingDesc), ..CatalogQuery::default() },
        );
        // Both rating-5 items keep source order ("2" before "3").
        assert_eq!(ids(&desc), ["2", "3", "5", "1", "4"]);

        let asc = view(
            &catalog,
            &CatalogQuery { sort: Some(SortKey::RatingAsc), ..CatalogQuery::default() },
        );
        assert_eq!(ids(&asc), ["4", "1", "5", "2", "3"]);
    }

    #[test]
    fn size_sort_compares_pixel_area() {
        let catalog = sample();
        let result = view(
            &catalog,
            &CatalogQuery { sort: Some(SortKey::SizeDesc), ..CatalogQuery::default() },
        );

        assert_eq!(ids(&result), ["5", "1", "3", "2", "4"]);
    }

    #[test]
    fn missing_sort_leaves_post_filter_order_unchanged() {
        let catalog = sample();
        let query = CatalogQuery {
            search_term: "o".to_string(),
            category: CategoryFilter::All,
            sort: None,
        };

        assert_eq!(ids(&view(&catalog, &query)), ["1", "4"]);
    }

    #[test]
    fn unknown_sort_spelling_is_an_error_for_boundaries_to_degrade() {
        assert!("popularity".parse::<SortKey>().is_err());
        assert_eq!("RATING_DESC".parse::<SortKey>(), Ok(SortKey::RatingDesc));
    }

    #[test]
    fn distinct_category_count_ignores_duplicates() {
        assert_eq!(distinct_category_count(&sample()), 3);
        assert_eq!(distinct_category_count(&[]), 0);
    }

    #[test]
    fn most_popular_breaks_ties_by_first_occurrence() {
        let catalog = sample();
        let winner = most_popular(&catalog).expect("catalog is non-empty");
        assert_eq!(winner.id, MemeId("2".to_string()));

        assert!(most_popular(&[]).is_none());
    }

    #[test]
    fn item_of_period_wraps_by_day_index() {
        let catalog: Vec<EnrichedMeme> = (0..7)
            .map(|i| meme(&i.to_string(), &format!("m{i}"), 1, Category::Random, 100))
            .collect();

        let featured = item_of_period(&catalog, 10).expect("catalog is non-empty");
        assert_eq!(featured.id, MemeId("3".to_string()));

        assert!(item_of_period(&[], 10).is_none());
    }

    #[test]
    fn find_meme_misses_with_not_found() {
        let catalog = sample();
        let found = find_meme(&catalog, &MemeId("3".to_string())).expect("id 3 exists");
        assert_eq!(found.name, "PEPE");

        let error = find_meme(&catalog, &MemeId("99".to_string())).expect_err("id 99 is absent");
        assert_eq!(error, CatalogError::NotFound("99".to_string()));
    }
}
