pub mod catalog;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod errors;
pub mod related;
pub mod source;
pub mod store;

pub use catalog::{
    current_day_index, distinct_category_count, find_meme, item_of_period, most_popular, view,
    CatalogQuery, CategoryFilter, SortKey, UnknownSortKey,
};
pub use domain::cart::{Cart, CartLine};
pub use domain::meme::{Category, Derived, EnrichedMeme, MemeId, RawMeme, UnknownCategory};
pub use enrich::{derive, enrich, enrich_all, hash_id};
pub use errors::CatalogError;
pub use related::{related, related_with_rng};
pub use source::CatalogSource;
pub use store::{CartStore, CartStoreError};
