//! Attribute derivation: rating, category, and price computed from a record's
//! id alone.
//!
//! Derived fields must be reproducible across processes and releases: a
//! catalog item shown yesterday has to come back with the same rating, price,
//! and category today, even though nothing is persisted. The derivation is
//! therefore a pure function of the id string, with no stored state and no
//! randomness.

use rust_decimal::Decimal;

use crate::domain::meme::{Category, Derived, EnrichedMeme, RawMeme};

/// 32-bit signed accumulator hash over the UTF-16 code units of `id`:
/// `h = h * 31 + unit`, wrapped to i32 at every step. Surrogate pairs hash as
/// their two code units, so non-BMP names are covered.
pub fn hash_id(id: &str) -> i32 {
    let mut h: i32 = 0;
    for unit in id.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    h
}

/// Derives the display/economic attributes for an id. Total over any string;
/// the empty string hashes to 0 and lands on rating 1 / animals / 25.
pub fn derive(id: &str) -> Derived {
    // unsigned_abs rather than abs: the magnitude of i32::MIN must survive.
    let h = hash_id(id).unsigned_abs();
    let rating = (h % 5) as u8 + 1;
    let category = Category::ALL[(h % 5) as usize];
    let price = Decimal::from(u32::from(rating) * 25);

    Derived { rating, category, price }
}

pub fn enrich(raw: RawMeme) -> EnrichedMeme {
    let derived = derive(&raw.id.0);

    EnrichedMeme {
        id: raw.id,
        name: raw.name,
        url: raw.url,
        width: raw.width,
        height: raw.height,
        rating: derived.rating,
        category: derived.category,
        price: derived.price,
    }
}

/// Enriches a whole fetch result, preserving source order.
pub fn enrich_all(raw: Vec<RawMeme>) -> Vec<EnrichedMeme> {
    raw.into_iter().map(enrich).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::meme::{Category, MemeId, RawMeme};

    use super::{derive, enrich_all, hash_id};

    #[test]
    fn derivation_is_referentially_stable() {
        for id in ["61579", "101470", "", "Doge", "日本語", "🐸"] {
            assert_eq!(derive(id), derive(id), "derive must be pure for id {id:?}");
        }
    }

    #[test]
    fn empty_id_hashes_to_zero() {
        assert_eq!(hash_id(""), 0);

        let derived = derive("");
        assert_eq!(derived.rating, 1);
        assert_eq!(derived.category, Category::Animals);
        assert_eq!(derived.price, Decimal::from(25));
    }

    #[test]
    fn single_character_matches_the_recurrence_by_hand() {
        // "a" is code unit 97: h = (0 << 5) - 0 + 97 = 97.
        assert_eq!(hash_id("a"), 97);
        // "ab": h = (97 << 5) - 97 + 98 = 3105 - 97 + 98.
        assert_eq!(hash_id("ab"), 97 * 31 + 98);
    }

    #[test]
    fn accumulator_wraps_to_32_bit_signed() {
        // Long ids overflow i32 many times over; the recurrence must keep
        // wrapping instead of widening or panicking.
        let long_id = "x".repeat(64);
        let wrapped = hash_id(&long_id);
        assert_eq!(wrapped, hash_id(&long_id));
        assert_eq!(derive(&long_id), derive(&long_id));
    }

    #[test]
    fn known_vector_for_a_real_catalog_id() {
        // "61579" ("One Does Not Simply"): 54, 49, 53, 55, 57 accumulate to
        // 51_382_588 without ever wrapping.
        assert_eq!(hash_id("61579"), 51_382_588);

        let derived = derive("61579");
        assert_eq!(derived.rating, 4);
        assert_eq!(derived.category, Category::School);
        assert_eq!(derived.price, Decimal::from(100));
    }

    #[test]
    fn rating_stays_in_band_and_prices_follow() {
        for id in ["1", "2", "3", "4", "5", "61579", "438680", "Success Kid"] {
            let derived = derive(id);
            assert!((1..=5).contains(&derived.rating), "rating out of band for {id}");
            assert_eq!(derived.price, Decimal::from(u32::from(derived.rating) * 25));
        }
    }

    #[test]
    fn category_tracks_the_same_residue_as_rating() {
        for id in ["1", "61579", "Doge", ""] {
            let derived = derive(id);
            let index = usize::from(derived.rating - 1);
            assert_eq!(derived.category, Category::ALL[index]);
        }
    }

    #[test]
    fn enrich_all_preserves_source_order() {
        let raw: Vec<RawMeme> = ["3", "1", "2"]
            .iter()
            .map(|id| RawMeme {
                id: MemeId(id.to_string()),
                name: format!("meme-{id}"),
                url: format!("https://i.imgflip.com/{id}.jpg"),
                width: 100,
                height: 100,
            })
            .collect();

        let enriched = enrich_all(raw);
        let ids: Vec<&str> = enriched.iter().map(|meme| meme.id.0.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }
}
