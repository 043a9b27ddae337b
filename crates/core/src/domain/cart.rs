use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::meme::{EnrichedMeme, MemeId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub meme: EnrichedMeme,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Adds an item. An id already in the cart gets its quantity incremented;
    /// a new id is appended with quantity 1.
    pub fn add(&mut self, meme: EnrichedMeme) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.meme.id == meme.id) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine { meme, quantity: 1 });
    }

    /// Drops the line entirely, regardless of quantity.
    pub fn remove(&mut self, id: &MemeId) {
        self.lines.retain(|line| &line.meme.id != id);
    }

    /// Decrements quantity; a line at quantity 1 is removed.
    pub fn decrease(&mut self, id: &MemeId) {
        if let Some(line) = self.lines.iter_mut().find(|line| &line.meme.id == id) {
            if line.quantity <= 1 {
                self.remove(id);
                return;
            }
            line.quantity -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(|line| line.meme.price * Decimal::from(line.quantity)).sum()
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::meme::{Category, EnrichedMeme, MemeId};

    use super::Cart;

    fn meme(id: &str, price: u32) -> EnrichedMeme {
        EnrichedMeme {
            id: MemeId(id.to_string()),
            name: format!("meme-{id}"),
            url: format!("https://i.imgflip.com/{id}.jpg"),
            width: 500,
            height: 500,
            rating: 3,
            category: Category::Gaming,
            price: Decimal::from(price),
        }
    }

    #[test]
    fn adding_same_id_twice_increments_quantity() {
        let mut cart = Cart::default();
        cart.add(meme("1", 75));
        cart.add(meme("1", 75));

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn decrease_at_quantity_one_removes_the_line() {
        let mut cart = Cart::default();
        cart.add(meme("1", 75));
        cart.add(meme("2", 50));
        cart.decrease(&MemeId("1".to_string()));

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].meme.id, MemeId("2".to_string()));
    }

    #[test]
    fn decrease_above_one_keeps_the_line() {
        let mut cart = Cart::default();
        cart.add(meme("1", 75));
        cart.add(meme("1", 75));
        cart.decrease(&MemeId("1".to_string()));

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 1);
    }

    #[test]
    fn remove_drops_the_line_regardless_of_quantity() {
        let mut cart = Cart::default();
        cart.add(meme("1", 75));
        cart.add(meme("1", 75));
        cart.remove(&MemeId("1".to_string()));

        assert!(cart.is_empty());
    }

    #[test]
    fn totals_sum_price_times_quantity() {
        let mut cart = Cart::default();
        cart.add(meme("1", 75));
        cart.add(meme("1", 75));
        cart.add(meme("2", 50));

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::from(200));
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::default();
        cart.add(meme("1", 75));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }
}
