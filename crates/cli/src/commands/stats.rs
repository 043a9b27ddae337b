use mememart_core::{
    current_day_index, distinct_category_count, item_of_period, most_popular, CartStore,
    EnrichedMeme,
};

use super::{fetch_catalog, load_config, CommandResult, EXIT_CART_STORE};

pub fn run() -> CommandResult {
    let config = match load_config() {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let catalog = match fetch_catalog(&config) {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    let store = CartStore::new(&config.cart.path);
    let cart = match store.load() {
        Ok(cart) => cart,
        Err(error) => {
            return CommandResult::failure("cart_store", error.to_string(), EXIT_CART_STORE)
        }
    };

    let mut lines = vec![
        format!("total memes:         {}", catalog.len()),
        format!("categories:          {}", distinct_category_count(&catalog)),
        format!("most popular:        {}", render_pick(most_popular(&catalog))),
        format!(
            "meme of the day:     {}",
            render_pick(item_of_period(&catalog, current_day_index()))
        ),
    ];
    lines.push(format!("cart items:          {}", cart.total_items()));
    lines.push(format!("cart value:          ${}", cart.total_price()));

    CommandResult::success(lines.join("\n"))
}

fn render_pick(pick: Option<&EnrichedMeme>) -> String {
    match pick {
        Some(meme) => format!("{} ({}/5, {})", meme.name, meme.rating, meme.category),
        None => "no memes available".to_string(),
    }
}
