use mememart_core::{find_meme, Cart, CartStore, CartStoreError, MemeId};

use super::{
    error_class, fetch_catalog, load_config, CommandResult, EXIT_CART_STORE, EXIT_NOT_FOUND,
};

/// Adds one of an item. The id is resolved against a fresh fetch so the
/// stored line carries the item's current enrichment.
pub fn add(id: &str) -> CommandResult {
    let config = match load_config() {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let catalog = match fetch_catalog(&config) {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    let meme = match find_meme(&catalog, &MemeId(id.to_string())) {
        Ok(meme) => meme.clone(),
        Err(error) => {
            return CommandResult::failure(error_class(&error), error.to_string(), EXIT_NOT_FOUND)
        }
    };

    mutate_stored_cart(&CartStore::new(&config.cart.path), |cart| cart.add(meme))
}

pub fn remove(id: &str) -> CommandResult {
    with_store(|store| mutate_stored_cart(store, |cart| cart.remove(&MemeId(id.to_string()))))
}

pub fn decrease(id: &str) -> CommandResult {
    with_store(|store| mutate_stored_cart(store, |cart| cart.decrease(&MemeId(id.to_string()))))
}

pub fn clear() -> CommandResult {
    with_store(|store| mutate_stored_cart(store, Cart::clear))
}

pub fn show() -> CommandResult {
    with_store(|store| match store.load() {
        Ok(cart) => CommandResult::success(render_cart(&cart)),
        Err(error) => store_failure(error),
    })
}

fn with_store(operation: impl FnOnce(&CartStore) -> CommandResult) -> CommandResult {
    match load_config() {
        Ok(config) => operation(&CartStore::new(&config.cart.path)),
        Err(failure) => failure,
    }
}

fn mutate_stored_cart(store: &CartStore, mutate: impl FnOnce(&mut Cart)) -> CommandResult {
    let mut cart = match store.load() {
        Ok(cart) => cart,
        Err(error) => return store_failure(error),
    };

    mutate(&mut cart);

    match store.save(&cart) {
        Ok(()) => CommandResult::success(render_cart(&cart)),
        Err(error) => store_failure(error),
    }
}

fn store_failure(error: CartStoreError) -> CommandResult {
    CommandResult::failure("cart_store", error.to_string(), EXIT_CART_STORE)
}

fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "cart is empty".to_string();
    }

    let mut lines: Vec<String> = cart
        .lines
        .iter()
        .map(|line| {
            format!(
                "{} x {} (id {}, ${} each)",
                line.quantity, line.meme.name, line.meme.id, line.meme.price
            )
        })
        .collect();

    lines.push(format!("total: {} items, ${}", cart.total_items(), cart.total_price()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use mememart_core::{enrich, Cart, CartStore, MemeId, RawMeme};
    use tempfile::TempDir;

    use super::{mutate_stored_cart, render_cart};

    fn meme(id: &str, name: &str) -> mememart_core::EnrichedMeme {
        enrich(RawMeme {
            id: MemeId(id.to_string()),
            name: name.to_string(),
            url: format!("https://i.imgflip.com/{id}.jpg"),
            width: 500,
            height: 400,
        })
    }

    #[test]
    fn empty_cart_renders_a_placeholder() {
        assert_eq!(render_cart(&Cart::default()), "cart is empty");
    }

    #[test]
    fn rendered_cart_lists_lines_and_totals() {
        let mut cart = Cart::default();
        cart.add(meme("1", "Doge"));
        cart.add(meme("1", "Doge"));

        let rendered = render_cart(&cart);
        assert!(rendered.starts_with("2 x Doge"));
        assert!(rendered.contains("total: 2 items"));
    }

    #[test]
    fn mutations_persist_through_the_store() {
        let dir = TempDir::new().expect("temp dir");
        let store = CartStore::new(dir.path().join("cart.json"));

        let added = mutate_stored_cart(&store, |cart| cart.add(meme("1", "Doge")));
        assert_eq!(added.exit_code, 0);

        let reloaded = store.load().expect("load persisted cart");
        assert_eq!(reloaded.total_items(), 1);

        let cleared = mutate_stored_cart(&store, Cart::clear);
        assert_eq!(cleared.exit_code, 0);
        assert!(store.load().expect("load cleared cart").is_empty());
    }
}
