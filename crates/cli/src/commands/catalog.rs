use mememart_core::{view, CatalogQuery, Category, CategoryFilter, EnrichedMeme, SortKey};

use super::{fetch_catalog, load_config, CommandResult, EXIT_CONFIG};

pub fn run(
    search: Option<String>,
    category: Option<String>,
    sort: Option<String>,
) -> CommandResult {
    let config = match load_config() {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let category_filter = match category {
        None => CategoryFilter::All,
        Some(raw) => match raw.parse::<Category>() {
            Ok(parsed) => CategoryFilter::Only(parsed),
            Err(error) => return CommandResult::failure("bad_request", error.to_string(), EXIT_CONFIG),
        },
    };

    // Unknown sort spellings degrade to "leave order unchanged".
    let sort_key = sort.as_deref().and_then(|raw| raw.parse::<SortKey>().ok());

    let catalog = match fetch_catalog(&config) {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    let query = CatalogQuery {
        search_term: search.unwrap_or_default(),
        category: category_filter,
        sort: sort_key,
    };

    CommandResult::success(render_table(&view(&catalog, &query)))
}

fn render_table(memes: &[EnrichedMeme]) -> String {
    let mut lines = Vec::with_capacity(memes.len() + 2);
    lines.push(format!(
        "{:<12} {:<42} {:<12} {:>6} {:>6}  {}",
        "ID", "NAME", "CATEGORY", "RATING", "PRICE", "SIZE"
    ));

    for meme in memes {
        lines.push(format!(
            "{:<12} {:<42} {:<12} {:>6} {:>6}  {}x{}",
            meme.id,
            truncate(&meme.name, 42),
            meme.category,
            format!("{}/5", meme.rating),
            format!("${}", meme.price),
            meme.width,
            meme.height,
        ));
    }

    lines.push(format!("{} results", memes.len()));
    lines.join("\n")
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }

    let head: String = name.chars().take(max - 3).collect();
    format!("{head}...")
}
