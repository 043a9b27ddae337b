use mememart_core::{find_meme, related, EnrichedMeme, MemeId};

use super::{error_class, fetch_catalog, load_config, CommandResult, EXIT_NOT_FOUND};

pub fn run(id: &str, related_limit: Option<usize>) -> CommandResult {
    let config = match load_config() {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let catalog = match fetch_catalog(&config) {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    let meme_id = MemeId(id.to_string());
    let meme = match find_meme(&catalog, &meme_id) {
        Ok(meme) => meme,
        Err(error) => {
            return CommandResult::failure(error_class(&error), error.to_string(), EXIT_NOT_FOUND)
        }
    };

    let limit = related_limit.unwrap_or(config.catalog.related_limit);
    let picks = related(&catalog, meme, limit);

    CommandResult::success(render_detail(meme, &picks))
}

fn render_detail(meme: &EnrichedMeme, picks: &[EnrichedMeme]) -> String {
    let mut lines = vec![
        format!("{} (id {})", meme.name, meme.id),
        format!("  category: {}", meme.category),
        format!("  rating:   {}/5", meme.rating),
        format!("  price:    ${}", meme.price),
        format!("  size:     {}x{} px", meme.width, meme.height),
        format!("  url:      {}", meme.url),
        String::new(),
        "related picks:".to_string(),
    ];

    if picks.is_empty() {
        lines.push("  (none in this category)".to_string());
    } else {
        for pick in picks {
            lines.push(format!("  - {} (id {}, ${})", pick.name, pick.id, pick.price));
        }
    }

    lines.join("\n")
}
