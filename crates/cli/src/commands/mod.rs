pub mod cart;
pub mod catalog;
pub mod config;
pub mod doctor;
pub mod show;
pub mod stats;

use mememart_core::config::{AppConfig, LoadOptions};
use mememart_core::{CatalogError, EnrichedMeme};
use mememart_imgflip::ImgflipClient;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(error_class: &str, message: impl Into<String>, exit_code: u8) -> Self {
        Self { exit_code, output: format!("error ({error_class}): {}", message.into()) }
    }
}

// Exit codes: 2 config/bad input, 3 fetch, 4 lookup miss, 5 cart store.
pub(crate) const EXIT_CONFIG: u8 = 2;
pub(crate) const EXIT_FETCH: u8 = 3;
pub(crate) const EXIT_NOT_FOUND: u8 = 4;
pub(crate) const EXIT_CART_STORE: u8 = 5;

pub(crate) fn error_class(error: &CatalogError) -> &'static str {
    match error {
        CatalogError::Transport(_) => "transport",
        CatalogError::Schema(_) => "schema",
        CatalogError::NotFound(_) => "not_found",
    }
}

pub(crate) fn load_config() -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions::default())
        .map_err(|error| CommandResult::failure("config_validation", error.to_string(), EXIT_CONFIG))
}

/// Builds a client and runs one fetch on a throwaway current-thread runtime.
/// Every invocation re-fetches; there is no cache to consult.
pub(crate) fn fetch_catalog(config: &AppConfig) -> Result<Vec<EnrichedMeme>, CommandResult> {
    let client = ImgflipClient::new(&config.catalog).map_err(|error| {
        CommandResult::failure("transport", error.to_string(), EXIT_FETCH)
    })?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| {
            CommandResult::failure(
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                EXIT_CONFIG,
            )
        })?;

    runtime.block_on(client.fetch()).map_err(|error| {
        let mapped = CatalogError::from(error);
        CommandResult::failure(error_class(&mapped), mapped.to_string(), EXIT_FETCH)
    })
}
