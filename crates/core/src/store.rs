//! JSON-file persistence for the cart.
//!
//! The cart is the only durable state in the system; the catalog itself is
//! always refetched. A missing file is an empty cart, not an error, so the
//! first invocation needs no setup.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::cart::Cart;

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("could not access cart file `{path}`: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("cart file `{path}` is malformed: {source}")]
    Malformed { path: PathBuf, source: serde_json::Error },
}

#[derive(Clone, Debug)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Cart, CartStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(Cart::default()),
            Err(source) => return Err(CartStoreError::Io { path: self.path.clone(), source }),
        };

        serde_json::from_str(&raw)
            .map_err(|source| CartStoreError::Malformed { path: self.path.clone(), source })
    }

    pub fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let serialized = serde_json::to_string_pretty(cart)
            .map_err(|source| CartStoreError::Malformed { path: self.path.clone(), source })?;

        fs::write(&self.path, serialized)
            .map_err(|source| CartStoreError::Io { path: self.path.clone(), source })
    }
}
