//! Imgflip catalog fetcher: the only network I/O in the system.
//!
//! One unauthenticated GET against the public meme API, a strict envelope
//! decode, and an enrichment pass over every record. No retries, no
//! pagination, no caching; a failure anywhere aborts the whole fetch and the
//! caller decides what to do next.

pub mod client;
pub mod envelope;

pub use client::{FetchError, ImgflipClient};
pub use envelope::decode_envelope;
