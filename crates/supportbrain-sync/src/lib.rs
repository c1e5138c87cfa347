//! Sync layer: pulls the stage classifier artifacts into the model directory.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{ArtifactClient, DEFAULT_BASE_URL, DEFAULT_REPO, FetchError, FetchReport};
