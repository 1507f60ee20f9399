//! Result fetchers for the metadata and archive providers.
//!
//! Every call is a fresh request: no retries, no backoff, no caching.

mod archive;
mod error;
mod local;
mod metadata;
mod providers;
mod types;

use async_trait::async_trait;

pub use archive::ArchiveClient;
pub use error::TransportError;
pub use local::LocalCatalog;
pub use metadata::MetadataClient;
pub use providers::Providers;
pub use types::{
    format_runtime, ArchiveItem, MovieDetails, PosterRef, ResultItem, ResultPage, Trailer,
};

/// Source of paged movie listings.
///
/// An empty `query` selects the listing path (popular or trending);
/// anything else is a title search.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the name of this fetcher for logging.
    fn name(&self) -> &'static str;

    /// Fetch one page. `page` starts at 1.
    async fn fetch(&self, page: u32, query: &str) -> Result<ResultPage, TransportError>;

    /// Look up a YouTube trailer for a movie.
    ///
    /// Default implementation has no video source.
    async fn trailer(&self, _id: u64) -> Result<Option<Trailer>, TransportError> {
        Ok(None)
    }

    /// Look up runtime and genres for a movie.
    ///
    /// Default implementation has no details source.
    async fn details(&self, _id: u64) -> Result<Option<MovieDetails>, TransportError> {
        Ok(None)
    }
}
