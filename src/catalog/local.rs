use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::TransportError;
use super::types::{LocalMovieWire, MovieDetails, ResultItem, ResultPage};
use super::Fetcher;

/// Offline catalog backed by a JSON array of movies.
///
/// The file is re-read on every fetch, so edits show up on the next page
/// change without a restart.
pub struct LocalCatalog {
    path: PathBuf,
    page_size: u32,
}

/// One catalog movie with the panel facts the file carries for it.
struct LocalEntry {
    item: ResultItem,
    details: Option<MovieDetails>,
}

impl LocalCatalog {
    pub fn new(path: impl Into<PathBuf>, page_size: u32) -> Self {
        Self {
            path: path.into(),
            page_size: page_size.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Vec<LocalEntry>, TransportError> {
        let content = std::fs::read_to_string(path).map_err(|e| TransportError::LocalCatalog {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let movies: Vec<LocalMovieWire> =
            serde_json::from_str(&content).map_err(|e| TransportError::LocalCatalog {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(assign_ids(movies))
    }

    async fn load_entries(&self) -> Result<Vec<LocalEntry>, TransportError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::load(&path))
            .await
            .map_err(|e| TransportError::LocalCatalog {
                path: self.path.clone(),
                message: e.to_string(),
            })?
    }
}

/// Entries without an id are numbered after the highest explicit id, in
/// file order, so they never collide with one.
fn assign_ids(movies: Vec<LocalMovieWire>) -> Vec<LocalEntry> {
    let mut next_id = movies.iter().filter_map(|movie| movie.id).max().unwrap_or(0);
    movies
        .into_iter()
        .map(|movie| {
            let id = movie.id.unwrap_or_else(|| {
                next_id += 1;
                next_id
            });
            LocalEntry {
                details: movie.details(),
                item: movie.into_item(id),
            }
        })
        .collect()
}

/// Case-insensitive title filter followed by page slicing.
///
/// A page past the end yields an empty page rather than an error.
fn paginate(items: Vec<ResultItem>, page: u32, page_size: u32, query: &str) -> ResultPage {
    let needle = query.trim().to_lowercase();
    let matching: Vec<ResultItem> = items
        .into_iter()
        .filter(|item| needle.is_empty() || item.title.to_lowercase().contains(&needle))
        .collect();

    let size = page_size as usize;
    let total_pages = matching.len().div_ceil(size) as u32;
    let start = (page.max(1) as usize - 1) * size;
    let items = matching.into_iter().skip(start).take(size).collect();

    ResultPage::new(items, total_pages)
}

#[async_trait]
impl Fetcher for LocalCatalog {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn fetch(&self, page: u32, query: &str) -> Result<ResultPage, TransportError> {
        let entries = self.load_entries().await?;
        debug!(count = entries.len(), page, "Loaded local catalog");
        let items = entries.into_iter().map(|entry| entry.item).collect();
        Ok(paginate(items, page, self.page_size, query))
    }

    async fn details(&self, id: u64) -> Result<Option<MovieDetails>, TransportError> {
        let entries = self.load_entries().await?;
        Ok(entries
            .into_iter()
            .find(|entry| entry.item.id == id)
            .and_then(|entry| entry.details))
    }
}
