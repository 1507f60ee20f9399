//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use moviedeck::catalog::{Fetcher, PosterRef, ResultItem, ResultPage, TransportError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Create a temporary local catalog file.
pub fn temp_catalog(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let catalog_path = temp_dir.path().join("movies.json");
    std::fs::write(&catalog_path, content).expect("Failed to write catalog");
    (temp_dir, catalog_path)
}

// -- Result builders ----------------------------------------------------------

pub fn item(id: u64, title: &str) -> ResultItem {
    ResultItem {
        id,
        title: title.to_string(),
        release_year: Some(2000),
        rating: Some(7.5),
        overview: Some(format!("About {}", title)),
        poster: Some(PosterRef::new(format!("/{}.jpg", id))),
    }
}

pub fn posterless(id: u64, title: &str) -> ResultItem {
    ResultItem {
        poster: None,
        ..item(id, title)
    }
}

pub fn page_of(items: Vec<ResultItem>, total_pages: u32) -> ResultPage {
    ResultPage::new(items, total_pages)
}

pub fn status_error(status: u16) -> TransportError {
    TransportError::Status {
        endpoint: "/movie/popular".to_string(),
        status,
    }
}

// -- Scripted fetcher ---------------------------------------------------------

type Outcome = Box<dyn Fn() -> Result<ResultPage, TransportError> + Send + Sync>;

/// Fetcher that answers from a script keyed by `(page, query)` and records
/// every call.
#[derive(Default)]
pub struct ScriptedFetcher {
    script: Mutex<HashMap<(u32, String), Outcome>>,
    delays: Mutex<HashMap<(u32, String), Duration>>,
    calls: Mutex<Vec<(u32, String)>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        &self,
        page: u32,
        query: &str,
        outcome: impl Fn() -> Result<ResultPage, TransportError> + Send + Sync + 'static,
    ) {
        self.script
            .lock()
            .insert((page, query.to_string()), Box::new(outcome));
    }

    pub fn delay(&self, page: u32, query: &str, delay: Duration) {
        self.delays.lock().insert((page, query.to_string()), delay);
    }

    pub fn calls(&self) -> Vec<(u32, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch(&self, page: u32, query: &str) -> Result<ResultPage, TransportError> {
        let key = (page, query.to_string());
        self.calls.lock().push(key.clone());

        let delay = self.delays.lock().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.script.lock().get(&key) {
            Some(outcome) => outcome(),
            None => Err(TransportError::Status {
                endpoint: format!("unscripted page {} query {:?}", page, query),
                status: 404,
            }),
        }
    }
}
