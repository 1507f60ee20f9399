//! Open-item lookup: trailer, runtime, archive matches and platform links.
//!
//! Lookups are best-effort. A failed trailer or archive call is logged and
//! noted on the panel; platform links are always present.

use tracing::warn;

use crate::catalog::{ArchiveClient, ArchiveItem, Fetcher, MovieDetails, ResultItem, Trailer};
use crate::links::{platform_links, PlatformLink};

/// An archive entry with its ready-to-open embed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMatch {
    pub item: ArchiveItem,
    pub embed_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemPanel {
    pub item: ResultItem,
    pub trailer: Option<Trailer>,
    pub details: Option<MovieDetails>,
    pub archive: Vec<ArchiveMatch>,
    pub links: Vec<PlatformLink>,
    /// Lookups that failed, as user-facing notes.
    pub notes: Vec<String>,
}

impl ItemPanel {
    /// Panel with links only, shown while lookups are in flight.
    pub fn links_only(item: ResultItem) -> Self {
        let links = platform_links(&item.title);
        Self {
            item,
            trailer: None,
            details: None,
            archive: Vec::new(),
            links,
            notes: Vec::new(),
        }
    }
}

/// Build the panel for `item`.
///
/// Lookups run in order: trailer, then details, then archive playback
/// candidates.
pub async fn open_item(
    fetcher: &dyn Fetcher,
    archive: Option<&ArchiveClient>,
    item: ResultItem,
) -> ItemPanel {
    let mut panel = ItemPanel::links_only(item);

    match fetcher.trailer(panel.item.id).await {
        Ok(trailer) => panel.trailer = trailer,
        Err(err) => {
            warn!(id = panel.item.id, error = %err, "Trailer lookup failed");
            panel.notes.push(format!("Trailer unavailable: {}", err.user_message()));
        }
    }

    match fetcher.details(panel.item.id).await {
        Ok(details) => panel.details = details,
        Err(err) => warn!(id = panel.item.id, error = %err, "Details lookup failed"),
    }

    if let Some(archive) = archive {
        match archive.search(&panel.item.title).await {
            Ok(items) => {
                panel.archive = items
                    .into_iter()
                    .map(|item| ArchiveMatch {
                        embed_url: item.embed_url(archive.base_url()),
                        item,
                    })
                    .collect();
            }
            Err(err) => {
                warn!(title = %panel.item.title, error = %err, "Archive search failed");
                panel.notes.push(format!("Archive unavailable: {}", err.user_message()));
            }
        }
    }

    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PosterRef, ResultPage, TransportError};
    use async_trait::async_trait;

    struct TrailerFetcher {
        fail_trailer: bool,
    }

    #[async_trait]
    impl Fetcher for TrailerFetcher {
        fn name(&self) -> &'static str {
            "trailer-test"
        }

        async fn fetch(&self, _page: u32, _query: &str) -> Result<ResultPage, TransportError> {
            Ok(ResultPage::new(Vec::new(), 1))
        }

        async fn trailer(&self, id: u64) -> Result<Option<Trailer>, TransportError> {
            if self.fail_trailer {
                return Err(TransportError::Status {
                    endpoint: format!("/movie/{}/videos", id),
                    status: 500,
                });
            }
            Ok(Some(Trailer {
                key: format!("key{}", id),
                name: "Official Trailer".to_string(),
            }))
        }
    }

    fn item() -> ResultItem {
        ResultItem {
            id: 7,
            title: "Metropolis".to_string(),
            release_year: Some(1927),
            rating: Some(8.3),
            overview: None,
            poster: Some(PosterRef::new("/m.jpg")),
        }
    }

    #[tokio::test]
    async fn trailer_found_and_links_present() {
        let panel = open_item(&TrailerFetcher { fail_trailer: false }, None, item()).await;

        assert_eq!(panel.trailer.as_ref().map(|t| t.key.as_str()), Some("key7"));
        assert!(panel.details.is_none());
        assert_eq!(panel.links.len(), 7);
        assert!(panel.notes.is_empty());
    }

    #[tokio::test]
    async fn trailer_failure_falls_back_to_links() {
        let panel = open_item(&TrailerFetcher { fail_trailer: true }, None, item()).await;

        assert!(panel.trailer.is_none());
        assert!(!panel.links.is_empty());
        assert_eq!(panel.notes.len(), 1);
        assert!(panel.notes[0].starts_with("Trailer unavailable"));
    }
}
