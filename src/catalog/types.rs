//! Result shapes produced by the fetchers, and the provider wire formats
//! they are decoded from.

use serde::{Deserialize, Deserializer};

/// Opaque poster reference as delivered by the provider.
///
/// Usually a path such as `/abc.jpg`; local catalogs may carry full URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterRef(String);

impl PosterRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against the provider's image base URL.
    pub fn url(&self, image_base_url: &str) -> String {
        if self.0.starts_with("http://") || self.0.starts_with("https://") {
            return self.0.clone();
        }
        format!("{}{}", image_base_url.trim_end_matches('/'), self.0)
    }
}

/// One movie as received from a fetch. Lives for one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    pub id: u64,
    pub title: String,
    pub release_year: Option<i32>,
    /// Average rating in `[0, 10]`.
    pub rating: Option<f32>,
    pub overview: Option<String>,
    pub poster: Option<PosterRef>,
}

impl ResultItem {
    pub fn year_label(&self) -> String {
        self.release_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn rating_label(&self) -> String {
        self.rating
            .map(|rating| format!("{:.1}", rating))
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn overview_text(&self) -> &str {
        self.overview
            .as_deref()
            .unwrap_or("No description available.")
    }
}

/// One page of results plus the provider's page count.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub items: Vec<ResultItem>,
    /// Always at least 1, even for an empty result set.
    pub total_pages: u32,
}

impl ResultPage {
    pub fn new(items: Vec<ResultItem>, total_pages: u32) -> Self {
        Self {
            items,
            total_pages: total_pages.max(1),
        }
    }
}

/// A trailer hosted on YouTube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub key: String,
    pub name: String,
}

impl Trailer {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.key)
    }
}

/// Extra facts shown in the item panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieDetails {
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<String>,
}

impl MovieDetails {
    pub fn runtime_label(&self) -> String {
        format_runtime(self.runtime_minutes)
    }
}

/// `148` becomes `"2h 28m"`. Missing or zero runtimes become `"N/A"`.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(minutes) if minutes > 0 => format!("{}h {}m", minutes / 60, minutes % 60),
        _ => "N/A".to_string(),
    }
}

/// A public-domain archive entry that can be played through its embed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveItem {
    pub identifier: String,
    pub title: String,
    pub format: Option<String>,
}

impl ArchiveItem {
    pub fn embed_url(&self, archive_base_url: &str) -> String {
        format!(
            "{}/embed/{}",
            archive_base_url.trim_end_matches('/'),
            self.identifier
        )
    }
}

// ---------------------------------------------------------------------------
// Metadata provider wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct MoviePageWire {
    #[serde(default)]
    pub results: Vec<MovieWire>,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MovieWire {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl From<MoviePageWire> for ResultPage {
    fn from(wire: MoviePageWire) -> Self {
        let items = wire.results.into_iter().map(ResultItem::from).collect();
        ResultPage::new(items, wire.total_pages)
    }
}

impl From<MovieWire> for ResultItem {
    fn from(wire: MovieWire) -> Self {
        Self {
            id: wire.id,
            title: wire.title.unwrap_or_default(),
            release_year: wire.release_date.as_deref().and_then(parse_year),
            rating: wire.vote_average.map(|rating| rating.clamp(0.0, 10.0)),
            overview: non_empty(wire.overview),
            poster: non_empty(wire.poster_path).map(PosterRef::new),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListWire {
    #[serde(default)]
    pub results: Vec<VideoWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoWire {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl VideoListWire {
    /// First entry typed "Trailer" and hosted on YouTube.
    pub fn into_trailer(self) -> Option<Trailer> {
        self.results
            .into_iter()
            .find(|video| video.kind == "Trailer" && video.site == "YouTube")
            .map(|video| Trailer {
                key: video.key,
                name: video.name,
            })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsWire {
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<GenreWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreWire {
    pub name: String,
}

impl From<DetailsWire> for MovieDetails {
    fn from(wire: DetailsWire) -> Self {
        Self {
            runtime_minutes: wire.runtime,
            genres: wire.genres.into_iter().map(|genre| genre.name).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Archive provider wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveSearchWire {
    pub response: ArchiveResponseWire,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponseWire {
    #[serde(default)]
    pub docs: Vec<ArchiveDocWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveDocWire {
    pub identifier: String,
    #[serde(default, deserialize_with = "first_of_one_or_many")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "first_of_one_or_many")]
    pub format: Option<String>,
}

impl From<ArchiveDocWire> for ArchiveItem {
    fn from(doc: ArchiveDocWire) -> Self {
        let title = doc.title.unwrap_or_else(|| doc.identifier.clone());
        Self {
            identifier: doc.identifier,
            title,
            format: doc.format,
        }
    }
}

/// Archive search returns some fields as a string or as a list of strings.
fn first_of_one_or_many<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => Some(value),
        Some(OneOrMany::Many(values)) => values.into_iter().next(),
        None => None,
    })
}

// ---------------------------------------------------------------------------
// Local catalog file format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct LocalMovieWire {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default, alias = "description")]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default, alias = "genres", deserialize_with = "genre_list")]
    pub genre: Vec<String>,
    #[serde(default)]
    pub runtime: Option<RuntimeWire>,
}

/// Runtime as whole minutes or as text such as `"1h 34m"` or `"94 min"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RuntimeWire {
    Minutes(u32),
    Text(String),
}

impl RuntimeWire {
    fn minutes(&self) -> Option<u32> {
        match self {
            RuntimeWire::Minutes(minutes) => Some(*minutes),
            RuntimeWire::Text(text) => parse_runtime(text),
        }
    }
}

impl LocalMovieWire {
    /// Runtime and genres, if the entry carries either.
    pub fn details(&self) -> Option<MovieDetails> {
        let runtime_minutes = self.runtime.as_ref().and_then(RuntimeWire::minutes);
        if runtime_minutes.is_none() && self.genre.is_empty() {
            return None;
        }
        Some(MovieDetails {
            runtime_minutes,
            genres: self.genre.clone(),
        })
    }

    pub fn into_item(self, id: u64) -> ResultItem {
        ResultItem {
            id,
            title: self.title,
            release_year: self.year,
            rating: self.rating.map(|rating| rating.clamp(0.0, 10.0)),
            overview: non_empty(self.overview),
            poster: non_empty(self.poster).map(PosterRef::new),
        }
    }
}

/// A single `"Horror, Drama"` string or a list of genre names.
fn genre_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let names = match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => value.split([',', '/']).map(str::to_string).collect(),
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    };
    Ok(names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

/// `"1h 34m"`, `"2h"`, `"94 min"` and `"94"` all parse. A number followed
/// by `h` counts as hours, any other number as minutes.
fn parse_runtime(text: &str) -> Option<u32> {
    let compact: String = text
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_lowercase())
        .collect();

    let mut total: Option<u32> = None;
    let mut chars = compact.chars().peekable();
    while let Some(ch) = chars.next() {
        let Some(digit) = ch.to_digit(10) else {
            continue;
        };
        let mut value = digit;
        while let Some(next) = chars.peek().and_then(|ch| ch.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(next);
            chars.next();
        }
        let minutes = if chars.peek() == Some(&'h') {
            value.saturating_mul(60)
        } else {
            value
        };
        total = Some(total.unwrap_or(0).saturating_add(minutes));
    }
    total
}

fn parse_year(date: &str) -> Option<i32> {
    date.split('-').next()?.trim().parse().ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
