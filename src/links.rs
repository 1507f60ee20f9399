//! Outbound search links to streaming platforms.
//!
//! Pure string building; nothing here touches the network.

use reqwest::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLink {
    pub platform: &'static str,
    pub url: String,
}

struct PlatformTemplate {
    name: &'static str,
    base: &'static str,
    query_param: &'static str,
    extra: &'static [(&'static str, &'static str)],
}

const PLATFORMS: &[PlatformTemplate] = &[
    PlatformTemplate {
        name: "Netflix",
        base: "https://www.netflix.com/search",
        query_param: "q",
        extra: &[],
    },
    PlatformTemplate {
        name: "Prime Video",
        base: "https://www.amazon.com/s",
        query_param: "k",
        extra: &[("i", "instant-video")],
    },
    PlatformTemplate {
        name: "Disney+",
        base: "https://www.disneyplus.com/search",
        query_param: "q",
        extra: &[],
    },
    PlatformTemplate {
        name: "Hulu",
        base: "https://www.hulu.com/search",
        query_param: "q",
        extra: &[],
    },
    PlatformTemplate {
        name: "Apple TV",
        base: "https://tv.apple.com/search",
        query_param: "term",
        extra: &[],
    },
    PlatformTemplate {
        name: "YouTube",
        base: "https://www.youtube.com/results",
        query_param: "search_query",
        extra: &[],
    },
    PlatformTemplate {
        name: "Internet Archive",
        base: "https://archive.org/search",
        query_param: "query",
        extra: &[],
    },
];

/// Search URLs for `title` on every known platform, in display order.
pub fn platform_links(title: &str) -> Vec<PlatformLink> {
    let title = title.trim();
    PLATFORMS
        .iter()
        .filter_map(|template| {
            let mut url = Url::parse(template.base).ok()?;
            {
                let mut pairs = url.query_pairs_mut();
                pairs.append_pair(template.query_param, title);
                for (key, value) in template.extra {
                    pairs.append_pair(key, value);
                }
            }
            Some(PlatformLink {
                platform: template.name,
                url: url.into(),
            })
        })
        .collect()
}
