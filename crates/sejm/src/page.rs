use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

static IFRAME_SRC_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"var IFRAME_SRC = "(.*?)";"#).unwrap());
static START_REGEXP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""start":"(.*?)""#).unwrap());
static STOP_REGEXP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""stop":"(.*?)""#).unwrap());
static TITLE_REGEXP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<title>(.*?)</title>").unwrap());

static CAMERAS_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)var cameras = \[(.+)\];").unwrap());
static CAMERA_SOURCE_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"flv: "(.*?)""#).unwrap());

fn search<'a>(regexp: &Regex, html: &'a str, field: &str) -> Result<&'a str> {
    regexp
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|matched| matched.as_str())
        .ok_or_else(|| anyhow::anyhow!("unable to extract {field}"))
}

/// The transmission page. Player configuration is inlined into its
/// HTML as JavaScript assignments and a JSON parameter blob, so every
/// accessor is a plain text search, not an HTML parse.
pub struct TransmissionPage(String);

impl TransmissionPage {
    pub fn new(html: String) -> Self {
        Self(html)
    }

    /// Base URL of the embedded player frame, e.g.
    /// `https://sejm-embed.redcdn.pl/Sejm9.nsf/`.
    pub fn iframe_src(&self) -> Result<&str> {
        search(&IFRAME_SRC_REGEXP, &self.0, "IFRAME_SRC")
    }

    /// Transmission start, `YYYY-MM-DD HH:MM:SS` in the site's year-offset
    /// calendar.
    pub fn start(&self) -> Result<&str> {
        search(&START_REGEXP, &self.0, "start")
    }

    pub fn stop(&self) -> Result<&str> {
        search(&STOP_REGEXP, &self.0, "stop")
    }

    pub fn title(&self) -> Result<&str> {
        search(&TITLE_REGEXP, &self.0, "title")
    }
}

/// The player frame loaded inside the transmission page; it carries the
/// per-camera stream configuration.
pub struct EmbedPage(String);

impl EmbedPage {
    pub fn new(html: String) -> Self {
        Self(html)
    }

    /// Raw (backslash-escaped) stream source URL of every camera, in
    /// declaration order. The first camera is the director's cut.
    pub fn cameras(&self) -> Result<Vec<&str>> {
        let cameras = search(&CAMERAS_REGEXP, &self.0, "cameras")?;
        let sources: Vec<&str> = CAMERA_SOURCE_REGEXP
            .captures_iter(cameras)
            .filter_map(|captures| captures.get(1))
            .map(|matched| matched.as_str())
            .collect();

        if sources.is_empty() {
            anyhow::bail!("unable to extract camera sources");
        }
        Ok(sources)
    }
}
