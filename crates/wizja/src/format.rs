use serde::{Deserialize, Serialize};

/// One downloadable stream variant described by a manifest.
///
/// `id` is unique within the manifest it was parsed from; callers that
/// merge formats from multiple manifests are expected to rewrite it.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FormatDescriptor {
    pub id: String,

    /// Resolved media URL, or a URL template when the manifest only
    /// provides per-segment addressing.
    pub url: String,

    /// Human-readable description of the format.
    pub note: Option<String>,

    /// Hint for format selection when multiple formats are otherwise
    /// equally suitable. Lower values are preferred.
    pub source_preference: i32,

    pub width: Option<u64>,
    pub height: Option<u64>,
    pub bandwidth: Option<u64>,
    pub codecs: Option<String>,
    pub mime_type: Option<String>,
    pub frame_rate: Option<String>,
    pub language: Option<String>,
}

impl FormatDescriptor {
    pub fn resolution(&self) -> Option<String> {
        self.width
            .and_then(|w| self.height.map(|h| (w, h)))
            .map(|(w, h)| format!("{w}x{h}"))
    }
}
