pub use async_trait::async_trait;
use serde::{Deserialize, Serialize};
pub use wizja::FormatDescriptor;

pub struct InspectorArgs {
    inner: std::collections::HashMap<String, String>,
}

impl InspectorArgs {
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.to_string())
    }

    pub fn env(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    pub fn from_key_value(input: &[String]) -> Self {
        let args: std::collections::HashMap<String, String> = input
            .iter()
            .filter_map(|s| {
                let (key, value) = s.split_once('=')?;
                Some((key.to_string(), value.to_string()))
            })
            .collect();
        Self { inner: args }
    }
}

pub trait InspectorBuilder {
    fn name(&self) -> String;

    fn help(&self) -> Vec<String> {
        vec!["No help available".to_string()]
    }

    fn build(&self, args: &InspectorArgs) -> anyhow::Result<Box<dyn Inspect>>;
}

#[async_trait]
pub trait Inspect: Send + Sync {
    /// Check if this handler can handle the URL
    async fn matches(&self, url: &str) -> bool;

    /// Inspect the URL and return the result
    async fn inspect(&self, url: &str) -> anyhow::Result<InspectResult>;
}

#[derive(Serialize, Deserialize, Debug)]
pub enum InspectResult {
    /// This site handler can not handle this URL
    NotMatch,
    /// Inspect data is found
    Media(MediaInfo),
    /// Inspect data is not found
    None,
}

/// The record an extractor hands back to the host: a stable document id,
/// a display title and every stream format the site offers for it.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct MediaInfo {
    pub id: String,

    pub title: String,

    /// Formats in source order; `source_preference` breaks ties between
    /// otherwise equal formats.
    pub formats: Vec<FormatDescriptor>,
}

pub trait InspectExt: Inspect {
    fn to_box(self) -> Box<Self>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

impl<T: Inspect> InspectExt for T {}

#[cfg(test)]
mod tests {
    use super::InspectorArgs;

    #[test]
    fn test_args_from_key_value() {
        let args = InspectorArgs::from_key_value(&[
            "sejm-language=pl".to_string(),
            "malformed".to_string(),
        ]);
        assert_eq!(args.get("sejm-language"), Some("pl".to_string()));
        assert_eq!(args.get("malformed"), None);
    }
}
