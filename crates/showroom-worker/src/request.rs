use serde::{Deserialize, Serialize};

/// Identifies one asset to fetch and decode. Created per load; consumed by
/// the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequest {
    /// HTTP(S) URL or local filesystem path of the binary scene asset.
    pub url: String,
    /// Optional path to a geometry-decompression decoder. Accepted for
    /// forward compatibility; no decoder is wired up yet.
    #[serde(
        rename = "dracoPath",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub decoder_path: Option<String>,
}

impl LoadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            decoder_path: None,
        }
    }

    pub fn with_decoder_path(mut self, path: impl Into<String>) -> Self {
        self.decoder_path = Some(path.into());
        self
    }
}
