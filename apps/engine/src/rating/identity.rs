use std::fmt;

use serde::{Deserialize, Serialize};

/// Who sits in a seat: an engine family, a model, its version and an
/// optional endpoint. The rendered key is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub engine: String,
    pub model: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl PlayerIdentity {
    pub fn new(
        engine: impl Into<String>,
        model: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            engine: engine.into(),
            model: model.into(),
            version: version.into(),
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// `engine/model@version`, plus `#endpoint` when present.
    pub fn key(&self) -> String {
        let mut key = format!("{}/{}@{}", self.engine, self.model, self.version);
        if let Some(ep) = &self.endpoint {
            key.push('#');
            key.push_str(ep);
        }
        key
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
