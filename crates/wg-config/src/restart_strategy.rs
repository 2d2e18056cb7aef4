use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recovery policy applied after a terminal WebView failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestartStrategy {
    /// Plain reload of the current page
    #[default]
    Reload,
    /// Reload bypassing caches, when the surface supports it
    ReloadFromOrigin,
    /// Navigate to the configured fallback URL
    CustomUrl,
}

impl RestartStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestartStrategy::Reload => "reload",
            RestartStrategy::ReloadFromOrigin => "reloadFromOrigin",
            RestartStrategy::CustomUrl => "customUrl",
        }
    }
}

impl fmt::Display for RestartStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestartStrategy {
    type Err = String;

    /// Case-insensitive; `_` and `-` separators are ignored so that
    /// `reloadFromOrigin`, `RELOAD_FROM_ORIGIN` and `reload-from-origin` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "reload" => Ok(RestartStrategy::Reload),
            "reloadfromorigin" => Ok(RestartStrategy::ReloadFromOrigin),
            "customurl" => Ok(RestartStrategy::CustomUrl),
            _ => Err(format!("unknown restart strategy '{s}'")),
        }
    }
}
