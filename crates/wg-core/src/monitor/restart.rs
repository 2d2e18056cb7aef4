use crate::{RenderSurface, RestartStrategy, SurfaceResult};

use std::fmt;

use url::Url;

/// Concrete command issued to the surface for a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartAction {
    Reload,
    ReloadFromOrigin,
    LoadUrl(Url),
}

impl RestartAction {
    /// Resolve a strategy against what is configured and what the surface supports.
    ///
    /// Missing capabilities and a missing custom URL fall back to a plain reload.
    pub fn select(
        strategy: RestartStrategy,
        custom_url: Option<&Url>,
        supports_reload_from_origin: bool,
    ) -> Self {
        match strategy {
            RestartStrategy::ReloadFromOrigin if supports_reload_from_origin => {
                RestartAction::ReloadFromOrigin
            }
            RestartStrategy::CustomUrl => match custom_url {
                Some(url) => RestartAction::LoadUrl(url.clone()),
                None => RestartAction::Reload,
            },
            _ => RestartAction::Reload,
        }
    }

    /// Fire the command; does not wait for the page to load.
    pub fn issue(&self, surface: &dyn RenderSurface) -> SurfaceResult<()> {
        match self {
            RestartAction::Reload => surface.reload(),
            RestartAction::ReloadFromOrigin => surface.reload_from_origin(),
            RestartAction::LoadUrl(url) => surface.load_url(url),
        }
    }
}

impl fmt::Display for RestartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartAction::Reload => f.write_str("reload"),
            RestartAction::ReloadFromOrigin => f.write_str("reloadFromOrigin"),
            RestartAction::LoadUrl(url) => write!(f, "load {url}"),
        }
    }
}
