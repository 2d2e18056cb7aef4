
use crate::{EvalError, RenderSurface, SurfaceError, SurfaceResult};

use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

/// Surface that only records the restart commands it receives
#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub(crate) supports_origin: bool,
    pub(crate) fail_commands: bool,
    pub(crate) commands: Mutex<Vec<String>>,
}

impl RecordingSurface {
    pub(crate) fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, command: String) -> SurfaceResult<()> {
        self.commands.lock().unwrap().push(command);
        if self.fail_commands {
            return Err(SurfaceError::new(operation, "window closed"));
        }
        Ok(())
    }
}

#[async_trait]
impl RenderSurface for RecordingSurface {
    async fn evaluate_script(&self, _script: &str) -> Result<(), EvalError> {
        Ok(())
    }

    fn reload(&self) -> SurfaceResult<()> {
        self.record("reload", "reload".into())
    }

    fn supports_reload_from_origin(&self) -> bool {
        self.supports_origin
    }

    fn reload_from_origin(&self) -> SurfaceResult<()> {
        self.record("reload_from_origin", "reloadFromOrigin".into())
    }

    fn load_url(&self, url: &Url) -> SurfaceResult<()> {
        self.record("load_url", format!("load {url}"))
    }
}
