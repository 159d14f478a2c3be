use std::sync::Arc;

use anyhow::Context;

use crate::api::{AdminApi, ApiClient, ErrorNotifier};
use crate::config::{config, AppConfig};
use crate::session::{AppContext, FileStorage, Storage};

/// Everything a command needs, wired from the process configuration
pub struct Console {
    pub client: Arc<ApiClient>,
    pub storage: Arc<FileStorage>,
    pub ctx: AppContext,
}

impl Console {
    pub fn open() -> anyhow::Result<Self> {
        Self::with_config(config().clone())
    }

    pub fn with_config(config: AppConfig) -> anyhow::Result<Self> {
        let dir = config.session.resolve_storage_dir()?;
        let storage = Arc::new(
            FileStorage::open(&dir).with_context(|| format!("cannot open session storage at {}", dir.display()))?,
        );
        let notifier = Arc::new(ErrorNotifier::new(&config.notice));
        let client = Arc::new(ApiClient::new(
            &config.api,
            Arc::clone(&storage) as Arc<dyn Storage>,
            notifier,
        )?);

        tracing::debug!("session storage at {}, api {}", dir.display(), config.api.base_url);

        let ctx = AppContext::new(
            config,
            Arc::clone(&storage) as Arc<dyn Storage>,
            Arc::clone(&client) as Arc<dyn AdminApi>,
        );
        Ok(Self { client, storage, ctx })
    }

    /// Require a logged-in session with its routes built
    pub async fn ready(&self) -> anyhow::Result<()> {
        if !self.ctx.auth.is_login() {
            anyhow::bail!("Not logged in. Use 'admin auth login <email>' first");
        }
        self.ctx.route.init_auth_route().await?;
        Ok(())
    }
}
