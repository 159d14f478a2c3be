use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub notice: NoticeConfig,
    pub router: RouterConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub prefix: String,
    pub nation: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeConfig {
    pub suppress_window_secs: u64,
    pub silent_codes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    pub cache_name_prefix: String,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the persisted `token` / `userInfo` entries.
    /// `None` resolves to `$HOME/.config/admin-console`.
    pub storage_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("API_PREFIX") {
            self.api.prefix = v;
        }
        if let Ok(v) = env::var("API_NATION") {
            self.api.nation = v;
        }
        if let Ok(v) = env::var("API_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().unwrap_or(self.api.timeout_secs);
        }

        // Notice overrides
        if let Ok(v) = env::var("NOTICE_SUPPRESS_WINDOW_SECS") {
            self.notice.suppress_window_secs = v.parse().unwrap_or(self.notice.suppress_window_secs);
        }
        if let Ok(v) = env::var("NOTICE_SILENT_CODES") {
            self.notice.silent_codes = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Router overrides
        if let Ok(v) = env::var("ROUTER_CACHE_NAME_PREFIX") {
            self.router.cache_name_prefix = v;
        }
        if let Ok(v) = env::var("ROUTER_DEBUG_LOGGING") {
            self.router.debug_logging = v.parse().unwrap_or(self.router.debug_logging);
        }

        // Session overrides
        if let Ok(v) = env::var("ADMIN_CONSOLE_DIR") {
            self.session.storage_dir = Some(PathBuf::from(v));
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:3001".to_string(),
                prefix: "/admin".to_string(),
                nation: "en".to_string(),
                timeout_secs: 30,
            },
            notice: NoticeConfig {
                suppress_window_secs: 3,
                silent_codes: Vec::new(),
            },
            router: RouterConfig {
                cache_name_prefix: "App".to_string(),
                debug_logging: true,
            },
            session: SessionConfig { storage_dir: None },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.example.com".to_string(),
                prefix: "/admin".to_string(),
                nation: "en".to_string(),
                timeout_secs: 15,
            },
            notice: NoticeConfig {
                suppress_window_secs: 3,
                silent_codes: Vec::new(),
            },
            router: RouterConfig {
                cache_name_prefix: "App".to_string(),
                debug_logging: false,
            },
            session: SessionConfig { storage_dir: None },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: String::new(),
                prefix: "/admin".to_string(),
                nation: "en".to_string(),
                timeout_secs: 10,
            },
            notice: NoticeConfig {
                suppress_window_secs: 3,
                silent_codes: Vec::new(),
            },
            router: RouterConfig {
                cache_name_prefix: "App".to_string(),
                debug_logging: false,
            },
            session: SessionConfig { storage_dir: None },
        }
    }
}

impl SessionConfig {
    pub fn resolve_storage_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        let home = env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        Ok(PathBuf::from(home).join(".config").join("admin-console"))
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
