use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::NoticeConfig;
use crate::error::RequestError;

/// Surfaces request errors to the operator, at most once per error code
/// within the suppression window.
pub struct ErrorNotifier {
    window: Duration,
    silent_codes: Vec<String>,
    shown: Mutex<HashMap<String, Instant>>,
}

impl ErrorNotifier {
    pub fn new(config: &NoticeConfig) -> Self {
        Self {
            window: Duration::from_secs(config.suppress_window_secs),
            silent_codes: config.silent_codes.clone(),
            shown: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            silent_codes: Vec::new(),
            shown: Mutex::new(HashMap::new()),
        }
    }

    /// Show `err` unless it has no message, its code is silenced, or the same
    /// code is still inside its window. Returns whether it was shown.
    pub fn show(&self, err: &RequestError) -> bool {
        if err.msg.is_empty() {
            return false;
        }
        let code = err.code.to_string();
        if self.silent_codes.contains(&code) {
            return false;
        }

        let now = Instant::now();
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        shown.retain(|_, at| now.duration_since(*at) < self.window);
        if shown.contains_key(&code) {
            return false;
        }
        shown.insert(code.clone(), now);
        drop(shown);

        tracing::warn!(kind = ?err.kind, code = %code, "{}", err.msg);
        true
    }
}
