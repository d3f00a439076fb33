//! Environment-driven configuration.
//!
//! The process environment is read once into an [`EnvSnapshot`]; every
//! component receives the snapshot (or [`Settings`] derived from it) instead
//! of calling `std::env` itself.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::warn;

/// Default timeout for a provider request (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Skip generation and commit the user-supplied message.
pub const SKIP_ENV_VAR: &str = "SCRIBE_SKIP";

/// Model override for the selected provider.
pub const MODEL_ENV_VAR: &str = "SCRIBE_MODEL";

/// Base URL override for the selected provider.
pub const API_BASE_ENV_VAR: &str = "SCRIBE_API_BASE";

/// Request timeout override, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "SCRIBE_TIMEOUT";

/// Editors tried on `PATH` when nothing is configured.
const FALLBACK_EDITORS: [&str; 3] = ["nano", "vim", "vi"];

/// An immutable copy of the environment variables relevant to a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        Self::from_pairs(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable, treating empty and whitespace-only values as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Whether a variable holds a truthy value (`1`, `true`, `yes`, `on`).
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
    }
}

/// Runtime settings derived from the environment snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub skip_generation: bool,
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skip_generation: false,
            model: None,
            api_base: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self {
            skip_generation: env.flag(SKIP_ENV_VAR),
            model: env.get(MODEL_ENV_VAR).map(|m| m.trim().to_string()),
            api_base: env
                .get(API_BASE_ENV_VAR)
                .map(|b| b.trim().trim_end_matches('/').to_string()),
            timeout: parse_timeout(env),
        }
    }
}

/// Read the request timeout.
///
/// Logs a warning if the variable is set but is not a positive number of
/// seconds, and falls back to the default.
fn parse_timeout(env: &EnvSnapshot) -> Duration {
    match env.get(TIMEOUT_ENV_VAR) {
        Some(v) => match v.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Pick the editor command the way git does.
///
/// Order: `GIT_EDITOR`, `core.editor`, `VISUAL`, `EDITOR`, then the first of
/// nano/vim/vi found on `PATH`. Returns `None` if nothing is usable.
pub fn resolve_editor(env: &EnvSnapshot, core_editor: Option<&str>) -> Option<String> {
    let configured = env
        .get("GIT_EDITOR")
        .or(core_editor.filter(|e| !e.trim().is_empty()))
        .or_else(|| env.get("VISUAL"))
        .or_else(|| env.get("EDITOR"));

    if let Some(editor) = configured {
        return Some(editor.trim().to_string());
    }

    FALLBACK_EDITORS
        .iter()
        .find(|name| which::which(name).is_ok())
        .map(|name| (*name).to_string())
}
