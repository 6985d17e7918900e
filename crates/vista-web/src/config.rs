#![forbid(unsafe_code)]

//! Page-embedded configuration.
//!
//! A page may carry a JSON block
//!
//! ```html
//! <script type="application/json" id="vista-config">
//!   { "log_level": "debug", "toast": { "duration_ms": 3000 } }
//! </script>
//! ```
//!
//! whose keys override [`UiConfig`] defaults. A missing or blank block means
//! stock behaviour.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Malformed JSON | Hand-edited page | `Err(UiError::Config)`; bootstrap logs it and uses defaults |

use vista_core::UiError;
use vista_runtime::UiConfig;

/// Id of the element holding the JSON overrides.
pub const CONFIG_ELEMENT_ID: &str = "vista-config";

/// Parse the text content of the config block.
pub fn resolve(source: Option<&str>) -> Result<UiConfig, UiError> {
    match source.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => UiConfig::from_json_str(json),
        None => Ok(UiConfig::default()),
    }
}

/// [`resolve`], falling back to defaults on a malformed block. The rejection
/// is handed back so it can be logged once logging is up.
#[must_use]
pub fn resolve_or_default(source: Option<&str>) -> (UiConfig, Option<UiError>) {
    match resolve(source) {
        Ok(config) => (config, None),
        Err(err) => (UiConfig::default(), Some(err)),
    }
}
