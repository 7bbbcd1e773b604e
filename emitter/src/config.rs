//! Emitter configuration.
//!
//! The defaults reproduce the plain broker semantics: the first failing handler
//! aborts the emit, and every enrollment adds a receiver even if the instance is
//! already present.
//!
//! ```rust,ignore
//! let config = Config::new()
//!     .with_dispatch(DispatchMode::Isolated)
//!     .with_dedupe_enrollment(true);
//! let emitter = Emitter::<u32>::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// How handler failures affect the rest of an emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// The first handler error stops dispatch and is returned from `emit`.
    #[default]
    FailFast,
    /// Handler errors are logged and dispatch continues with the next receiver.
    Isolated,
}

/// Configuration for an [`Emitter`](crate::Emitter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Handler failure policy.
    #[serde(default)]
    pub dispatch: DispatchMode,

    /// Skip enrolling an instance that is already in its type's live set.
    #[serde(default)]
    pub dedupe_enrollment: bool,
}

impl Config {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handler failure policy.
    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Enable or disable enrollment deduplication.
    pub fn with_dedupe_enrollment(mut self, dedupe: bool) -> Self {
        self.dedupe_enrollment = dedupe;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fail_fast_without_dedupe() {
        let config = Config::default();

        assert_eq!(config.dispatch, DispatchMode::FailFast);
        assert!(!config.dedupe_enrollment);
    }

    #[test]
    fn builder_sets_fields() {
        let config = Config::new()
            .with_dispatch(DispatchMode::Isolated)
            .with_dedupe_enrollment(true);

        assert_eq!(config.dispatch, DispatchMode::Isolated);
        assert!(config.dedupe_enrollment);
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() {
        // Given
        let json = r#"{ "dispatch": "isolated" }"#;

        // When
        let config: Config = serde_json::from_str(json).unwrap();

        // Then
        assert_eq!(config.dispatch, DispatchMode::Isolated);
        assert!(!config.dedupe_enrollment);
    }

    #[test]
    fn deserialize_empty_object() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config, Config::default());
    }
}
