use std::env;
use std::fs;
use std::path::Path;

use assay_core::errors::{AssayError, ErrorInfo};
use assay_core::{Outcome, Polarity};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::reporter::{JsonDiff, Reporter, TextDiff};

/// Environment variable naming a policy file read by [`AssertPolicy::from_env`].
pub const POLICY_ENV: &str = "ASSAY_POLICY";

/// Failure message layout selected by the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Two-block textual diff.
    #[default]
    Text,
    /// Single JSON document.
    Json,
}

/// Policy controlling how assertions decide and report failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssertPolicy {
    /// Layout of failure messages.
    #[serde(default)]
    pub render: RenderStyle,
    /// Attribute failures to the calling test code when the host supports it.
    #[serde(default = "AssertPolicy::default_helper_frames")]
    pub helper_frames: bool,
    /// Fail equality assertions whose values have unrelated types.
    ///
    /// Off by default: such assertions historically pass silently.
    #[serde(default)]
    pub strict_incomparable: bool,
}

impl AssertPolicy {
    const fn default_helper_frames() -> bool {
        true
    }

    /// Returns whether `outcome` fails an assertion of `polarity` under this policy.
    pub fn fails(&self, polarity: Polarity, outcome: Outcome) -> bool {
        if self.strict_incomparable {
            polarity.fails_strict(outcome)
        } else {
            polarity.fails(outcome)
        }
    }

    /// Builds the reporter selected by [`AssertPolicy::render`].
    pub fn reporter(&self) -> Box<dyn Reporter> {
        match self.render {
            RenderStyle::Text => Box::new(TextDiff),
            RenderStyle::Json => Box::new(JsonDiff::default()),
        }
    }

    /// Parses a TOML policy document.
    pub fn from_toml_str(raw: &str) -> Result<Self, AssayError> {
        toml::from_str(raw).map_err(|err| {
            AssayError::Config(
                ErrorInfo::new("assay.policy_parse", err.to_string()).with_context("format", "toml"),
            )
        })
    }

    /// Parses a JSON policy document.
    pub fn from_json_str(raw: &str) -> Result<Self, AssayError> {
        serde_json::from_str(raw).map_err(|err| {
            AssayError::Config(
                ErrorInfo::new("assay.policy_parse", err.to_string()).with_context("format", "json"),
            )
        })
    }

    /// Loads a policy file; `.json` files are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssayError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            AssayError::Config(
                ErrorInfo::new("assay.policy_io", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json_str(&raw)
        } else {
            Self::from_toml_str(&raw)
        };
        let policy = parsed.map_err(|err| match err {
            AssayError::Config(info) => {
                AssayError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })?;
        debug!("loaded assertion policy from {}: {policy:?}", path.display());
        Ok(policy)
    }

    /// Loads the policy named by [`POLICY_ENV`], or the default policy when it is unset.
    pub fn from_env() -> Result<Self, AssayError> {
        match env::var_os(POLICY_ENV) {
            Some(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for AssertPolicy {
    fn default() -> Self {
        Self {
            render: RenderStyle::default(),
            helper_frames: Self::default_helper_frames(),
            strict_incomparable: false,
        }
    }
}
