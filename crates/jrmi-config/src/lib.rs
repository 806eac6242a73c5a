//! `jrmi.toml` loading and tracing initialisation.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Once, OnceLock};

use jrmi_jmx::{Addressing, ClassUidTable, MarshalledObjectHash, RmiConnectionStub};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

/// File name looked up when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "jrmi.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JmxConfig {
    /// Default target of every call; command-line flags take precedence.
    pub addressing: Addressing,

    pub marshalled_object_hash: HashSetting,

    /// serialVersionUID overrides, merged over the JRE defaults.
    pub serial_version_uids: BTreeMap<String, i64>,

    pub logging: LoggingConfig,
}

/// `hash` written into `MarshalledObject`: a literal `int`, or `"content"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HashSetting {
    Fixed(i32),
    Computed(HashPolicy),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashPolicy {
    Content,
}

impl Default for HashSetting {
    fn default() -> Self {
        MarshalledObjectHash::default().into()
    }
}

impl From<MarshalledObjectHash> for HashSetting {
    fn from(hash: MarshalledObjectHash) -> Self {
        match hash {
            MarshalledObjectHash::Fixed(value) => HashSetting::Fixed(value),
            MarshalledObjectHash::Content => HashSetting::Computed(HashPolicy::Content),
        }
    }
}

impl From<HashSetting> for MarshalledObjectHash {
    fn from(setting: HashSetting) -> Self {
        match setting {
            HashSetting::Fixed(value) => MarshalledObjectHash::Fixed(value),
            HashSetting::Computed(HashPolicy::Content) => MarshalledObjectHash::Content,
        }
    }
}

impl JmxConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::load_from_str(&text)?;
        tracing::debug!(
            target: "jrmi.config",
            path = %path.display(),
            uid_overrides = config.serial_version_uids.len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads `path` when given, otherwise `jrmi.toml` from `dir` if present,
    /// otherwise the defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load_from_path(candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn class_uids(&self) -> ClassUidTable {
        self.serial_version_uids
            .iter()
            .fold(ClassUidTable::jre(), |table, (class, uid)| {
                table.with_uid(class.as_str(), *uid)
            })
    }

    pub fn stub(&self) -> RmiConnectionStub {
        RmiConnectionStub::new(self.class_uids(), self.marshalled_object_hash.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,

    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            // Plain levels accept any casing and the `warning` synonym.
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is an `EnvFilter` directive string such as
            // `info,jrmi.jmx=trace`.
            _ => trimmed.to_owned(),
        }
    }

    /// Filter from `level` alone; an unparsable directive string falls back
    /// to `info`.
    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// Effective `EnvFilter` for the jrmi crates.
    ///
    /// `level` may be a simple level (`info`, `debug`, ...) or a full
    /// directive string targeting `jrmi.jmx`, `jrmi.proto`, `jrmi.config` or
    /// `jrmi.cli`. A non-empty `RUST_LOG` is appended after the configured
    /// directives so its more specific entries win; if the combination does
    /// not parse, `RUST_LOG` alone is tried, then the configured level.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // `Display` embeds a snippet of the input; keep only the message.
        ConfigError::Toml(sanitize_toml_error_message(err.message()))
    }
}

/// Redacts user-provided values from a TOML/serde diagnostic.
///
/// Quoted strings are always replaced. Backticked segments are replaced after
/// `unknown field`/`unknown variant` and in the value part of `invalid
/// type`/`invalid value`; schema names such as `missing field` keep theirs.
fn sanitize_toml_error_message(message: &str) -> String {
    static QUOTED_STRING_RE: OnceLock<Option<regex::Regex>> = OnceLock::new();
    static SINGLE_QUOTED_STRING_RE: OnceLock<Option<regex::Regex>> = OnceLock::new();

    let mut out = message.to_owned();
    let double = QUOTED_STRING_RE.get_or_init(|| regex::Regex::new(r#""(?:\\.|[^"\\])*""#).ok());
    if let Some(re) = double {
        out = re.replace_all(&out, r#""<redacted>""#).into_owned();
    }
    let single =
        SINGLE_QUOTED_STRING_RE.get_or_init(|| regex::Regex::new(r#"'(?:\\.|[^'\\])*'"#).ok());
    if let Some(re) = single {
        out = re.replace_all(&out, "'<redacted>'").into_owned();
    }

    let mut start = ["unknown field `", "unknown variant `"]
        .iter()
        .filter_map(|pattern| out.find(pattern).map(|pos| pos + pattern.len() - 1))
        .min();
    if start.is_none() && (out.contains("invalid type:") || out.contains("invalid value:")) {
        let boundary = out.find(", expected").unwrap_or(out.len());
        start = out[..boundary].find('`');
    }
    if let Some(start) = start {
        let after_start = &out[start + 1..];
        let end = after_start
            .rfind("`, expected")
            .or_else(|| after_start.rfind('`'))
            .map(|end_rel| start + 1 + end_rel);
        if let Some(end) = end {
            out.replace_range(start + 1..end, "<redacted>");
        }
    }

    out
}

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let make_writer = if !config.stderr {
            BoxMakeWriter::new(std::io::sink)
        } else if cfg!(debug_assertions) {
            // Captured by the test harness.
            BoxMakeWriter::new(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
        } else {
            BoxMakeWriter::new(std::io::stderr)
        };

        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!(
                target: "jrmi.config",
                level = %config.level,
                json = config.json,
                "tracing initialised"
            );
        }
    });
}
