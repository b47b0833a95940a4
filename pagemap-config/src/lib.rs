//! Shared configuration loader for pagemap.
//!
//! `defaults/pagemap.default.toml` is embedded into the binary so the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and CLI
//! overrides on top of those defaults via [`Loader`] before deserializing into
//! [`PagemapConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use pagemap::mapping::{AnchorOptions, InsertPolicy, OffsetOptions, ScanBound};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/pagemap.default.toml");

/// Top-level configuration consumed by the pagemap binary.
#[derive(Debug, Clone, Deserialize)]
pub struct PagemapConfig {
    pub anchors: AnchorsConfig,
    pub extract: ScanConfig,
    pub build: ScanConfig,
    pub offset: OffsetConfig,
    pub report: ReportConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnchorsConfig {
    pub policy: InsertPolicy,
}

/// How far an anchor scan reads.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub scan: ScanMode,
    /// Page count used by [`ScanMode::FirstPages`].
    pub window: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    Full,
    UntilGap,
    FirstPages,
}

impl ScanConfig {
    pub fn bound(&self) -> ScanBound {
        match self.scan {
            ScanMode::Full => ScanBound::Full,
            ScanMode::UntilGap => ScanBound::UntilGap,
            ScanMode::FirstPages => ScanBound::FirstPages(self.window),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OffsetConfig {
    pub scan_window: usize,
    pub max_logical_page: u32,
    pub default_offset: u32,
}

/// Sample sizes of the extraction report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub sample_links: usize,
    pub sample_mappings: usize,
}

/// Where `pagemap build` keeps its mapping files.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub dir_name: String,
    pub file_suffix: String,
    pub reuse_existing: bool,
}

impl PagemapConfig {
    /// Anchor strategy options for `pagemap extract`.
    pub fn extract_options(&self) -> AnchorOptions {
        AnchorOptions {
            scan: self.extract.bound(),
            policy: self.anchors.policy,
        }
    }

    /// Anchor strategy options for the anchor document of `pagemap build`.
    pub fn build_options(&self) -> AnchorOptions {
        AnchorOptions {
            scan: self.build.bound(),
            policy: self.anchors.policy,
        }
    }

    pub fn offset_options(&self) -> OffsetOptions {
        OffsetOptions {
            scan: ScanBound::FirstPages(self.offset.scan_window),
            max_logical_page: self.offset.max_logical_page,
            default_offset: self.offset.default_offset,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer, defaults first, and deserialize the result.
    pub fn build(self) -> Result<PagemapConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PagemapConfig, ConfigError> {
    Loader::new().build()
}
