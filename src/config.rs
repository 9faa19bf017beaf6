//! Variant configuration.
//!
//! Everything the resolver needs to know about which filename tags are
//! meaningful lives in one explicit [`VariantConfig`] value: the breakpoint
//! list, the hidpi tag and its media query, hidpi-only mode, and the
//! registered class variants. A config is built once per run, either through
//! [`VariantConfig::builder`] or loaded from a TOML file, and passed by
//! reference into every resolution.
//!
//! ## Configuration File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! hidpi_only = false        # Treat every image as the hidpi asset
//! order = "filename"        # "filename" or "declaration"
//!
//! [hidpi]
//! extension = "2x"
//! query = "(-webkit-min-device-pixel-ratio: 1.75), (min-resolution: 168dpi)"
//!
//! [[breakpoints]]
//! name = "medium"
//! min_width = "768px"       # CSS length, or a bare integer for pixels
//!
//! [[class_variants]]
//! name = "dark"             # Scoped under the `.dark` selector
//! tags = ["dark"]           # Every tag must be present on the filename
//! ```
//!
//! No breakpoints and no class variants are configured by default. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default tag marking a hidpi image (`hero.2x.jpg`).
pub const DEFAULT_HIDPI_EXTENSION: &str = "2x";

/// Default hidpi media query: two alternatives, OR'd.
pub const DEFAULT_HIDPI_QUERY: &str =
    "(-webkit-min-device-pixel-ratio: 1.75), (min-resolution: 168dpi)";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything that decides how variant filenames are interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantConfig {
    /// Serve every image as if it were already the hidpi asset.
    pub hidpi_only: bool,
    /// Ordering of the emitted variant rules after the base rule.
    pub order: VariantOrder,
    /// Hidpi tag and media query.
    pub hidpi: HidpiConfig,
    /// Named responsive breakpoints, in declaration order.
    pub breakpoints: Vec<Breakpoint>,
    /// Registered class variants, in registration order.
    pub class_variants: Vec<ClassVariant>,
}

/// How variant rules are ordered after the base rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantOrder {
    /// Byte-lexical order of the variant filenames, i.e. directory order.
    #[default]
    Filename,
    /// Breakpoint declaration order, hidpi after standard density within a
    /// breakpoint, then class registration order. Ties keep filename order.
    Declaration,
}

/// A named responsive breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    /// Tag used in filenames (e.g. `medium` in `hero.medium.jpg`).
    pub name: String,
    /// CSS length for the `min-width` feature (e.g. `"768px"`).
    #[serde(deserialize_with = "css_length")]
    pub min_width: String,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, min_width: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_width: min_width.into(),
        }
    }

    /// Breakpoint with a pixel width.
    pub fn px(name: impl Into<String>, width: u32) -> Self {
        Self::new(name, format!("{width}px"))
    }
}

/// Accept either a CSS length string or a bare integer meaning pixels.
fn css_length<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Length {
        Px(u32),
        Css(String),
    }

    Ok(match Length::deserialize(deserializer)? {
        Length::Px(px) => format!("{px}px"),
        Length::Css(css) => css,
    })
}

/// Hidpi tag and the media query it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HidpiConfig {
    /// Filename tag marking a hidpi image.
    pub extension: String,
    /// Media query; top-level commas separate OR'd alternatives.
    pub query: String,
}

impl Default for HidpiConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_HIDPI_EXTENSION.to_string(),
            query: DEFAULT_HIDPI_QUERY.to_string(),
        }
    }
}

impl HidpiConfig {
    /// The OR'd alternatives of the hidpi query.
    pub fn alternatives(&self) -> Vec<String> {
        crate::query::split_alternatives(&self.query)
    }
}

/// A registered class variant: a set of tags that, present together on a
/// filename, scope the image under the `.name` selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassVariant {
    pub name: String,
    pub tags: Vec<String>,
}

impl VariantConfig {
    /// Start building a config from the defaults.
    pub fn builder() -> VariantConfigBuilder {
        VariantConfigBuilder::default()
    }

    /// Position and definition of the breakpoint called `name`.
    pub fn breakpoint(&self, name: &str) -> Option<(usize, &Breakpoint)> {
        self.breakpoints
            .iter()
            .enumerate()
            .find(|(_, bp)| bp.name == name)
    }

    /// Register a class variant. A variant with the same name is replaced
    /// in place, keeping its registration position.
    pub fn add_class_image_variant<I, S>(&mut self, name: impl Into<String>, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variant = ClassVariant {
            name: name.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        };
        match self
            .class_variants
            .iter_mut()
            .find(|existing| existing.name == variant.name)
        {
            Some(existing) => *existing = variant,
            None => self.class_variants.push(variant),
        }
    }

    /// Forget every registered class variant.
    pub fn clear_image_variants(&mut self) {
        self.class_variants.clear();
    }

    /// Validate names and tags so that every filename tag has exactly one
    /// possible meaning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut breakpoint_names = HashSet::new();
        for bp in &self.breakpoints {
            check_tag("breakpoint name", &bp.name)?;
            if bp.min_width.trim().is_empty() {
                return Err(invalid(format!(
                    "breakpoint '{}' needs a min_width",
                    bp.name
                )));
            }
            if !breakpoint_names.insert(bp.name.as_str()) {
                return Err(invalid(format!("duplicate breakpoint '{}'", bp.name)));
            }
        }

        check_tag("hidpi.extension", &self.hidpi.extension)?;
        if breakpoint_names.contains(self.hidpi.extension.as_str()) {
            return Err(invalid(format!(
                "hidpi.extension '{}' is also a breakpoint name",
                self.hidpi.extension
            )));
        }
        if self.hidpi.alternatives().is_empty() {
            return Err(invalid("hidpi.query must not be empty".into()));
        }

        let mut class_names = HashSet::new();
        for class in &self.class_variants {
            if class.name.trim().is_empty() {
                return Err(invalid("class variant names must not be empty".into()));
            }
            if !class_names.insert(class.name.as_str()) {
                return Err(invalid(format!(
                    "duplicate class variant '{}'",
                    class.name
                )));
            }
            if class.tags.is_empty() {
                return Err(invalid(format!(
                    "class variant '{}' needs at least one tag",
                    class.name
                )));
            }
            let mut seen = HashSet::new();
            for tag in &class.tags {
                check_tag("class variant tag", tag)?;
                if breakpoint_names.contains(tag.as_str()) || *tag == self.hidpi.extension {
                    return Err(invalid(format!(
                        "class variant '{}' uses reserved tag '{tag}'",
                        class.name
                    )));
                }
                if !seen.insert(tag.as_str()) {
                    return Err(invalid(format!(
                        "class variant '{}' lists tag '{tag}' twice",
                        class.name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation(message)
}

fn check_tag(what: &str, tag: &str) -> Result<(), ConfigError> {
    if tag.is_empty() {
        return Err(invalid(format!("{what} must not be empty")));
    }
    if tag.contains('.') {
        return Err(invalid(format!("{what} '{tag}' must not contain '.'")));
    }
    Ok(())
}

/// Fluent construction of a validated [`VariantConfig`].
///
/// ```rust
/// use image_variants::config::VariantConfig;
///
/// let config = VariantConfig::builder()
///     .breakpoint("medium", "768px")
///     .breakpoint("large", "1024px")
///     .class_variant("dark", ["dark"])
///     .build()
///     .unwrap();
/// assert_eq!(config.breakpoints.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct VariantConfigBuilder {
    config: VariantConfig,
}

impl VariantConfigBuilder {
    pub fn breakpoint(mut self, name: impl Into<String>, min_width: impl Into<String>) -> Self {
        self.config.breakpoints.push(Breakpoint::new(name, min_width));
        self
    }

    pub fn hidpi_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.hidpi.extension = extension.into();
        self
    }

    pub fn hidpi_query(mut self, query: impl Into<String>) -> Self {
        self.config.hidpi.query = query.into();
        self
    }

    pub fn hidpi_only(mut self, hidpi_only: bool) -> Self {
        self.config.hidpi_only = hidpi_only;
        self
    }

    pub fn class_variant<I, S>(mut self, name: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.add_class_image_variant(name, tags);
        self
    }

    pub fn order(mut self, order: VariantOrder) -> Self {
        self.config.order = order;
        self
    }

    pub fn build(self) -> Result<VariantConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Parse and validate a config from TOML text.
pub fn parse_config(content: &str) -> Result<VariantConfig, ConfigError> {
    let config: VariantConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<VariantConfig, ConfigError> {
    if !path.exists() {
        return Ok(VariantConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-variants configuration
# =============================
# All settings are optional. Values shown below are the defaults unless
# marked as an example. Unknown keys will cause an error.

# Serve every image as if it were already the hidpi asset. Heights are halved
# and no hidpi media query is generated. Hidpi-tagged files are reported.
hidpi_only = false

# Order of the variant rules after the base rule:
#   "filename"    - directory order of the variant filenames
#   "declaration" - breakpoint declaration order, hidpi last per breakpoint
order = "filename"

# ---------------------------------------------------------------------------
# Hidpi
# ---------------------------------------------------------------------------
[hidpi]
# Filename tag marking a hidpi image: hero.2x.jpg
extension = "2x"

# Media query for hidpi images. Commas separate OR'd alternatives; each is
# combined with a breakpoint's min-width when a file carries both tags.
query = "(-webkit-min-device-pixel-ratio: 1.75), (min-resolution: 168dpi)"

# ---------------------------------------------------------------------------
# Breakpoints (example) - none are configured by default
# ---------------------------------------------------------------------------
# hero.medium.jpg is served from 768px up, hero.medium.2x.jpg on hidpi too.
# [[breakpoints]]
# name = "medium"
# min_width = "768px"
#
# [[breakpoints]]
# name = "large"
# min_width = 1024          # bare integers are pixels

# ---------------------------------------------------------------------------
# Class variants (example) - none are registered by default
# ---------------------------------------------------------------------------
# hero.dark.jpg is served under the .dark selector. Every listed tag must be
# present on the filename for the variant to match.
# [[class_variants]]
# name = "dark"
# tags = ["dark"]
"##
}
