//! Variant resolution: from a base image to an ordered list of style rules.
//!
//! ## Algorithm
//!
//! 1. List the image directory and keep the files named `stem.<tags>.ext`
//!    relative to the base image ([`crate::naming`]).
//! 2. Classify each file's tags ([`crate::classify`]). Files with unknown or
//!    conflicting tags are skipped and reported as [`Diagnostic`]s.
//! 3. Emit the base file first, unconditionally.
//! 4. Emit every accepted variant, in filename order (or declaration order,
//!    see [`VariantOrder`]), with a [`Condition`] built from its tags:
//!    - breakpoint → `(min-width: <w>)`
//!    - hidpi → the configured hidpi alternatives
//!    - both → one branch per hidpi alternative, AND'd with the min-width
//!    - class variants → a `.name` selector scope around the media query
//! 5. Optionally attach each image's height ([`crate::imaging::height`]).
//!
//! In hidpi-only mode, hidpi-tagged files are not emitted at all: every other
//! file already *is* the hidpi asset. Finding one is reported once per base
//! image as a mode inconsistency.
//!
//! ## Errors
//!
//! Per-file problems never fail a resolution. Only an unreadable image whose
//! height was requested, an unlistable directory, an invalid config or an
//! invalid base name do, and then no rules are returned for that base image.

use crate::classify::{Rejection, VariantTags, classify_file};
use crate::config::{ConfigError, VariantConfig, VariantOrder};
use crate::imaging::{BackendError, ImageBackend, resolve_height};
use crate::naming::{BaseName, TagParse};
use crate::query::MediaQuery;
use crate::scan::{DirectoryLister, ScanError};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Invalid variant config: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid base image name: {0:?}")]
    InvalidBaseName(String),
    #[error("Cannot list image directory: {0}")]
    Listing(#[from] ScanError),
    #[error("Cannot read image height of {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// When a rule applies. Empty means always.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// Class variant names whose selector scope must be active.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaQuery>,
}

impl Condition {
    pub fn is_unconditional(&self) -> bool {
        self.classes.is_empty() && self.media.is_none()
    }

    /// Compound class selector for the scope, e.g. `.dark.wide`.
    pub fn selector_scope(&self) -> Option<String> {
        if self.classes.is_empty() {
            return None;
        }
        Some(self.classes.iter().map(|c| format!(".{c}")).collect())
    }
}

/// One resolved image: condition, filename, and optional height in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantRule {
    pub condition: Condition,
    /// Filename relative to the image directory.
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Receiver of resolved rules, in final order.
pub trait RecordSink {
    fn emit(&mut self, rule: &VariantRule);
}

impl RecordSink for Vec<VariantRule> {
    fn emit(&mut self, rule: &VariantRule) {
        self.push(rule.clone());
    }
}

/// A non-fatal problem found while resolving one base image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A tag matched no breakpoint, hidpi tag or class variant. Reported once
    /// per distinct tag; `file` is the first file it was seen on.
    UnknownTag { tag: String, file: String },
    /// Two breakpoints, or a repeated hidpi tag, on one file.
    ConflictingTags { tags: Vec<String>, file: String },
    /// An empty tag, as in `hero..jpg`.
    MalformedName { file: String },
    /// Hidpi-tagged files exist although hidpi-only mode is on.
    HidpiOnlyConflict { files: Vec<String> },
}

impl Diagnostic {
    /// Send this diagnostic to the `tracing` log.
    fn log(&self, base: &str) {
        match self {
            Diagnostic::MalformedName { .. } => info!(base, "{}", self),
            _ => warn!(base, "{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownTag { tag, file } => {
                write!(f, "Ignoring unknown extensions '{tag}' ({file})")
            }
            Diagnostic::ConflictingTags { tags, file } => {
                write!(
                    f,
                    "Ignoring conflicting extensions '{}' ({file})",
                    tags.join(",")
                )
            }
            Diagnostic::MalformedName { file } => {
                write!(f, "Ignoring malformed variant name ({file})")
            }
            Diagnostic::HidpiOnlyConflict { files } => {
                write!(
                    f,
                    "DPI variant images detected in hidpi-only mode! ({})",
                    files.join(", ")
                )
            }
        }
    }
}

/// Rules and diagnostics for one base image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The base image filename.
    pub base: String,
    /// Base rule first, then the variants in final order.
    pub rules: Vec<VariantRule>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// Hand every rule to `sink`, in order.
    pub fn emit_to(&self, sink: &mut impl RecordSink) {
        for rule in &self.rules {
            sink.emit(rule);
        }
    }

    /// Image filenames in rule order.
    pub fn images(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.image.as_str()).collect()
    }
}

/// An accepted variant file.
struct Candidate {
    file: String,
    tags: VariantTags,
}

/// Resolves base images against a config, a directory listing and an image
/// backend. All three are only read; the config cannot change mid-call.
pub struct Resolver<'a> {
    config: &'a VariantConfig,
    lister: &'a dyn DirectoryLister,
    backend: &'a dyn ImageBackend,
}

impl<'a> Resolver<'a> {
    pub fn new(
        config: &'a VariantConfig,
        lister: &'a dyn DirectoryLister,
        backend: &'a dyn ImageBackend,
    ) -> Self {
        Self {
            config,
            lister,
            backend,
        }
    }

    /// Resolve every variant of `base_filename` found in `images_dir`.
    ///
    /// With `heights` set, every rule carries the image height, which means
    /// every emitted file must be readable.
    pub fn resolve(
        &self,
        images_dir: &Path,
        base_filename: &str,
        heights: bool,
    ) -> Result<Resolution, ResolveError> {
        // Fields are public and registration skips validation.
        self.config.validate()?;
        let base = BaseName::parse(base_filename)
            .ok_or_else(|| ResolveError::InvalidBaseName(base_filename.to_string()))?;

        let mut files = self.lister.list(images_dir)?;
        files.sort();
        files.dedup();

        let mut candidates = Vec::new();
        let mut diagnostics = Vec::new();
        let mut reported_tags = HashSet::new();
        let mut hidpi_files = Vec::new();

        for file in files {
            let tags = match base.variant_tags(&file) {
                None | Some(TagParse::Base) => continue,
                Some(TagParse::Malformed) => {
                    diagnostics.push(Diagnostic::MalformedName { file });
                    continue;
                }
                Some(TagParse::Tagged(tags)) => tags,
            };

            match classify_file(&tags, self.config) {
                Ok(variant) if variant.hidpi && self.config.hidpi_only => {
                    hidpi_files.push(file);
                }
                Ok(variant) => {
                    debug!(file = %file, ?variant, "accepted variant");
                    candidates.push(Candidate {
                        file,
                        tags: variant,
                    });
                }
                Err(Rejection::Unknown(unknown)) => {
                    for tag in unknown {
                        if reported_tags.insert(tag.clone()) {
                            diagnostics.push(Diagnostic::UnknownTag {
                                tag,
                                file: file.clone(),
                            });
                        }
                    }
                }
                Err(Rejection::Conflicting(tags)) => {
                    diagnostics.push(Diagnostic::ConflictingTags { tags, file });
                }
            }
        }

        if !hidpi_files.is_empty() {
            diagnostics.push(Diagnostic::HidpiOnlyConflict { files: hidpi_files });
        }
        for diagnostic in &diagnostics {
            diagnostic.log(base_filename);
        }

        if self.config.order == VariantOrder::Declaration {
            candidates.sort_by_key(|c| c.tags.declaration_key());
        }

        let mut rules = Vec::with_capacity(candidates.len() + 1);
        rules.push(self.rule(
            images_dir,
            base.filename(),
            Condition::default(),
            false,
            heights,
        )?);
        for candidate in candidates {
            let condition = self.condition(&candidate.tags);
            rules.push(self.rule(
                images_dir,
                candidate.file,
                condition,
                candidate.tags.hidpi,
                heights,
            )?);
        }

        Ok(Resolution {
            base: base.filename(),
            rules,
            diagnostics,
        })
    }

    fn condition(&self, tags: &VariantTags) -> Condition {
        let breakpoint = tags
            .breakpoint
            .map(|i| MediaQuery::min_width(&self.config.breakpoints[i].min_width));
        let hidpi = (tags.hidpi && !self.config.hidpi_only)
            .then(|| MediaQuery::any_of(self.config.hidpi.alternatives()));
        let media = match (breakpoint, hidpi) {
            (Some(bp), Some(hidpi)) => Some(bp.and(&hidpi)),
            (bp, hidpi) => bp.or(hidpi),
        };
        Condition {
            classes: tags
                .classes
                .iter()
                .map(|&i| self.config.class_variants[i].name.clone())
                .collect(),
            media,
        }
    }

    fn rule(
        &self,
        images_dir: &Path,
        image: String,
        condition: Condition,
        is_hidpi_file: bool,
        heights: bool,
    ) -> Result<VariantRule, ResolveError> {
        let height = if heights {
            let path = images_dir.join(&image);
            let height = resolve_height(self.backend, &path, self.config.hidpi_only, is_hidpi_file)
                .map_err(|source| ResolveError::ImageRead { path, source })?;
            Some(height)
        } else {
            None
        };
        Ok(VariantRule {
            condition,
            image,
            height,
        })
    }
}
