//! # image-variants
//!
//! Resolve the variants of a background image into ordered, conditional
//! style rules. Your image directory is the data source: a base image
//! `hero.jpg` is served everywhere, and sibling files carrying tags between
//! stem and extension are served under the matching conditions:
//!
//! ```text
//! hero.jpg               → always
//! hero.2x.jpg            → hidpi screens
//! hero.medium.jpg        → viewports from the `medium` breakpoint up
//! hero.medium.2x.jpg     → both
//! hero.dark.jpg          → under the `.dark` selector (registered class variant)
//! ```
//!
//! ```rust,no_run
//! use image_variants::config::VariantConfig;
//! use image_variants::imaging::RustBackend;
//! use image_variants::resolve::Resolver;
//! use image_variants::scan::FsLister;
//! use std::path::Path;
//!
//! let config = VariantConfig::builder()
//!     .breakpoint("medium", "768px")
//!     .build()?;
//! let backend = RustBackend::new();
//! let resolution = Resolver::new(&config, &FsLister, &backend)
//!     .resolve(Path::new("images"), "hero.jpg", true)?;
//! for rule in &resolution.rules {
//!     println!("{} {:?}", rule.image, rule.height);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `stem.<tags>.ext` filename parser |
//! | [`classify`] | Tag classification: breakpoint, hidpi, class variant, unknown |
//! | [`config`] | [`VariantConfig`](config::VariantConfig): builder, TOML loading, validation |
//! | [`query`] | Media query algebra (OR of AND'd features) |
//! | [`resolve`] | Discovery, ordering and rule generation for one base image |
//! | [`imaging`] | Dimension reading and the hidpi-only height transform |
//! | [`scan`] | Directory listing and base image discovery |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Configuration
//!
//! Breakpoints, the hidpi tag, hidpi-only mode and class variants travel in
//! one [`VariantConfig`](config::VariantConfig) value borrowed by each
//! resolution. Two resolutions with different configs cannot leak into each
//! other, and the borrow guarantees the config is stable during a call.
//!
//! ## Filename Order
//!
//! Variant rules follow the byte order of their filenames, which is the order
//! a directory listing returns them in. `hero.large.jpg` therefore precedes
//! `hero.medium.jpg` even when `medium` is declared first. Set
//! `order = "declaration"` to order by breakpoint declaration instead.
//!
//! ## Diagnostics Are Data
//!
//! Skipped files are returned as [`Diagnostic`](resolve::Diagnostic) values
//! next to the rules and also logged through `tracing`, so callers can
//! assert on them without capturing logs.
//!
//! ## Stylesheet Text Is Not Our Business
//!
//! The crate stops at ordered rules. Turning a rule into
//! `@media ... { .foo { background-image: url(...) } }` belongs to whatever
//! stylesheet tool consumes them through a
//! [`RecordSink`](resolve::RecordSink).

pub mod classify;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod query;
pub mod resolve;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
