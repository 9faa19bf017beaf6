//! Centralized filename parsing for the `stem.<tags>.ext` convention.
//!
//! A base image such as `hero.jpg` owns every file in the same directory that
//! shares its stem and extension and carries dot-separated tags in between:
//!
//! - `hero.jpg` → the base file itself, no tags
//! - `hero.2x.jpg` → `["2x"]`
//! - `hero.medium.2x.jpg` → `["medium", "2x"]`
//! - `hero.png`, `heroic.jpg`, `hero.jpg.bak` → not related to `hero.jpg`
//!
//! Tags are case-sensitive and kept in the order they appear in the filename.
//! What a tag *means* is decided later by [`crate::classify`].

/// A base image filename split into stem and extension.
///
/// The split happens on the last dot, so `my.hero.jpg` has stem `my.hero`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseName {
    /// Everything before the last `.` (e.g. `hero` from `hero.jpg`)
    pub stem: String,
    /// Everything after the last `.`, without the dot (e.g. `jpg`)
    pub extension: String,
}

/// How a candidate filename relates to a base image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagParse {
    /// The candidate is the base file itself.
    Base,
    /// The candidate carries one or more tags, in filename order.
    Tagged(Vec<String>),
    /// Stem and extension match but the tag segment has an empty tag
    /// (`hero..jpg`, `hero.medium..jpg`).
    Malformed,
}

impl BaseName {
    /// Parse a base filename. Returns `None` when there is no extension or
    /// either side of the last dot is empty.
    pub fn parse(filename: &str) -> Option<Self> {
        let (stem, extension) = filename.rsplit_once('.')?;
        if stem.is_empty() || extension.is_empty() {
            return None;
        }
        Some(Self {
            stem: stem.to_string(),
            extension: extension.to_string(),
        })
    }

    /// The base filename, reassembled.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.stem, self.extension)
    }

    /// Extract the tags of `candidate` relative to this base.
    ///
    /// Returns `None` when the candidate is not `stem.ext` or `stem.<tags>.ext`.
    pub fn variant_tags(&self, candidate: &str) -> Option<TagParse> {
        let rest = candidate
            .strip_prefix(self.stem.as_str())?
            .strip_prefix('.')?
            .strip_suffix(self.extension.as_str())?;
        if rest.is_empty() {
            return Some(TagParse::Base);
        }
        let middle = rest.strip_suffix('.')?;
        let tags: Vec<String> = middle.split('.').map(str::to_string).collect();
        if tags.iter().any(String::is_empty) {
            return Some(TagParse::Malformed);
        }
        Some(TagParse::Tagged(tags))
    }
}

/// Whether a filename can serve as a base image: exactly one dot, with a
/// non-empty stem and extension. Hidden files never qualify.
pub fn looks_like_base(filename: &str) -> bool {
    filename.matches('.').count() == 1 && BaseName::parse(filename).is_some()
}
