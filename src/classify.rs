//! Tag classification against a [`VariantConfig`].
//!
//! Each tag of a candidate filename gets one [`VariantKind`], with precedence
//! breakpoint > hidpi > class variant > unknown. Breakpoint and hidpi tags are
//! claimed first. A class variant then matches only when *all* of its tags are
//! among the tags still unclaimed; class variants are tried in registration
//! order and claim their tags when they match. Whatever is left is unknown.

use crate::config::VariantConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantKind {
    /// Index into [`VariantConfig::breakpoints`].
    Breakpoint { index: usize },
    Hidpi,
    /// Index into [`VariantConfig::class_variants`].
    ClassVariant { index: usize },
    Unknown(String),
}

/// The meaning of an accepted variant filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantTags {
    pub breakpoint: Option<usize>,
    pub hidpi: bool,
    /// Matched class variants, in registration order.
    pub classes: Vec<usize>,
}

impl VariantTags {
    /// Sort key for declaration ordering: breakpoint position (none first),
    /// standard density before hidpi, then class registration order.
    pub fn declaration_key(&self) -> (usize, bool, Vec<usize>) {
        (
            self.breakpoint.map_or(0, |i| i + 1),
            self.hidpi,
            self.classes.clone(),
        )
    }
}

/// Why a candidate filename was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Tags that matched nothing, in filename order.
    Unknown(Vec<String>),
    /// More than one breakpoint, or a repeated hidpi tag.
    Conflicting(Vec<String>),
}

/// Classify every tag, returning one kind per tag in the same order.
pub fn classify_tags(tags: &[String], config: &VariantConfig) -> Vec<VariantKind> {
    let mut kinds: Vec<Option<VariantKind>> = tags
        .iter()
        .map(|tag| {
            if let Some((index, _)) = config.breakpoint(tag) {
                Some(VariantKind::Breakpoint { index })
            } else if *tag == config.hidpi.extension {
                Some(VariantKind::Hidpi)
            } else {
                None
            }
        })
        .collect();

    for (index, class) in config.class_variants.iter().enumerate() {
        let positions: Option<Vec<usize>> = class
            .tags
            .iter()
            .map(|required| {
                (0..tags.len()).find(|&p| kinds[p].is_none() && tags[p] == *required)
            })
            .collect();
        if let Some(positions) = positions {
            for p in positions {
                kinds[p] = Some(VariantKind::ClassVariant { index });
            }
        }
    }

    kinds
        .into_iter()
        .zip(tags)
        .map(|(kind, tag)| kind.unwrap_or_else(|| VariantKind::Unknown(tag.clone())))
        .collect()
}

/// Classify a candidate's tags and fold them into a [`VariantTags`].
pub fn classify_file(tags: &[String], config: &VariantConfig) -> Result<VariantTags, Rejection> {
    let mut result = VariantTags::default();
    let mut unknown = Vec::new();
    let mut conflicting = false;
    for kind in classify_tags(tags, config) {
        match kind {
            VariantKind::Breakpoint { index } => {
                conflicting |= result.breakpoint.replace(index).is_some();
            }
            VariantKind::Hidpi => {
                conflicting |= result.hidpi;
                result.hidpi = true;
            }
            VariantKind::ClassVariant { index } => {
                if !result.classes.contains(&index) {
                    result.classes.push(index);
                }
            }
            VariantKind::Unknown(tag) => unknown.push(tag),
        }
    }
    if !unknown.is_empty() {
        return Err(Rejection::Unknown(unknown));
    }
    if conflicting {
        return Err(Rejection::Conflicting(tags.to_vec()));
    }
    result.classes.sort_unstable();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> VariantConfig {
        VariantConfig::builder()
            .breakpoint("medium", "768px")
            .breakpoint("large", "1024px")
            .class_variant("dark", ["dark"])
            .class_variant("print", ["print", "mono"])
            .build()
            .unwrap()
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn breakpoint_and_hidpi_tags() {
        let kinds = classify_tags(&tags(&["large", "2x"]), &config());
        assert_eq!(
            kinds,
            vec![VariantKind::Breakpoint { index: 1 }, VariantKind::Hidpi]
        );
    }

    #[test]
    fn unknown_tag() {
        let kinds = classify_tags(&tags(&["foo"]), &config());
        assert_eq!(kinds, vec![VariantKind::Unknown("foo".into())]);
    }

    #[test]
    fn tags_are_case_sensitive() {
        let kinds = classify_tags(&tags(&["Medium"]), &config());
        assert_eq!(kinds, vec![VariantKind::Unknown("Medium".into())]);
    }

    #[test]
    fn class_variant_requires_all_tags() {
        let kinds = classify_tags(&tags(&["print"]), &config());
        assert_eq!(kinds, vec![VariantKind::Unknown("print".into())]);

        let kinds = classify_tags(&tags(&["mono", "print"]), &config());
        assert_eq!(
            kinds,
            vec![
                VariantKind::ClassVariant { index: 1 },
                VariantKind::ClassVariant { index: 1 }
            ]
        );
    }

    #[test]
    fn remaining_tags_classified_independently() {
        let kinds = classify_tags(&tags(&["dark", "medium", "2x"]), &config());
        assert_eq!(
            kinds,
            vec![
                VariantKind::ClassVariant { index: 0 },
                VariantKind::Breakpoint { index: 0 },
                VariantKind::Hidpi
            ]
        );
    }

    #[test]
    fn custom_hidpi_extension() {
        let config = VariantConfig::builder().hidpi_extension("hidpi").build().unwrap();
        assert_eq!(classify_tags(&tags(&["hidpi"]), &config), vec![VariantKind::Hidpi]);
        assert_eq!(
            classify_tags(&tags(&["2x"]), &config),
            vec![VariantKind::Unknown("2x".into())]
        );
    }

    #[test]
    fn classify_file_combines_tags() {
        let v = classify_file(&tags(&["dark", "large", "2x"]), &config()).unwrap();
        assert_eq!(
            v,
            VariantTags {
                breakpoint: Some(1),
                hidpi: true,
                classes: vec![0],
            }
        );
    }

    #[test]
    fn classify_file_rejects_unknown() {
        let result = classify_file(&tags(&["medium", "foo", "bar"]), &config());
        assert_eq!(result, Err(Rejection::Unknown(tags(&["foo", "bar"]))));
    }

    #[test]
    fn classify_file_rejects_two_breakpoints() {
        let result = classify_file(&tags(&["medium", "large"]), &config());
        assert_eq!(result, Err(Rejection::Conflicting(tags(&["medium", "large"]))));
    }

    #[test]
    fn classify_file_rejects_repeated_hidpi() {
        let result = classify_file(&tags(&["2x", "2x"]), &config());
        assert!(matches!(result, Err(Rejection::Conflicting(_))));
    }

    #[test]
    fn repeated_class_tag_leaves_one_unknown() {
        let result = classify_file(&tags(&["dark", "dark"]), &config());
        assert_eq!(result, Err(Rejection::Unknown(tags(&["dark"]))));
    }

    #[test]
    fn declaration_key_orders_hidpi_after_standard() {
        let standard = VariantTags {
            breakpoint: Some(0),
            ..Default::default()
        };
        let hidpi = VariantTags {
            breakpoint: Some(0),
            hidpi: true,
            ..Default::default()
        };
        let no_breakpoint_hidpi = VariantTags {
            hidpi: true,
            ..Default::default()
        };
        assert!(standard.declaration_key() < hidpi.declaration_key());
        assert!(no_breakpoint_hidpi.declaration_key() < standard.declaration_key());
    }
}
