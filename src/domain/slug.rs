//! Slug helpers: validation of post slugs and deterministic heading anchors.
//!
//! Post slugs come from frontmatter and must already be URL-safe; the loader
//! rejects anything `slug::slugify` would rewrite. Heading anchors are derived
//! from heading text and deduplicated within one document.

use std::collections::{HashMap, HashSet};

use slug::slugify;
use thiserror::Error;

use super::error::DomainError;

/// Errors that can occur while deriving an anchor slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
}

/// Derive a slug from human-readable text.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let candidate = slugify(input);
    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

/// Check that a post slug is non-empty and already in canonical URL-safe form
/// (lowercase ASCII alphanumerics separated by single hyphens).
pub fn validate_post_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(DomainError::invalid_slug(slug, "slug must not be empty"));
    }

    if slugify(slug) != slug {
        return Err(DomainError::invalid_slug(
            slug,
            "slug must be lowercase ascii words separated by hyphens",
        ));
    }

    Ok(())
}

/// Deterministically generate unique anchor slugs within a single document.
///
/// Headings processed in order receive monotonic suffixes when duplicates
/// occur (`setup`, `setup-2`, `setup-3`). A suffix never collides with an
/// anchor already issued, even one that came from a heading like "Setup 2".
#[derive(Default, Debug)]
pub struct AnchorSlugger {
    occurrences: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl AnchorSlugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor_for(&mut self, heading: &str) -> Result<String, SlugError> {
        let base = derive_slug(heading)?;
        let suffix = self.occurrences.entry(base.clone()).or_insert(1);

        let mut candidate = base.clone();
        while self.issued.contains(&candidate) {
            *suffix += 1;
            candidate = format!("{base}-{suffix}");
        }

        self.issued.insert(candidate.clone());
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_slug_lowercases_and_hyphenates() {
        let slug = derive_slug("Writing a Tiny Compiler").expect("slug");
        assert_eq!(slug, "writing-a-tiny-compiler");
    }

    #[test]
    fn derive_slug_rejects_blank_input() {
        assert_eq!(derive_slug("   "), Err(SlugError::EmptyInput));
    }

    #[test]
    fn canonical_post_slugs_validate() {
        assert!(validate_post_slug("qwik-resumability-101").is_ok());
        assert!(validate_post_slug("linux").is_ok());
    }

    #[test]
    fn non_canonical_post_slugs_are_rejected() {
        for slug in ["", "Upper-Case", "with space", "double--hyphen", "trailing-", "a/b"] {
            assert!(
                matches!(
                    validate_post_slug(slug),
                    Err(DomainError::InvalidSlug { .. })
                ),
                "`{slug}` should be rejected"
            );
        }
    }

    #[test]
    fn anchor_slugger_produces_unique_slugs() {
        let mut slugger = AnchorSlugger::new();

        let first = slugger.anchor_for("Overview").expect("slug");
        let second = slugger.anchor_for("Overview").expect("slug");
        let third = slugger.anchor_for("Next Steps").expect("slug");

        assert_eq!(first, "overview");
        assert_eq!(second, "overview-2");
        assert_eq!(third, "next-steps");
    }

    #[test]
    fn anchor_suffixes_skip_anchors_already_issued() {
        let mut slugger = AnchorSlugger::new();
        let anchors: Vec<_> = ["Setup", "Setup", "Setup 2", "Setup"]
            .into_iter()
            .map(|heading| slugger.anchor_for(heading).expect("slug"))
            .collect();

        assert_eq!(anchors, ["setup", "setup-2", "setup-2-2", "setup-3"]);

        let mut slugger = AnchorSlugger::new();
        let anchors: Vec<_> = ["Setup 2", "Setup", "Setup"]
            .into_iter()
            .map(|heading| slugger.anchor_for(heading).expect("slug"))
            .collect();

        assert_eq!(anchors, ["setup-2", "setup", "setup-3"]);
    }
}
