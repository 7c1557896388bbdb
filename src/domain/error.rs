use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown category `{name}`")]
    UnknownCategory { name: String },
    #[error("unknown sort order `{value}`")]
    UnknownSortOrder { value: String },
    #[error("invalid slug `{slug}`: {reason}")]
    InvalidSlug { slug: String, reason: &'static str },
}

impl DomainError {
    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory { name: name.into() }
    }

    pub fn unknown_sort_order(value: impl Into<String>) -> Self {
        Self::UnknownSortOrder {
            value: value.into(),
        }
    }

    pub fn invalid_slug(slug: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidSlug {
            slug: slug.into(),
            reason,
        }
    }
}
