//! Frontmatter extraction for content documents.

use gray_matter::{Matter, engine::YAML};
use serde::Deserialize;
use thiserror::Error;
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339};

use crate::domain::{posts::ISO_DATE_FORMAT, slug::validate_post_slug};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    #[error("no frontmatter block found")]
    Missing,
    #[error("frontmatter is not valid YAML for a post: {message}")]
    Malformed { message: String },
    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },
    #[error("`date` value `{value}` is neither YYYY-MM-DD nor RFC 3339")]
    InvalidDate { value: String },
    #[error("`slug` value `{slug}` is not URL-safe")]
    InvalidSlug { slug: String },
}

/// Validated post metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMeta {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub cover_gradient: String,
    pub author: String,
    pub author_link: String,
    pub date: Date,
    pub published: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub meta: PostMeta,
    /// Markdown body with the frontmatter block removed.
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrontmatter {
    slug: Option<String>,
    title: Option<String>,
    excerpt: Option<String>,
    cover_gradient: Option<String>,
    author: Option<String>,
    author_link: Option<String>,
    date: Option<String>,
    published: Option<bool>,
    tags: Option<Vec<String>>,
}

pub fn parse_document(source: &str) -> Result<ParsedDocument, FrontmatterError> {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(source);

    let raw: RawFrontmatter = parsed
        .data
        .ok_or(FrontmatterError::Missing)?
        .deserialize()
        .map_err(|err| FrontmatterError::Malformed {
            message: err.to_string(),
        })?;

    Ok(ParsedDocument {
        meta: validate(raw)?,
        body: parsed.content,
    })
}

fn validate(raw: RawFrontmatter) -> Result<PostMeta, FrontmatterError> {
    let slug = raw
        .slug
        .ok_or(FrontmatterError::MissingField { field: "slug" })?;
    if validate_post_slug(&slug).is_err() {
        return Err(FrontmatterError::InvalidSlug { slug });
    }

    let date = raw
        .date
        .ok_or(FrontmatterError::MissingField { field: "date" })
        .and_then(|value| parse_date(&value))?;

    let published = raw
        .published
        .ok_or(FrontmatterError::MissingField { field: "published" })?;

    Ok(PostMeta {
        slug,
        title: raw.title.unwrap_or_default(),
        excerpt: raw.excerpt.unwrap_or_default(),
        cover_gradient: raw.cover_gradient.unwrap_or_default(),
        author: raw.author.unwrap_or_default(),
        author_link: raw.author_link.unwrap_or_default(),
        date,
        published,
        tags: raw.tags.unwrap_or_default(),
    })
}

fn parse_date(value: &str) -> Result<Date, FrontmatterError> {
    let trimmed = value.trim();
    Date::parse(trimmed, ISO_DATE_FORMAT)
        .or_else(|_| OffsetDateTime::parse(trimmed, &Rfc3339).map(OffsetDateTime::date))
        .map_err(|_| FrontmatterError::InvalidDate {
            value: value.to_string(),
        })
}
