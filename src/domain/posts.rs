//! Post records as exposed to listings and detail lookups.

use serde::Serialize;
use time::{Date, format_description::FormatItem, macros::format_description};

pub const ISO_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Published-summary view of a post. Carries no body content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub cover_gradient: String,
    pub author: String,
    pub author_link: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub tags: Vec<String>,
}

/// Full post record including the rendered, sanitised body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFull {
    #[serde(flatten)]
    pub post: Post,
    /// Sanitised HTML, safe to embed directly into a page.
    pub content: String,
    #[serde(skip)]
    pub published: bool,
}

impl PostFull {
    pub fn slug(&self) -> &str {
        &self.post.slug
    }

    pub fn date(&self) -> Date {
        self.post.date
    }

    pub fn summary(&self) -> Post {
        self.post.clone()
    }
}

/// Sort newest first. `sort_by` is stable, so equal dates keep input order.
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

pub fn format_human_date(date: Date) -> String {
    date.format(HUMAN_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use time::{Date, Month};

    use super::{Post, PostFull};

    pub(crate) fn post(slug: &str, date: (i32, u8, u8), tags: &[&str]) -> Post {
        let (year, month, day) = date;
        Post {
            slug: slug.to_string(),
            title: slug.replace('-', " "),
            excerpt: format!("About {slug}"),
            cover_gradient: "linear-gradient(135deg, #222, #444)".to_string(),
            author: "Ada".to_string(),
            author_link: "https://example.com/ada".to_string(),
            date: Date::from_calendar_date(
                year,
                Month::try_from(month).expect("valid month"),
                day,
            )
            .expect("valid date"),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    pub(crate) fn full(post: Post, published: bool) -> PostFull {
        PostFull {
            content: format!("<p>{}</p>", post.title),
            post,
            published,
        }
    }
}
