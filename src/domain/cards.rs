//! Post card presentation parameters.
//!
//! Listing surfaces show a post as one of three card variants. The variants
//! differ only in static parameters, so they are a plain enum consulted by a
//! single card builder.

use serde::Serialize;

use super::{
    posts::{Post, format_human_date},
    tags::tag_color,
};

/// Number of posts shown in the featured carousel.
pub const FEATURED_LIMIT: usize = 5;
/// Tags shown on a featured slide before collapsing into an overflow count.
pub const FEATURED_TAG_PREVIEW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardVariant {
    Featured,
    Trending,
    Compact,
}

impl CardVariant {
    pub fn label(self) -> &'static str {
        match self {
            CardVariant::Featured => "featured_blog",
            CardVariant::Trending => "trending",
            CardVariant::Compact => "subject",
        }
    }

    pub fn heading_level(self) -> u8 {
        match self {
            CardVariant::Featured => 2,
            CardVariant::Trending => 3,
            CardVariant::Compact => 4,
        }
    }

    pub fn shows_excerpt(self) -> bool {
        matches!(self, CardVariant::Featured)
    }

    pub fn shows_cover(self) -> bool {
        !matches!(self, CardVariant::Compact)
    }

    pub fn shows_tags(self) -> bool {
        matches!(self, CardVariant::Compact)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardTag {
    pub name: String,
    pub color: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub variant: CardVariant,
    pub label: &'static str,
    pub heading_level: u8,
    pub href: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub author_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub tags: Vec<CardTag>,
    /// Tags hidden behind the preview cut-off.
    pub tag_overflow: usize,
}

impl PostCard {
    pub fn new(post: &Post, variant: CardVariant) -> Self {
        let (tags, tag_overflow) = match variant {
            CardVariant::Compact => (card_tags(&post.tags), 0),
            CardVariant::Featured => {
                let shown = post.tags.len().min(FEATURED_TAG_PREVIEW);
                (
                    card_tags(&post.tags[..shown]),
                    post.tags.len() - shown,
                )
            }
            CardVariant::Trending => (Vec::new(), 0),
        };

        Self {
            variant,
            label: variant.label(),
            heading_level: variant.heading_level(),
            href: post_href(&post.slug),
            title: post.title.clone(),
            date: format_human_date(post.date),
            author: post.author.clone(),
            author_link: post.author_link.clone(),
            excerpt: variant.shows_excerpt().then(|| post.excerpt.clone()),
            cover: variant.shows_cover().then(|| post.cover_gradient.clone()),
            tags,
            tag_overflow,
        }
    }
}

pub fn post_href(slug: &str) -> String {
    format!("/blog/{slug}")
}

/// Listing link pre-filtered to a single tag.
pub fn tag_href(tag: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("tags", tag)
        .finish();
    format!("/blog?{query}")
}

/// Cards for the featured carousel: the first few posts of a date-ordered
/// listing.
pub fn featured_cards(posts: &[Post]) -> Vec<PostCard> {
    posts
        .iter()
        .take(FEATURED_LIMIT)
        .map(|post| PostCard::new(post, CardVariant::Featured))
        .collect()
}

fn card_tags(tags: &[String]) -> Vec<CardTag> {
    tags.iter()
        .map(|tag| CardTag {
            name: tag.clone(),
            color: tag_color(tag),
            href: tag_href(tag),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::posts::fixtures::post;

    #[test]
    fn compact_card_shows_all_tags_without_cover_or_excerpt() {
        let card = PostCard::new(
            &post("ssr-notes", (2024, 1, 9), &["Qwik", "React", "Performance"]),
            CardVariant::Compact,
        );

        assert_eq!(card.label, "subject");
        assert_eq!(card.href, "/blog/ssr-notes");
        assert_eq!(card.tags.len(), 3);
        assert_eq!(card.tag_overflow, 0);
        assert!(card.excerpt.is_none());
        assert!(card.cover.is_none());
        assert_eq!(card.date, "January 9, 2024");
    }

    #[test]
    fn featured_card_previews_two_tags() {
        let card = PostCard::new(
            &post("deep-dive", (2024, 1, 9), &["Linux", "C++", "DevOps"]),
            CardVariant::Featured,
        );

        assert_eq!(card.heading_level, 2);
        assert_eq!(card.tags.len(), 2);
        assert_eq!(card.tag_overflow, 1);
        assert_eq!(card.excerpt.as_deref(), Some("About deep-dive"));
        assert!(card.cover.is_some());
        assert_eq!(card.tags[1].href, "/blog?tags=C%2B%2B");
    }

    #[test]
    fn featured_carousel_takes_first_five() {
        let posts: Vec<_> = (1..=7)
            .map(|day| post(&format!("post-{day}"), (2024, 1, day), &["Linux"]))
            .collect();
        let cards = featured_cards(&posts);

        assert_eq!(cards.len(), FEATURED_LIMIT);
        assert_eq!(cards[0].href, "/blog/post-1");
    }
}
