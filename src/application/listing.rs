//! Filter/sort engine for the blog listing.

use std::cmp::Ordering;

use deunicode::deunicode;

use crate::domain::{
    categories::post_matches_category,
    filter::{FilterState, SortOrder},
    posts::Post,
};

/// Apply `state` to `posts`, returning a new, independently owned listing.
///
/// Filters compose conjunctively: category (case-sensitive), every active tag
/// (case-insensitive) and a case-insensitive substring match on the title.
/// All sorts are stable.
pub fn filter_posts(posts: &[Post], state: &FilterState) -> Vec<Post> {
    let wanted_tags: Vec<String> = state.tags.iter().map(|tag| tag.to_lowercase()).collect();
    let needle = state.query.to_lowercase();

    let mut visible: Vec<Post> = posts
        .iter()
        .filter(|post| {
            state.category.is_all() || post_matches_category(&post.tags, state.category)
        })
        .filter(|post| carries_all_tags(post, &wanted_tags))
        .filter(|post| needle.is_empty() || post.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    sort_posts(&mut visible, state.sort);
    visible
}

pub fn sort_posts(posts: &mut [Post], order: SortOrder) {
    match order {
        SortOrder::DateDesc => posts.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::DateAsc => posts.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::TitleAz => posts.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

fn carries_all_tags(post: &Post, wanted: &[String]) -> bool {
    wanted
        .iter()
        .all(|wanted| post.tags.iter().any(|tag| tag.to_lowercase() == *wanted))
}

// Accent- and case-folded key first ("Éclair" sorts as "eclair"). Raw text
// breaks ties.
fn compare_titles(a: &str, b: &str) -> Ordering {
    title_key(a).cmp(&title_key(b)).then_with(|| a.cmp(b))
}

fn title_key(title: &str) -> String {
    deunicode(title).to_lowercase()
}
