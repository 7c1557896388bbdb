//! Tag-derived views over a post sequence.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::posts::Post;

const FALLBACK_TAG_COLOR: &str = "var(--color-text-secondary)";

const TAG_COLORS: &[(&str, &str)] = &[
    ("Qwik", "var(--tag-color-qwik)"),
    ("React", "var(--tag-color-react)"),
    ("Next.js", "var(--tag-color-nextjs)"),
    ("GraphQL", "var(--tag-color-graphql)"),
    (".NET", "var(--tag-color-dotnet)"),
    ("Spring", "var(--tag-color-spring)"),
    ("Performance", "var(--tag-color-performance)"),
    ("Linux", "var(--tag-color-linux)"),
    ("C++", "var(--tag-color-cpp)"),
    ("TypeScript", "var(--tag-color-typescript)"),
    ("DevOps", "var(--tag-color-devops)"),
    ("Compilers", "var(--tag-color-compilers)"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagGroup {
    pub tag: String,
    pub posts: Vec<Post>,
}

/// Index posts by tag. Groups appear in first-encounter order and keep the
/// input order of posts within each group.
pub fn group_by_tag(posts: &[Post]) -> Vec<TagGroup> {
    let mut groups: Vec<TagGroup> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for post in posts {
        for tag in &post.tags {
            match positions.get(tag.as_str()) {
                Some(&index) => groups[index].posts.push(post.clone()),
                None => {
                    positions.insert(tag.as_str(), groups.len());
                    groups.push(TagGroup {
                        tag: tag.clone(),
                        posts: vec![post.clone()],
                    });
                }
            }
        }
    }

    groups
}

/// Distinct tag vocabulary across `posts`, sorted.
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn tag_color(tag: &str) -> &'static str {
    TAG_COLORS
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_TAG_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::posts::fixtures::post;

    #[test]
    fn post_appears_under_each_of_its_tags() {
        let posts = vec![post("multi", (2024, 1, 1), &["A", "B"])];
        let groups = group_by_tag(&posts);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].tag, "A");
        assert_eq!(groups[1].tag, "B");
        assert_eq!(groups[0].posts[0].slug, "multi");
        assert_eq!(groups[1].posts[0].slug, "multi");
    }

    #[test]
    fn groups_follow_first_encounter_and_keep_input_order() {
        let posts = vec![
            post("newest", (2024, 3, 1), &["Zig", "Linux"]),
            post("middle", (2024, 2, 1), &["Linux"]),
            post("oldest", (2024, 1, 1), &["Alpha", "Zig"]),
        ];
        let groups = group_by_tag(&posts);

        let tags: Vec<_> = groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(tags, ["Zig", "Linux", "Alpha"]);

        let zig: Vec<_> = groups[0].posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(zig, ["newest", "oldest"]);
        let linux: Vec<_> = groups[1].posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(linux, ["newest", "middle"]);
    }

    #[test]
    fn every_tag_post_pair_appears_exactly_once() {
        let posts = vec![
            post("a", (2024, 1, 1), &["X", "Y"]),
            post("b", (2024, 1, 2), &["Y"]),
        ];
        let groups = group_by_tag(&posts);

        let pairs: usize = groups.iter().map(|g| g.posts.len()).sum();
        let expected: usize = posts.iter().map(|p| p.tags.len()).sum();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn all_tags_is_sorted_and_distinct() {
        let posts = vec![
            post("a", (2024, 1, 1), &["React", "Linux"]),
            post("b", (2024, 1, 2), &["Linux", "C++"]),
        ];
        assert_eq!(all_tags(&posts), ["C++", "Linux", "React"]);
    }

    #[test]
    fn unknown_tags_use_fallback_color() {
        assert_eq!(tag_color("Linux"), "var(--tag-color-linux)");
        assert_eq!(tag_color("Gardening"), FALLBACK_TAG_COLOR);
    }
}
