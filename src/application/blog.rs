use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::application::repos::{PostsRepo, RepoError};
use crate::application::url_state::{BlogSession, RecordingSink, parse_query, serialize_query};
use crate::domain::{
    cards::{PostCard, featured_cards},
    categories::{CATEGORY_LIST, Category},
    filter::FilterState,
    posts::{Post, PostFull},
    slug::validate_post_slug,
    tags::{TagGroup, all_tags, group_by_tag, tag_color},
};

/// Everything the listing page needs for one request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListing {
    pub state: FilterState,
    /// Canonical query string for `state`; empty for the default state.
    pub query: String,
    pub categories: Vec<Category>,
    pub all_tags: Vec<String>,
    pub featured: Vec<PostCard>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagGroupView {
    pub tag: String,
    pub color: &'static str,
    pub posts: Vec<Post>,
}

impl From<TagGroup> for TagGroupView {
    fn from(group: TagGroup) -> Self {
        Self {
            color: tag_color(&group.tag),
            tag: group.tag,
            posts: group.posts,
        }
    }
}

#[derive(Debug, Error)]
pub enum BlogError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostsRepo>,
}

impl BlogService {
    pub fn new(posts: Arc<dyn PostsRepo>) -> Self {
        Self { posts }
    }

    pub fn list_published(&self) -> Result<Vec<Post>, BlogError> {
        Ok(self.posts.list_published()?)
    }

    /// Full post for `slug`. Slugs that could never have been loaded
    /// short-circuit to `None` without touching the repository.
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<PostFull>, BlogError> {
        if validate_post_slug(slug).is_err() {
            return Ok(None);
        }
        Ok(self.posts.find_published(slug)?)
    }

    pub fn tag_groups(&self) -> Result<Vec<TagGroupView>, BlogError> {
        let posts = self.posts.list_published()?;
        Ok(group_by_tag(&posts)
            .into_iter()
            .map(TagGroupView::from)
            .collect())
    }

    /// Resolve a raw query string into a listing. The returned `query` is the
    /// canonical form the caller should replace its URL with.
    pub fn browse(&self, raw_query: &str) -> Result<BlogListing, BlogError> {
        let posts = self.posts.list_published()?;
        let featured = featured_cards(&posts);
        let tags = all_tags(&posts);

        let session = BlogSession::mount(posts, parse_query(raw_query), RecordingSink::default());
        let visible = session.visible();
        let state = session.state().clone();
        let query = session
            .sink()
            .latest()
            .map(str::to_string)
            .unwrap_or_else(|| serialize_query(&state));

        Ok(BlogListing {
            state,
            query,
            categories: CATEGORY_LIST.to_vec(),
            all_tags: tags,
            featured,
            posts: visible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::posts::fixtures::{full, post};

    struct StaticRepo(Vec<PostFull>);

    impl PostsRepo for StaticRepo {
        fn list_published(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self
                .0
                .iter()
                .filter(|post| post.published)
                .map(PostFull::summary)
                .collect())
        }

        fn find_published(&self, slug: &str) -> Result<Option<PostFull>, RepoError> {
            Ok(self
                .0
                .iter()
                .find(|post| post.published && post.slug() == slug)
                .cloned())
        }
    }

    fn service() -> BlogService {
        BlogService::new(Arc::new(StaticRepo(vec![
            full(post("react-hooks", (2024, 3, 1), &["React", "Performance"]), true),
            full(post("kernel-notes", (2024, 2, 1), &["Linux"]), true),
            full(post("draft-idea", (2024, 4, 1), &["React"]), false),
        ])))
    }

    #[test]
    fn browse_applies_query_and_canonicalises_it() {
        let listing = service()
            .browse("sort=date-desc&category=Web&utm=1")
            .expect("browse");

        assert_eq!(listing.query, "category=Web");
        assert_eq!(listing.posts.len(), 1);
        assert_eq!(listing.posts[0].slug, "react-hooks");
        assert_eq!(listing.featured.len(), 2);
        assert_eq!(listing.all_tags, ["Linux", "Performance", "React"]);
        assert_eq!(listing.categories.first(), Some(&Category::All));
    }

    #[test]
    fn unpublished_and_invalid_slugs_are_not_found() {
        let blog = service();

        assert!(blog.get_by_slug("draft-idea").expect("lookup").is_none());
        assert!(blog.get_by_slug("nonexistent").expect("lookup").is_none());
        assert!(blog.get_by_slug("../etc").expect("lookup").is_none());
        assert!(blog.get_by_slug("kernel-notes").expect("lookup").is_some());
    }

    #[test]
    fn tag_groups_carry_colors() {
        let groups = service().tag_groups().expect("groups");
        let tags: Vec<_> = groups.iter().map(|group| group.tag.as_str()).collect();

        assert_eq!(tags, ["React", "Performance", "Linux"]);
        assert_eq!(groups[2].color, "var(--tag-color-linux)");
    }
}
