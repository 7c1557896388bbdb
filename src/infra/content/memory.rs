use std::collections::HashMap;

use crate::{
    application::repos::{PostsRepo, RepoError},
    domain::posts::{Post, PostFull, sort_by_date_desc},
};

/// Immutable post store built once from a load.
#[derive(Debug, Default)]
pub struct InMemoryPostsRepo {
    /// Published posts, newest first.
    listing: Vec<Post>,
    published: HashMap<String, PostFull>,
}

impl InMemoryPostsRepo {
    /// Build the store from posts in discovery order. Unpublished posts are
    /// dropped and, should a slug repeat, the first occurrence wins.
    pub fn new(posts: Vec<PostFull>) -> Self {
        let mut listing = Vec::new();
        let mut published = HashMap::new();

        for post in posts.into_iter().filter(|post| post.published) {
            if published.contains_key(post.slug()) {
                continue;
            }
            listing.push(post.summary());
            published.insert(post.slug().to_string(), post);
        }

        sort_by_date_desc(&mut listing);
        Self { listing, published }
    }

    pub fn len(&self) -> usize {
        self.listing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listing.is_empty()
    }
}

impl PostsRepo for InMemoryPostsRepo {
    fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.listing.clone())
    }

    fn find_published(&self, slug: &str) -> Result<Option<PostFull>, RepoError> {
        Ok(self.published.get(slug).cloned())
    }
}
