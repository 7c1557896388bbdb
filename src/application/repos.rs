//! Repository traits describing content adapters.

use thiserror::Error;

use crate::domain::posts::{Post, PostFull};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("content unavailable: {0}")]
    Unavailable(String),
}

impl RepoError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Read access to the post collection.
///
/// Implementations expose published posts only. An unpublished slug is
/// indistinguishable from one that does not exist.
pub trait PostsRepo: Send + Sync {
    /// Published posts, newest first. Equal dates keep discovery order.
    fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    fn find_published(&self, slug: &str) -> Result<Option<PostFull>, RepoError>;
}
