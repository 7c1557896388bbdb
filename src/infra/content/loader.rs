//! Content directory loader.
//!
//! Discovery is deterministic: files are visited in file-name order, so the
//! resulting sequence doubles as the tie-break for equal post dates.
//! Malformed documents never abort a load; each one becomes a
//! [`LoadDiagnostic`].

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use metrics::counter;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{
    application::render::{RenderRequest, RenderService},
    domain::posts::{Post, PostFull},
    infra::{
        error::InfraError,
        telemetry::{DOCUMENTS_LOADED_TOTAL, DOCUMENTS_SKIPPED_TOTAL, describe_metrics},
    },
};

use super::frontmatter::{ParsedDocument, PostMeta, parse_document};

const MARKDOWN_EXTENSION: &str = "md";

/// A document excluded from the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

#[derive(Debug, Default)]
pub struct LoadReport {
    /// Loaded posts in discovery order, published or not.
    pub posts: Vec<PostFull>,
    pub diagnostics: Vec<LoadDiagnostic>,
}

pub struct ContentLoader {
    root: PathBuf,
    renderer: Arc<dyn RenderService>,
}

impl ContentLoader {
    pub fn new(root: impl Into<PathBuf>, renderer: Arc<dyn RenderService>) -> Self {
        Self {
            root: root.into(),
            renderer,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read every markdown document under the root. Fails only when the root
    /// itself cannot be used.
    pub async fn load(&self) -> Result<LoadReport, InfraError> {
        describe_metrics();

        let metadata = tokio::fs::metadata(&self.root)
            .await
            .map_err(|err| InfraError::content_directory(&self.root, err.to_string()))?;
        if !metadata.is_dir() {
            return Err(InfraError::content_directory(
                &self.root,
                "not a directory",
            ));
        }

        let root = self.root.clone();
        let (paths, mut diagnostics) = tokio::task::spawn_blocking(move || discover(&root))
            .await
            .map_err(|err| InfraError::content_directory(&self.root, err.to_string()))??;

        let mut posts = Vec::with_capacity(paths.len());
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for path in paths {
            match self.load_document(&path, &seen).await {
                Ok(post) => {
                    seen.insert(post.slug().to_string(), path);
                    posts.push(post);
                }
                Err(reason) => diagnostics.push(LoadDiagnostic { path, reason }),
            }
        }

        for diagnostic in &diagnostics {
            warn!(
                target = "folio::content::loader",
                path = %diagnostic.path.display(),
                reason = %diagnostic.reason,
                "skipping content document"
            );
        }
        counter!(DOCUMENTS_LOADED_TOTAL).increment(posts.len() as u64);
        counter!(DOCUMENTS_SKIPPED_TOTAL).increment(diagnostics.len() as u64);

        info!(
            target = "folio::content::loader",
            root = %self.root.display(),
            loaded = posts.len(),
            skipped = diagnostics.len(),
            "content loaded"
        );

        Ok(LoadReport { posts, diagnostics })
    }

    async fn load_document(
        &self,
        path: &Path,
        seen: &HashMap<String, PathBuf>,
    ) -> Result<PostFull, String> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| format!("unreadable: {err}"))?;

        let ParsedDocument { meta, body } =
            parse_document(&source).map_err(|err| err.to_string())?;

        if let Some(first) = seen.get(&meta.slug) {
            return Err(format!(
                "duplicate slug `{}` (first defined in {})",
                meta.slug,
                first.display()
            ));
        }

        let rendered = self
            .renderer
            .render(&RenderRequest::new(meta.slug.clone(), body))
            .map_err(|err| err.to_string())?;

        Ok(into_post(meta, rendered.html))
    }
}

fn into_post(meta: PostMeta, content: String) -> PostFull {
    let PostMeta {
        slug,
        title,
        excerpt,
        cover_gradient,
        author,
        author_link,
        date,
        published,
        tags,
    } = meta;

    PostFull {
        post: Post {
            slug,
            title,
            excerpt,
            cover_gradient,
            author,
            author_link,
            date,
            tags,
        },
        content,
        published,
    }
}

fn discover(root: &Path) -> Result<(Vec<PathBuf>, Vec<LoadDiagnostic>), InfraError> {
    let mut paths = Vec::new();
    let mut diagnostics = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(InfraError::content_directory(root, err.to_string()));
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                diagnostics.push(LoadDiagnostic {
                    path,
                    reason: format!("unreadable: {err}"),
                });
                continue;
            }
        };

        let is_markdown = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == MARKDOWN_EXTENSION);
        if entry.file_type().is_file() && is_markdown {
            paths.push(entry.into_path());
        }
    }

    Ok((paths, diagnostics))
}
