//! Static category registry. Categories are curated groups of tags used for
//! coarse filtering; the mapping is configuration, never derived from content.

use std::{fmt, str::FromStr};

use serde::Serialize;

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Category {
    #[default]
    All,
    Web,
    Linux,
    Compilers,
    Languages,
    DevOps,
    System,
}

/// Display order of the category tabs.
pub const CATEGORY_LIST: [Category; 7] = [
    Category::All,
    Category::Web,
    Category::Linux,
    Category::Compilers,
    Category::Languages,
    Category::DevOps,
    Category::System,
];

const WEB_TAGS: &[&str] = &[
    "Qwik",
    "React",
    "Next.js",
    "GraphQL",
    ".NET",
    "Spring",
    "Performance",
];
const LINUX_TAGS: &[&str] = &["Linux"];
const COMPILERS_TAGS: &[&str] = &["Compilers"];
const LANGUAGES_TAGS: &[&str] = &["C++", "TypeScript"];
const DEVOPS_TAGS: &[&str] = &["DevOps"];
const SYSTEM_TAGS: &[&str] = &["Linux", "Compilers", "C++", "DevOps"];

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Web => "Web",
            Category::Linux => "Linux",
            Category::Compilers => "Compilers",
            Category::Languages => "Languages",
            Category::DevOps => "DevOps",
            Category::System => "System",
        }
    }

    /// Fixed tag vocabulary of the category. `All` has none: it matches
    /// unconditionally instead.
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Category::All => &[],
            Category::Web => WEB_TAGS,
            Category::Linux => LINUX_TAGS,
            Category::Compilers => COMPILERS_TAGS,
            Category::Languages => LANGUAGES_TAGS,
            Category::DevOps => DEVOPS_TAGS,
            Category::System => SYSTEM_TAGS,
        }
    }

    pub fn is_all(self) -> bool {
        self == Category::All
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CATEGORY_LIST
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| DomainError::unknown_category(value))
    }
}

/// True when `category` is `All` or shares at least one tag with the post.
/// Comparison is exact and case-sensitive.
pub fn post_matches_category<S: AsRef<str>>(tags: &[S], category: Category) -> bool {
    if category.is_all() {
        return true;
    }

    let vocabulary = category.tags();
    tags.iter().any(|tag| vocabulary.contains(&tag.as_ref()))
}
