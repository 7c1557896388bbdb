//! Folio: a markdown-backed personal blog.
//!
//! Content flows from the loader (`infra::content`) into an immutable
//! repository, and from there into tag grouping and the filter/sort engine
//! (`application`). The HTTP layer (`infra::http`) exposes the listing and
//! detail endpoints.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
