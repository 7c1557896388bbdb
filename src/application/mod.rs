//! Application services: rendering, listing and URL state over the post
//! repository.

pub mod blog;
pub mod error;
pub mod listing;
pub mod render;
pub mod repos;
pub mod url_state;
