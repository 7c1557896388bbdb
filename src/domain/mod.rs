//! Domain layer types and invariants.

pub mod cards;
pub mod categories;
pub mod error;
pub mod filter;
pub mod posts;
pub mod slug;
pub mod tags;
