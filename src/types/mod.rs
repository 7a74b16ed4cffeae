//! Types that are really the bedrock of the crate.

pub mod tag;

pub use tag::{normalized, Category, Tag, TagOrigin, UserId};
