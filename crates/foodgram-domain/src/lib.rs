//! Domain types shared across Foodgram crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `handlers/` may serialize them directly.

pub mod pagination;
