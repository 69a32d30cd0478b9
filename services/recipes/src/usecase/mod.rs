pub mod annotate;
pub mod collection;
pub mod ingredient;
pub mod recipe;
pub mod shopping_list;
pub mod short_link;
pub mod subscription;
pub mod tag;
pub mod user;

/// Outcome of a dictionary import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: u64,
    pub existing: u64,
}
