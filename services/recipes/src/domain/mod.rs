pub mod image;
pub mod repository;
pub mod shopping_list;
pub mod short_link;
pub mod types;
pub mod validation;
