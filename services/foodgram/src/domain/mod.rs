pub mod image;
pub mod password;
pub mod repository;
pub mod short_link;
pub mod shopping_list;
pub mod types;
pub mod validation;
