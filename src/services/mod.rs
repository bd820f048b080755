pub mod articles;
pub mod categories;
pub mod pages;
pub mod slug;
