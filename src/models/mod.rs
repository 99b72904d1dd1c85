pub mod comment;
pub mod idea;
pub mod nav_item;
pub mod user;
