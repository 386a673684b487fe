pub mod articles;
pub mod pages;
