//! Raw SQL for each table. Repositories never log or translate errors;
//! that happens at the store boundary.

pub mod article_repo;

pub use article_repo::ArticleRepo;
