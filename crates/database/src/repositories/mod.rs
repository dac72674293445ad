pub mod pg_user_repository;

pub use pg_user_repository::*;
