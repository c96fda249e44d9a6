//! Database integration for persisting generated seed data.
//!
//! The [`Seeder`] creates the schema and inserts a generated dataset in
//! dependency order, with batched inserts and progress logging.

mod seeder;

pub use seeder::{SeedError, Seeder};
