//! mindwell-storage
//!
//! Relational store on SQLite. Thin repository functions over `rusqlite`:
//! every join and filter is an explicit query, and every function takes the
//! connection it runs on.

pub mod db;
pub mod error;
pub mod repo;
pub mod schema;

mod columns;
mod filter;
