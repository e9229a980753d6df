//! SQLite backend for the bindery engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
