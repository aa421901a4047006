//! SeaORM entities backing the SQL directory.

pub mod user;
