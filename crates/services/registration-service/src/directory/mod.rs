//! Directory layer - user storage behind the `UserDirectory` trait.

pub mod entities;
mod memory;
mod user_directory;

pub use memory::InMemoryDirectory;
pub use user_directory::{SqlDirectory, UserDirectory};

#[cfg(any(test, feature = "test-utils"))]
pub use user_directory::MockUserDirectory;
