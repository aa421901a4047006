//! Domain layer - Core registration entities.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Storage and notification concerns live in the service crate behind traits.

pub mod error;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use user::{NewUser, User, UserId};
