//! Application services layer - registration use cases.
//!
//! Services orchestrate domain logic and the two collaborators. They
//! depend on abstractions (traits) for dependency inversion.

mod registration_service;

pub use registration_service::{Registrar, RegistrationService};
