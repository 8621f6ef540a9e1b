//! # Domain Layer
//!
//! The domain layer contains the core business rules of the server.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Users, groups, matches and messages with their repository traits
//! - **value_objects**: Validated ids and bounded-length names
//! - **events**: Domain events and the generic `Event` envelope
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Field validation happens when a value object is constructed
//! - Repository traits define data access contracts

pub mod entities;
pub mod events;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use events::{DomainEvent, Event, EventRepository, EventType};
pub use value_objects::*;
