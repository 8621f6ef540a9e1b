//! # Squad Server Library
//!
//! Backend for organizing amateur sports:
//! - Users mirrored from an OpenID Connect provider (bearer JWTs)
//! - Groups of players, matches scheduled within groups
//! - Notification messages produced from domain events
//! - PostgreSQL or in-memory persistence
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities, value objects, repository traits, domain events
//! - **Application Layer**: Services (use-cases), DTOs and event listeners
//! - **Infrastructure Layer**: Repository implementations, event bus, metrics
//! - **Presentation Layer**: HTTP routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! squad_server/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, events, repository traits
//! +-- application/    Services, DTOs, listeners
//! +-- infrastructure/ Postgres and in-memory stores, event bus, metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
