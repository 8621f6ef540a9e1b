//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database connection management (PostgreSQL)
//! - Repository implementations (PostgreSQL and in-memory)
//! - The in-process event bus and publisher
//! - Prometheus metrics

pub mod database;
pub mod events;
pub mod metrics;
pub mod repositories;
