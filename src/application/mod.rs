//! Application Layer
//!
//! Contains the use-case services, the event listeners reacting to domain
//! events, and the data transfer objects (DTOs) exchanged with the
//! presentation layer.

pub mod dto;
pub mod listeners;
pub mod services;
