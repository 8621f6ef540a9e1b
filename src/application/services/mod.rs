//! Application services (use-cases)
//!
//! Each service is a trait plus an implementation holding repository ports
//! and the event publisher. Handlers depend on the traits only.

pub mod group_service;
pub mod match_service;
pub mod message_service;
pub mod user_service;

pub use group_service::{GroupError, GroupService, GroupServiceImpl};
pub use match_service::{CreateMatchDto, MatchError, MatchService, MatchServiceImpl};
pub use message_service::{MessageError, MessageService, MessageServiceImpl};
pub use user_service::{
    ProvisionUserDto, UpdateProfileDto, UserError, UserService, UserServiceImpl,
};

#[cfg(test)]
pub use message_service::MockMessageService;
