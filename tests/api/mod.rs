//! REST API endpoint tests

mod group_tests;
mod health_tests;
mod match_tests;
mod message_tests;
mod user_tests;
