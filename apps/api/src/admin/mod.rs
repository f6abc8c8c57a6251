// Admin dashboard API: usage statistics aggregated from analytics events and feedback.

pub mod auth;
pub mod handlers;
pub mod stats;
