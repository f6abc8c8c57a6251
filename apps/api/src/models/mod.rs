pub mod analytics;
pub mod feedback;
pub mod prompt;
