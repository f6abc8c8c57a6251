// User feedback on enhanced prompts (star rating plus optional comment).

pub mod handlers;
pub mod validation;
