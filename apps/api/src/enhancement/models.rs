use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the caller wants done to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Enhance,
    Expand,
    Condense,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Enhance => "enhance",
            OperationKind::Expand => "expand",
            OperationKind::Condense => "condense",
        }
    }

    /// Enhance and expand must never hand back less text than they were given.
    pub fn requires_growth(self) -> bool {
        matches!(self, OperationKind::Enhance | OperationKind::Expand)
    }
}

/// One user action. Consumed once by the orchestrator.
#[derive(Debug, Clone)]
pub struct EnhancementRequest {
    pub raw_text: String,
    pub target_model_hint: String,
    pub custom_instructions: Option<String>,
    pub operation: OperationKind,
    pub user_id: Option<Uuid>,
}

impl EnhancementRequest {
    pub fn new(raw_text: impl Into<String>, operation: OperationKind) -> Self {
        Self {
            raw_text: raw_text.into(),
            target_model_hint: String::new(),
            custom_instructions: None,
            operation,
            user_id: None,
        }
    }

    pub fn with_target_model(mut self, hint: impl Into<String>) -> Self {
        self.target_model_hint = hint.into();
        self
    }

    pub fn with_custom_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.custom_instructions = Some(instructions.into());
        self
    }

    pub fn with_user(mut self, user_id: Option<Uuid>) -> Self {
        self.user_id = user_id;
        self
    }
}

/// The single successful outcome of an `EnhancementRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancementResult {
    pub text: String,
    pub model_used: String,
    pub elapsed_ms: u64,
    pub attempts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_kind_serde_is_snake_case() {
        let json = serde_json::to_string(&OperationKind::Condense).unwrap();
        assert_eq!(json, "\"condense\"");
        let op: OperationKind = serde_json::from_str("\"expand\"").unwrap();
        assert_eq!(op, OperationKind::Expand);
    }

    #[test]
    fn test_only_condense_may_shrink() {
        assert!(OperationKind::Enhance.requires_growth());
        assert!(OperationKind::Expand.requires_growth());
        assert!(!OperationKind::Condense.requires_growth());
    }

    #[test]
    fn test_request_builder_defaults() {
        let request = EnhancementRequest::new("write a poem", OperationKind::Enhance);
        assert!(request.target_model_hint.is_empty());
        assert!(request.custom_instructions.is_none());
        assert!(request.user_id.is_none());
    }
}
