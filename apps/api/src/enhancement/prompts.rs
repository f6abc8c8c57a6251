// System prompts for the enhancement pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::enhancement::models::OperationKind;
use crate::llm_client::prompts::{NO_EXECUTION_INSTRUCTION, OUTPUT_ONLY_INSTRUCTION};

/// Rewrite a rough prompt into a 3–5× more detailed instruction.
pub const ENHANCE_SYSTEM: &str = "\
    You are an expert prompt engineer. Rewrite the user's prompt into a clear, \
    specific instruction that is 3 to 5 times more detailed than the original. \
    Preserve the original intent and subject. Add: \
    (1) the role or expertise the assistant should adopt, \
    (2) concrete context and specifics inferred from the request, \
    (3) structure: numbered steps or sections where the task has parts, \
    (4) constraints: scope, tone, length, format, audience, \
    (5) explicit deliverables describing exactly what the output must contain. \
    Write it as a direct instruction in the second person. \
    Never produce a generic template with placeholders such as [topic] or <insert>.";

/// Elaborate an already-enhanced prompt a further 4–6×.
pub const EXPAND_SYSTEM: &str = "\
    You are an expert prompt engineer. The user's text is an already-detailed prompt. \
    Expand it into a version 4 to 6 times more comprehensive: add edge cases to handle, \
    quality criteria, examples of the expected output style, step-by-step methodology, \
    and success criteria. Keep every requirement from the original and keep its intent. \
    Never produce a generic template with placeholders.";

/// Compress a prompt while keeping everything that matters.
pub const CONDENSE_SYSTEM: &str = "\
    You are an expert prompt engineer. Condense the user's prompt into the shortest \
    version that preserves every essential requirement, constraint and deliverable. \
    Remove repetition, filler and decorative language. Keep it a direct instruction.";

/// Builds the system prompt for a request. Custom instructions replace the
/// default enhance prompt verbatim; they are ignored for expand and condense.
pub fn build_system_prompt(operation: OperationKind, custom_instructions: Option<&str>) -> String {
    if operation == OperationKind::Enhance {
        if let Some(custom) = custom_instructions.filter(|c| !c.trim().is_empty()) {
            return custom.to_string();
        }
    }

    let base = match operation {
        OperationKind::Enhance => ENHANCE_SYSTEM,
        OperationKind::Expand => EXPAND_SYSTEM,
        OperationKind::Condense => CONDENSE_SYSTEM,
    };
    format!("{base}\n\n{NO_EXECUTION_INSTRUCTION}\n\n{OUTPUT_ONLY_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_prompt_forbids_meta_commentary() {
        let prompt = build_system_prompt(OperationKind::Enhance, None);
        assert!(prompt.starts_with(ENHANCE_SYSTEM));
        assert!(prompt.contains("3 to 5 times"));
        assert!(prompt.contains("meta-commentary"));
    }

    #[test]
    fn test_each_operation_has_its_own_prompt() {
        let enhance = build_system_prompt(OperationKind::Enhance, None);
        let expand = build_system_prompt(OperationKind::Expand, None);
        let condense = build_system_prompt(OperationKind::Condense, None);
        assert!(expand.contains("4 to 6 times"));
        assert!(condense.contains("Condense"));
        assert_ne!(enhance, expand);
        assert_ne!(expand, condense);
    }

    #[test]
    fn test_custom_instructions_override_enhance_verbatim() {
        let custom = "Rewrite this as a haiku request.";
        assert_eq!(build_system_prompt(OperationKind::Enhance, Some(custom)), custom);
    }

    #[test]
    fn test_blank_custom_instructions_are_ignored() {
        assert_eq!(
            build_system_prompt(OperationKind::Enhance, Some("   ")),
            build_system_prompt(OperationKind::Enhance, None)
        );
    }

    #[test]
    fn test_custom_instructions_do_not_apply_to_condense() {
        let prompt = build_system_prompt(OperationKind::Condense, Some("custom"));
        assert!(prompt.starts_with(CONDENSE_SYSTEM));
    }
}
