//! Instruction pair sent to remote providers.
//!
//! A compressed counterpart of the local template assembler: instead of
//! emitting the final prompt, these texts instruct a remote model to write
//! one. Both provider clients share the same pair.

use super::{FocusArea, GenerationMode};

/// Base system instruction establishing the prompt-engineer role.
const BASE_SYSTEM: &str = r"You are an expert AI prompt engineer with deep knowledge of all major AI systems including GPT-4, Claude, Gemini, and specialized coding assistants like Cursor, v0, Windsurf, Bolt, and others.

Your task is to create highly effective system prompts that combine the best practices from multiple AI systems. You have access to the actual system prompts from leading AI tools and should draw from their strengths.

Key principles:
- Create prompts that are clear, specific, and actionable
- Include proper role definition and capabilities
- Add relevant guidelines for tool usage and code generation
- Incorporate safety and ethical considerations
- Tailor the prompt to the specific use case and domain
- Make the prompt production-ready and immediately usable";

/// Per-focus-area addendum for focused mode.
const fn focus_instruction(focus: FocusArea) -> &'static str {
    match focus {
        FocusArea::General => "Focus on creating a versatile general-purpose assistant prompt.",
        FocusArea::Coding => {
            "Focus on creating a specialized coding assistant prompt with emphasis on code quality, best practices, and development workflows."
        },
        FocusArea::Design => {
            "Focus on creating a UI/UX design expert prompt with emphasis on user experience, visual design, and accessibility."
        },
        FocusArea::Architecture => {
            "Focus on creating a software architecture expert prompt with emphasis on system design, scalability, and technical decision-making."
        },
        FocusArea::Debugging => {
            "Focus on creating a debugging specialist prompt with emphasis on problem diagnosis, error analysis, and solution finding."
        },
    }
}

/// Builds the system-role instruction for a generation mode.
#[must_use]
pub fn system_instruction(mode: GenerationMode) -> String {
    match mode {
        GenerationMode::Comprehensive => format!(
            "{BASE_SYSTEM}\n\nCreate a comprehensive prompt that combines multiple AI capabilities and can handle diverse tasks effectively."
        ),
        GenerationMode::Focused(focus) => {
            format!("{BASE_SYSTEM}\n\n{}", focus_instruction(focus))
        },
    }
}

/// Builds the user-role instruction embedding the idea verbatim.
#[must_use]
pub fn user_instruction(idea: &str, mode: GenerationMode) -> String {
    let shape_note = match mode {
        GenerationMode::Comprehensive => {
            "Create a detailed, comprehensive prompt that covers all aspects and can handle complex scenarios.".to_string()
        },
        GenerationMode::Focused(focus) => {
            format!("Create a focused prompt optimized for {} tasks.", focus.as_str())
        },
    };

    format!(
        r#"Analyze this user request and create a {mode} AI system prompt for it:

"{idea}"

Requirements:
1. Create a complete, ready-to-use system prompt
2. Include role definition and core capabilities
3. Add specific guidelines relevant to the task
4. Include tool usage instructions if applicable
5. Add safety and ethical guidelines
6. Make it production-ready and immediately usable

{shape_note}

The output should be a complete system prompt that can be directly used with any AI assistant. Do not include explanations or meta-commentary - just return the actual system prompt content."#,
        mode = mode.as_str(),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_system_instruction_comprehensive() {
        let system = system_instruction(GenerationMode::Comprehensive);
        assert!(system.starts_with(BASE_SYSTEM));
        assert!(system.contains("comprehensive prompt"));
    }

    #[test]
    fn test_system_instruction_focused_appends_focus() {
        let system = system_instruction(GenerationMode::Focused(FocusArea::Debugging));
        assert!(system.contains("debugging specialist"));
        assert!(!system.contains("general-purpose assistant"));
    }

    #[test]
    fn test_user_instruction_embeds_idea_verbatim() {
        let idea = "Build a recipe-sharing app";
        let user = user_instruction(idea, GenerationMode::Comprehensive);
        assert!(user.contains("\"Build a recipe-sharing app\""));
        assert!(user.contains("1. Create a complete, ready-to-use system prompt"));
        assert!(user.contains("comprehensive AI system prompt"));
    }

    #[test]
    fn test_user_instruction_focused_names_area() {
        let user = user_instruction("idea", GenerationMode::Focused(FocusArea::Coding));
        assert!(user.contains("optimized for coding tasks"));
        assert!(user.contains("focused AI system prompt"));
    }
}
