//! Local prompt assembly.
//!
//! Builds the final prompt text by concatenating template fragments in a
//! fixed order, with blank-line separators. Assembly is pure: identical
//! inputs always yield byte-identical output. No length cap is enforced
//! here; that is a caller or provider concern.

use crate::analysis::{Analysis, Domain};
use crate::llm::FocusArea;
use crate::templates;

/// Builds the expertise section for one detected domain.
fn domain_section(domain: Domain) -> String {
    let profile = templates::domain_profile(domain);
    format!(
        r"## {title} Expertise

**Recommended Technologies:**
- Frameworks: {frameworks}
- Tools: {tools}

**Focus Areas:** {focus}

**Best Practices:**
- Follow industry standards and conventions
- Implement proper testing strategies
- Ensure code quality and maintainability
- Consider performance and scalability
- Document your implementation decisions",
        title = domain.title(),
        frameworks = profile.frameworks.join(", "),
        tools = profile.tools.join(", "),
        focus = profile.focus,
    )
}

/// Builds the expertise sections for the given domains, in order.
fn domain_sections(domains: &[Domain]) -> String {
    domains
        .iter()
        .map(|domain| domain_section(*domain))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the technology-specific instruction section.
fn technology_instructions(technologies: &[&str]) -> String {
    format!(
        r"## Technology-Specific Guidelines

**Selected Technologies:** {techs}

**Implementation Notes:**
- Use the latest stable versions of selected technologies
- Follow official documentation and best practices
- Implement proper configuration and setup
- Consider integration patterns between technologies
- Ensure compatibility and version alignment",
        techs = technologies.join(", "),
    )
}

/// The closing task block carrying the idea and the mission checklist.
fn task_block(idea: &str) -> String {
    format!(
        r"## Task-Specific Instructions

**User Request:** {idea}

**Your Mission:**
1. Analyze the user's request thoroughly
2. Break down the task into clear, actionable steps
3. Implement the solution using best practices
4. Provide clear explanations of your approach
5. Test and validate your implementation
6. Offer suggestions for improvements or extensions

**Success Criteria:**
- Solution directly addresses the user's needs
- Code is clean, well-documented, and production-ready
- Implementation follows industry best practices
- User receives clear guidance and explanations
- Solution is scalable and maintainable

**Remember:** You are combining the expertise of multiple AI systems to provide the most comprehensive and helpful response possible. Draw from the strengths of coding assistants, design experts, and technical advisors to deliver exceptional results."
    )
}

/// Assembles the comprehensive prompt for an idea.
///
/// Section order is fixed: title, the five core fragments, per-domain
/// expertise, conditional web and AI sections, complexity tier,
/// conditional technology notes, safety, and the closing task block. The
/// idea text appears verbatim in the title and the task block.
#[must_use]
pub fn assemble_comprehensive(idea: &str, analysis: &Analysis) -> String {
    let mut sections = vec![
        format!("# Comprehensive AI Assistant Prompt for: \"{idea}\""),
        templates::IDENTITY.to_string(),
        templates::COMMUNICATION.to_string(),
        templates::TOOL_USAGE.to_string(),
        templates::CODE_DEVELOPMENT.to_string(),
        templates::PROBLEM_SOLVING.to_string(),
    ];

    if !analysis.domains.is_empty() {
        sections.push(domain_sections(&analysis.domains));
    }

    if analysis.domains.contains(&Domain::WebDevelopment) {
        sections.push(templates::WEB_DEVELOPMENT.to_string());
    }

    if analysis.domains.contains(&Domain::DataScience) || idea.to_lowercase().contains("ai") {
        sections.push(templates::AI_AUTOMATION.to_string());
    }

    sections.push(templates::complexity_guidelines(analysis.complexity).to_string());

    if !analysis.technologies.is_empty() {
        sections.push(technology_instructions(&analysis.technologies));
    }

    sections.push(templates::SAFETY_ETHICS.to_string());
    sections.push(task_block(idea));

    sections.join("\n\n")
}

/// Number of domain sections a focused prompt carries at most.
const FOCUSED_DOMAIN_LIMIT: usize = 2;

/// Assembles the shorter, focused prompt for an idea.
///
/// Opens with the role text for the focus area, keeps at most the first
/// two detected domains, and closes with a short task block embedding the
/// idea verbatim.
#[must_use]
pub fn assemble_focused(idea: &str, analysis: &Analysis, focus: FocusArea) -> String {
    let mut sections = vec![templates::focus_role(focus)];

    if !analysis.domains.is_empty() {
        let limit = analysis.domains.len().min(FOCUSED_DOMAIN_LIMIT);
        sections.push(domain_sections(&analysis.domains[..limit]));
    }

    sections.push(format!(
        "## Task: {idea}\n\nProvide a focused, actionable response that directly addresses this request. Be concise but comprehensive in your approach."
    ));

    sections.join("\n\n")
}
