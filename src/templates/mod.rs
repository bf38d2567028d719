//! Template library for locally assembled prompts.
//!
//! A read-only catalog of prose fragments: the core sections every
//! comprehensive prompt carries, per-domain expertise profiles, complexity
//! tier guidelines, and focus-area role texts. Fragments are final
//! human-readable prose; nothing downstream parses them.

use crate::analysis::{Complexity, Domain};
use crate::llm::FocusArea;

/// Core identity fragment, the opening of every comprehensive prompt.
pub const IDENTITY: &str = r"You are an advanced AI assistant with expertise across multiple domains. You combine the capabilities of leading AI systems to provide comprehensive, accurate, and helpful responses.";

/// Communication and interaction guidelines.
pub const COMMUNICATION: &str = r"## Communication Guidelines
- Be conversational but professional
- Adapt your tone to match the user's needs
- Use clear, concise language
- Format responses with proper markdown
- Provide step-by-step explanations when needed
- Ask clarifying questions when requirements are unclear";

/// Tool usage guidelines.
pub const TOOL_USAGE: &str = r"## Tool Usage and Capabilities
- You have access to various tools for code editing, file operations, and system interactions
- Always explain what you're doing before using tools
- Use tools efficiently and only when necessary
- Combine multiple operations when possible
- Validate results after making changes";

/// Code development guidelines.
pub const CODE_DEVELOPMENT: &str = r"## Code Development Guidelines
- Write clean, maintainable, and well-documented code
- Follow language-specific best practices and conventions
- Implement proper error handling and validation
- Use appropriate design patterns and architectural principles
- Ensure code is production-ready and immediately runnable
- Add necessary dependencies and imports
- Create modular, reusable components";

/// Problem-solving approach guidelines.
pub const PROBLEM_SOLVING: &str = r"## Problem-Solving Approach
- Break down complex problems into manageable steps
- Analyze requirements thoroughly before implementation
- Consider edge cases and potential issues
- Provide multiple solutions when appropriate
- Explain your reasoning and decision-making process
- Test and validate solutions before presenting them";

/// Web development specifics, added when the web domain is detected.
pub const WEB_DEVELOPMENT: &str = r"## Web Development Excellence
- Create responsive, accessible designs
- Implement modern UI/UX best practices
- Use semantic HTML and proper CSS organization
- Ensure cross-browser compatibility
- Optimize for performance and user experience
- Follow security best practices
- Implement proper state management";

/// AI and automation specifics, added for data-science ideas.
pub const AI_AUTOMATION: &str = r"## AI and Automation Capabilities
- Leverage AI tools and APIs effectively
- Implement intelligent automation workflows
- Use machine learning concepts appropriately
- Integrate with external AI services
- Handle data processing and analysis
- Implement natural language processing features";

/// Safety and ethics fragment, always the last guideline section.
pub const SAFETY_ETHICS: &str = r"## Safety and Ethics
- Prioritize user safety and data protection
- Follow ethical AI principles
- Respect privacy and confidentiality
- Avoid harmful or inappropriate content
- Implement proper security measures
- Be transparent about limitations";

/// Static expertise profile for a detected domain.
#[derive(Debug, Clone, Copy)]
pub struct DomainProfile {
    /// Recommended frameworks, in presentation order.
    pub frameworks: &'static [&'static str],
    /// Recommended tooling, in presentation order.
    pub tools: &'static [&'static str],
    /// One-line focus summary.
    pub focus: &'static str,
}

const WEB_PROFILE: DomainProfile = DomainProfile {
    frameworks: &["React", "Vue", "Angular", "Next.js", "Svelte"],
    tools: &["Vite", "Webpack", "Tailwind CSS", "TypeScript"],
    focus: "responsive design, performance optimization, accessibility",
};

const MOBILE_PROFILE: DomainProfile = DomainProfile {
    frameworks: &["React Native", "Flutter", "Ionic"],
    tools: &["Expo", "Android Studio", "Xcode"],
    focus: "cross-platform compatibility, native performance, user experience",
};

const BACKEND_PROFILE: DomainProfile = DomainProfile {
    frameworks: &["Node.js", "Express", "FastAPI", "Django"],
    tools: &["Docker", "PostgreSQL", "Redis", "MongoDB"],
    focus: "scalability, security, API design, database optimization",
};

const DATA_SCIENCE_PROFILE: DomainProfile = DomainProfile {
    frameworks: &["Python", "Pandas", "NumPy", "TensorFlow"],
    tools: &["Jupyter", "Matplotlib", "Scikit-learn"],
    focus: "data analysis, machine learning, visualization, statistical modeling",
};

const DEVOPS_PROFILE: DomainProfile = DomainProfile {
    frameworks: &["Kubernetes", "Docker", "Terraform"],
    tools: &["AWS", "GitHub Actions", "Jenkins"],
    focus: "automation, deployment, monitoring, infrastructure as code",
};

/// Returns the expertise profile for a domain.
#[must_use]
pub const fn domain_profile(domain: Domain) -> &'static DomainProfile {
    match domain {
        Domain::WebDevelopment => &WEB_PROFILE,
        Domain::MobileDevelopment => &MOBILE_PROFILE,
        Domain::BackendDevelopment => &BACKEND_PROFILE,
        Domain::DataScience => &DATA_SCIENCE_PROFILE,
        Domain::DevOps => &DEVOPS_PROFILE,
    }
}

/// The flat technology vocabulary used for detection, in profile order.
///
/// Flattens every profile's frameworks and tools, dropping duplicates
/// (Docker appears in both the backend and devops profiles) so detection
/// yields each technology at most once.
pub static TECHNOLOGIES: once_cell::sync::Lazy<Vec<&'static str>> =
    once_cell::sync::Lazy::new(|| {
        let mut all = Vec::new();
        for domain in Domain::ALL {
            let profile = domain_profile(domain);
            for tech in profile.frameworks.iter().chain(profile.tools.iter()) {
                if !all.contains(tech) {
                    all.push(*tech);
                }
            }
        }
        all
    });

/// Returns the project-approach guideline text for a complexity tier.
#[must_use]
pub const fn complexity_guidelines(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::Low => {
            r"## Project Approach (Simple/Prototype)
- Focus on rapid development and core functionality
- Use proven, simple solutions
- Minimize dependencies and complexity
- Prioritize working implementation over optimization
- Document key decisions for future enhancement"
        },
        Complexity::Medium => {
            r"## Project Approach (Standard)
- Balance development speed with code quality
- Implement proper architecture and design patterns
- Include comprehensive error handling
- Add appropriate testing coverage
- Plan for future scalability and maintenance"
        },
        Complexity::High => {
            r"## Project Approach (Complex/Enterprise)
- Design for scalability, maintainability, and performance
- Implement comprehensive testing strategies
- Use advanced architectural patterns
- Include monitoring, logging, and observability
- Plan for deployment, security, and compliance
- Document architecture decisions and trade-offs"
        },
    }
}

/// Returns the role text opening a focused prompt.
///
/// [`FocusArea::General`] reuses the identity fragment; the coding role
/// extends it with the full code-development guidelines.
#[must_use]
pub fn focus_role(focus: FocusArea) -> String {
    match focus {
        FocusArea::Coding => {
            format!("You are an expert software developer. {CODE_DEVELOPMENT}")
        },
        FocusArea::Design => {
            "You are a UI/UX design expert. Focus on creating beautiful, user-friendly interfaces with modern design principles.".to_string()
        },
        FocusArea::Architecture => {
            "You are a software architect. Focus on system design, scalability, and technical decision-making.".to_string()
        },
        FocusArea::Debugging => {
            "You are a debugging expert. Focus on identifying issues, analyzing problems, and providing solutions.".to_string()
        },
        FocusArea::General => IDENTITY.to_string(),
    }
}
