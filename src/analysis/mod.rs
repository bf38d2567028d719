//! Idea classification.
//!
//! Derives a coarse domain/complexity/technology profile from a free-text
//! idea using static keyword tables. Matching is case-insensitive substring
//! containment; there is no tokenization or stemming. The whole module is
//! pure: same input, byte-identical output.

use serde::Serialize;

use crate::templates;

/// A coarse project category detected from idea keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    /// Websites and frontends.
    WebDevelopment,
    /// Mobile applications.
    MobileDevelopment,
    /// APIs, servers, and databases.
    BackendDevelopment,
    /// Data analysis and machine learning.
    DataScience,
    /// Deployment and infrastructure.
    #[serde(rename = "devops")]
    DevOps,
}

impl Domain {
    /// All domains, in detection order.
    pub const ALL: [Self; 5] = [
        Self::WebDevelopment,
        Self::MobileDevelopment,
        Self::BackendDevelopment,
        Self::DataScience,
        Self::DevOps,
    ];

    /// The canonical tag string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebDevelopment => "web-development",
            Self::MobileDevelopment => "mobile-development",
            Self::BackendDevelopment => "backend-development",
            Self::DataScience => "data-science",
            Self::DevOps => "devops",
        }
    }

    /// Title-case heading used in prompt section headers.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::MobileDevelopment => "Mobile Development",
            Self::BackendDevelopment => "Backend Development",
            Self::DataScience => "Data Science",
            Self::DevOps => "Devops",
        }
    }

    /// Keywords whose presence in the idea selects this domain.
    const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::WebDevelopment => &["website", "web", "frontend"],
            Self::MobileDevelopment => &["mobile", "app", "ios", "android"],
            Self::BackendDevelopment => &["api", "backend", "server", "database"],
            Self::DataScience => &["data", "analysis", "ml", "ai"],
            Self::DevOps => &["deploy", "cloud", "infrastructure"],
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complexity tier inferred from the idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Prototype or throwaway scope.
    Low,
    /// Standard project scope.
    #[default]
    Medium,
    /// Enterprise or distributed-system scope.
    High,
}

impl Complexity {
    /// The canonical tier string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Keywords that push the complexity assessment to [`Complexity::High`].
const HIGH_COMPLEXITY_KEYWORDS: &[&str] = &[
    "complex",
    "advanced",
    "enterprise",
    "scalable",
    "distributed",
    "microservices",
];

/// Keywords that pull the complexity assessment to [`Complexity::Low`].
///
/// Checked only after the high-complexity table: when an idea matches
/// both, high wins.
const LOW_COMPLEXITY_KEYWORDS: &[&str] = &["simple", "basic", "quick", "prototype", "minimal"];

/// Classification of a free-text idea.
///
/// Immutable once produced; created fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Detected domains, in detection order, without duplicates.
    pub domains: Vec<Domain>,
    /// Inferred complexity tier.
    pub complexity: Complexity,
    /// Detected technologies, in vocabulary order.
    pub technologies: Vec<&'static str>,
}

/// Classifies an idea against the static keyword tables.
///
/// The idea is lower-cased once; every match is a plain substring test.
/// An empty or keyword-free idea yields no domains, no technologies, and
/// [`Complexity::Medium`].
#[must_use]
pub fn analyze(idea: &str) -> Analysis {
    let keywords = idea.to_lowercase();

    let domains = Domain::ALL
        .into_iter()
        .filter(|domain| {
            domain
                .keywords()
                .iter()
                .any(|keyword| keywords.contains(keyword))
        })
        .collect();

    let complexity = if HIGH_COMPLEXITY_KEYWORDS
        .iter()
        .any(|keyword| keywords.contains(keyword))
    {
        Complexity::High
    } else if LOW_COMPLEXITY_KEYWORDS
        .iter()
        .any(|keyword| keywords.contains(keyword))
    {
        Complexity::Low
    } else {
        Complexity::Medium
    };

    let technologies = templates::TECHNOLOGIES
        .iter()
        .filter(|tech| keywords.contains(&tech.to_lowercase()))
        .copied()
        .collect();

    Analysis {
        domains,
        complexity,
        technologies,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use test_case::test_case;

    #[test]
    fn test_simple_website() {
        let analysis = analyze("Build a simple website");
        assert_eq!(analysis.domains, vec![Domain::WebDevelopment]);
        assert_eq!(analysis.complexity, Complexity::Low);
        assert!(analysis.technologies.is_empty());
    }

    #[test]
    fn test_complex_backend() {
        let analysis = analyze("Design a complex distributed microservices backend API with PostgreSQL");
        assert_eq!(analysis.domains, vec![Domain::BackendDevelopment]);
        assert_eq!(analysis.complexity, Complexity::High);
        assert!(
            analysis
                .technologies
                .iter()
                .any(|t| t.eq_ignore_ascii_case("postgresql"))
        );
    }

    #[test_case(""; "empty")]
    #[test_case("   \t\n"; "whitespace only")]
    fn test_empty_idea_is_neutral(idea: &str) {
        let analysis = analyze(idea);
        assert!(analysis.domains.is_empty());
        assert_eq!(analysis.complexity, Complexity::Medium);
        assert!(analysis.technologies.is_empty());
    }

    #[test]
    fn test_high_wins_over_low() {
        // Both tables match; the high-complexity check takes precedence.
        let analysis = analyze("a simple prototype of a distributed enterprise system");
        assert_eq!(analysis.complexity, Complexity::High);
    }

    #[test]
    fn test_domains_preserve_detection_order() {
        let analysis = analyze("deploy a web frontend with a backend api to the cloud");
        assert_eq!(
            analysis.domains,
            vec![
                Domain::WebDevelopment,
                Domain::BackendDevelopment,
                Domain::DevOps,
            ]
        );
    }

    #[test]
    fn test_domains_never_duplicate() {
        // Multiple keywords for the same domain still yield one tag.
        let analysis = analyze("a web website frontend");
        assert_eq!(analysis.domains, vec![Domain::WebDevelopment]);
    }

    #[test_case("use React and Vite", &["React", "Vite"]; "two techs")]
    #[test_case("typescript everywhere", &["TypeScript"]; "case insensitive")]
    #[test_case("no tech named here at all", &[]; "none")]
    fn test_technology_detection(idea: &str, expected: &[&str]) {
        let analysis = analyze(idea);
        assert_eq!(analysis.technologies, expected);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let idea = "Build a scalable web app with React and Docker";
        assert_eq!(analyze(idea), analyze(idea));
    }

    #[test]
    fn test_domain_serializes_as_tag() {
        let json = serde_json::to_string(&Domain::DevOps).unwrap();
        assert_eq!(json, "\"devops\"");
        let json = serde_json::to_string(&Domain::WebDevelopment).unwrap();
        assert_eq!(json, "\"web-development\"");
    }
}
