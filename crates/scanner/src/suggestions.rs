use envdoctor_core::{EnvironmentInfo, Issue, Severity, Suggestion};

/// Follow-up recommendations for a de-duplicated issue set
pub fn generate_suggestions(issues: &[Issue], environment: &EnvironmentInfo) -> Vec<Suggestion> {
    let has = |severity: Severity| issues.iter().any(|issue| issue.severity == severity);
    let mut suggestions = Vec::new();

    if has(Severity::Critical) {
        suggestions.push(Suggestion {
            id: "critical-fix-required".to_string(),
            title: "Critical Issues Detected".to_string(),
            description: "Your environment has critical issues that prevent normal operation."
                .to_string(),
            command: Some("envdoctor fix".to_string()),
            confidence: 90,
        });
    }

    if has(Severity::High) {
        suggestions.push(Suggestion {
            id: "high-priority-fixes".to_string(),
            title: "High Priority Fixes Available".to_string(),
            description: "Addressing these issues will improve your development experience."
                .to_string(),
            command: Some("envdoctor fix".to_string()),
            confidence: 80,
        });
    }

    if environment.is_wsl {
        suggestions.push(Suggestion {
            id: "wsl-optimization".to_string(),
            title: "WSL Optimization".to_string(),
            description:
                "Keep projects inside the Linux filesystem rather than /mnt for faster installs."
                    .to_string(),
            command: None,
            confidence: 70,
        });
    }

    suggestions
}
