//! Keyword knowledge base - static rule matching for the keywords strategy
//!
//! Matching is lowercase substring containment against an ordered rule list,
//! first match wins. The built-in rules cover the HR helpdesk domain and can
//! be replaced wholesale by a YAML document.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::application::errors::ConfigError;

/// Reply when no rule matches
const NO_MATCH_REPLY: &str =
    "Sorry, I don't know that one yet. Write to hr@company.example and a colleague will help.";

/// One keyword rule. Any keyword contained in the lowercased message selects
/// the reply; higher-priority rules are tried first.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeywordRule {
    pub category: String,
    pub keywords: Vec<String>,
    pub reply: String,
    #[serde(default)]
    pub priority: i32,
}

static DEFAULT_RULES: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    vec![
        KeywordRule {
            category: "hr".to_string(),
            keywords: vec![
                "hr".to_string(),
                "human resources".to_string(),
                "contact".to_string(),
            ],
            reply: "You can reach the HR team at hr@company.example or ext. 100 \
                    (9:00-18:00, Mon-Fri)."
                .to_string(),
            priority: 10,
        },
        KeywordRule {
            category: "vacation".to_string(),
            keywords: vec![
                "vacation".to_string(),
                "holiday".to_string(),
                "day off".to_string(),
                "time off".to_string(),
            ],
            reply: "Vacation requests go through the employee portal at least two weeks in \
                    advance. Annual paid leave is 28 calendar days."
                .to_string(),
            priority: 5,
        },
        KeywordRule {
            category: "sick-leave".to_string(),
            keywords: vec![
                "sick".to_string(),
                "illness".to_string(),
                "doctor".to_string(),
            ],
            reply: "If you are ill, tell your manager before 10:00 and hand your sick note to HR \
                    within three days of returning. Electronic sick notes are accepted."
                .to_string(),
            priority: 5,
        },
        KeywordRule {
            category: "payroll".to_string(),
            keywords: vec![
                "salary".to_string(),
                "payroll".to_string(),
                "payslip".to_string(),
                "bonus".to_string(),
            ],
            reply: "Salary is paid on the 5th and 20th of each month. Payslip questions go to \
                    payroll@company.example."
                .to_string(),
            priority: 5,
        },
        KeywordRule {
            category: "equipment".to_string(),
            keywords: vec![
                "laptop".to_string(),
                "computer".to_string(),
                "equipment".to_string(),
                "it support".to_string(),
            ],
            reply: "IT support takes requests through the service desk, ext. 200, working days \
                    9:00-18:00."
                .to_string(),
            priority: 0,
        },
    ]
});

/// In-memory rule set, loaded once and read-only afterwards
pub struct KnowledgeBase {
    rules: Vec<KeywordRule>,
    no_match_reply: String,
}

impl KnowledgeBase {
    pub fn with_defaults() -> Self {
        Self::from_rules(DEFAULT_RULES.clone())
    }

    /// Rules are ordered by descending priority; definition order breaks ties
    pub fn from_rules(mut rules: Vec<KeywordRule>) -> Self {
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self {
            rules,
            no_match_reply: NO_MATCH_REPLY.to_string(),
        }
    }

    /// Load a YAML rule list from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read knowledge rules: {}", e)))?;
        let rules: Vec<KeywordRule> = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse knowledge rules: {}", e)))?;
        Ok(Self::from_rules(rules))
    }

    /// First rule whose any keyword is contained in the lowercased text
    pub fn lookup(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|keyword| lowered.contains(&keyword.to_lowercase()))
            })
            .map(|rule| rule.reply.as_str())
    }

    pub fn no_match_reply(&self) -> &str {
        &self.no_match_reply
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
