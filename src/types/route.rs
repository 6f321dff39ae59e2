//! Route outcome: which rule produced a directive

use serde::Serialize;

use crate::types::CommandDirective;

/// The rule that decided a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum RouteRule {
    /// Whole input was a single symbolic code
    Symbol(char),
    /// Keyword found in free text
    Keyword(&'static str),
    /// Nothing matched
    NoMatch,
}

impl RouteRule {
    /// Short code for logging
    pub fn code(&self) -> String {
        match self {
            RouteRule::Symbol(c) => format!("SYMBOL_{}", c),
            RouteRule::Keyword(word) => format!("KEYWORD_{}", word.to_uppercase().replace(' ', "_")),
            RouteRule::NoMatch => "NO_MATCH".to_string(),
        }
    }
}

/// A directive together with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteOutcome {
    pub directive: CommandDirective,
    pub rule: RouteRule,
}
