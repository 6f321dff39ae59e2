//! Command Router: free text or symbolic code → one directive
//!
//! Keyword rules are checked in a fixed order and the first hit wins, so
//! "stop maju" is a STOP. Matching is case-insensitive substring search,
//! which means "putar" also catches "berputar" and "sampah" catches
//! "cari sampah"; both spellings stay listed so the table reads like the
//! voice vocabulary.

use tracing::debug;

use crate::core::config::RouterConfig;
use crate::types::{CommandDirective, DirectiveKind, RouteOutcome, RouteRule};

/// One ordered keyword rule
struct KeywordRule {
    kind: DirectiveKind,
    keywords: &'static [&'static str],
    /// Followed by an implicit stop after `rotate_secs`
    timed: bool,
}

impl KeywordRule {
    /// First listed keyword contained in already-lowercased text
    fn find(&self, lower: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|k| lower.contains(*k))
    }
}

// =============================================================================
// Priority order matters: STOP first so a stop is never shadowed
// =============================================================================
const RULES: &[KeywordRule] = &[
    KeywordRule { kind: DirectiveKind::Stop, keywords: &["stop", "berhenti", "diam"], timed: false },
    KeywordRule { kind: DirectiveKind::Forward, keywords: &["maju"], timed: false },
    KeywordRule { kind: DirectiveKind::Backward, keywords: &["mundur"], timed: false },
    KeywordRule { kind: DirectiveKind::RotateRight, keywords: &["berputar", "putar"], timed: true },
    KeywordRule { kind: DirectiveKind::AutoSearch, keywords: &["cari sampah", "sampah"], timed: false },
];

/// Routes command text to directives
#[derive(Debug, Clone)]
pub struct CommandRouter {
    rotate_secs: f64,
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRouter {
    /// Router with the default rotate duration
    pub fn new() -> Self {
        Self::with_config(&RouterConfig::default())
    }

    pub fn with_config(config: &RouterConfig) -> Self {
        Self {
            rotate_secs: config.rotate_secs,
        }
    }

    /// Route text to a directive. Absent, empty or blank text yields nothing.
    pub fn route<'a>(&self, text: impl Into<Option<&'a str>>) -> Option<CommandDirective> {
        self.route_detailed(text).map(|outcome| outcome.directive)
    }

    /// Route text and report which rule decided
    pub fn route_detailed<'a>(&self, text: impl Into<Option<&'a str>>) -> Option<RouteOutcome> {
        let text = text.into()?.trim();
        if text.is_empty() {
            return None;
        }

        let outcome = self.match_symbol(text).unwrap_or_else(|| self.match_keywords(text));
        debug!(input = text, rule = %outcome.rule.code(), kind = %outcome.directive.kind, "routed");
        Some(outcome)
    }

    /// A lone symbolic code from the manual pad. Runs until the pad sends `S`.
    fn match_symbol(&self, text: &str) -> Option<RouteOutcome> {
        let mut chars = text.chars();
        let code = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let kind = DirectiveKind::from_symbol(code)?;
        Some(RouteOutcome {
            directive: CommandDirective::new(kind),
            rule: RouteRule::Symbol(code.to_ascii_uppercase()),
        })
    }

    fn match_keywords(&self, text: &str) -> RouteOutcome {
        let lower = text.to_lowercase();
        for rule in RULES {
            if let Some(keyword) = rule.find(&lower) {
                let directive = if rule.timed {
                    CommandDirective::timed(rule.kind, self.rotate_secs)
                } else {
                    CommandDirective::new(rule.kind)
                };
                return RouteOutcome {
                    directive,
                    rule: RouteRule::Keyword(keyword),
                };
            }
        }
        RouteOutcome {
            directive: CommandDirective::new(DirectiveKind::Unknown),
            rule: RouteRule::NoMatch,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
