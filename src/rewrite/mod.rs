//! Ordered text-rewrite rules.
//!
//! A [`RuleSet`] is a list of named [`Rule`]s folded over the raw document
//! text. No DOM is built: every rule is a pattern match over the string.
//!
//! # Rule kinds
//!
//! | Action              | Effect                                           |
//! |---------------------|--------------------------------------------------|
//! | `Delete`            | remove every match                               |
//! | `Substitute`        | replace every match with a fixed string          |
//! | `CommentOut`        | wrap every match in `<!-- -->` unless wrapped    |
//! | `StructuralReplace` | first matching alternative wins                  |
//! | `ConditionalInject` | insert content at an anchor unless marker exists |
//!
//! Every action is idempotent on its own, so `apply(apply(d)) == apply(d)`.
//!
//! # Example
//!
//! ```ignore
//! let rules = RuleSet::standard(MenuMode::Companion, "files");
//! let rewrite = rules.apply(&html);
//! log!("clean"; "{} rules fired", rewrite.fired.len());
//! ```

mod rules;
#[cfg(test)]
mod tests;

use regex::{Captures, NoExpand, Regex};
use std::borrow::Cow;

pub use rules::{GOOGLE_FONTS_MARKER, JQUERY_PINNED, STORE_REMOVED_COMMENT};

// ============================================================================
// Rule
// ============================================================================

/// A named rewrite step.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Short identifier shown in verbose output.
    pub name: &'static str,
    pub action: Action,
}

/// What a rule does to the text.
#[derive(Debug, Clone)]
pub enum Action {
    /// Remove every occurrence of the pattern.
    Delete(Regex),
    /// Replace every occurrence with a literal (no `$` expansion).
    Substitute {
        pattern: Regex,
        replacement: Cow<'static, str>,
    },
    /// Wrap every occurrence of `tag` in an HTML comment.
    ///
    /// The pattern captures an optional `<!--` prefix in group 1; occurrences
    /// that already carry it are left as they are.
    CommentOut { pattern: Regex, tag: &'static str },
    /// Replace matches of the first alternative that matches at all.
    StructuralReplace {
        alternatives: Vec<Regex>,
        replacement: &'static str,
    },
    ConditionalInject(Injection),
}

/// Where injected content lands relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Before,
    After,
}

/// Guarded insertion of new content.
///
/// Fires only when `marker` is absent, `requires` (if any) is present and
/// `anchor` is found. Content is inserted at the first anchor occurrence.
#[derive(Debug, Clone)]
pub struct Injection {
    pub content: String,
    pub marker: String,
    pub anchor: &'static str,
    pub position: Position,
    pub requires: Option<&'static str>,
}

impl Rule {
    pub fn delete(name: &'static str, pattern: Regex) -> Self {
        Self {
            name,
            action: Action::Delete(pattern),
        }
    }

    pub fn substitute(
        name: &'static str,
        pattern: Regex,
        replacement: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name,
            action: Action::Substitute {
                pattern,
                replacement: replacement.into(),
            },
        }
    }

    /// Comment out a literal tag. The pattern is derived from the tag itself.
    pub fn comment_out(name: &'static str, tag: &'static str) -> Self {
        let pattern = Regex::new(&format!(r"(<!--\s*)?{}", regex::escape(tag)))
            .expect("escaped literal is a valid pattern");
        Self {
            name,
            action: Action::CommentOut { pattern, tag },
        }
    }

    pub fn structural(
        name: &'static str,
        alternatives: Vec<Regex>,
        replacement: &'static str,
    ) -> Self {
        Self {
            name,
            action: Action::StructuralReplace {
                alternatives,
                replacement,
            },
        }
    }

    pub fn inject(name: &'static str, injection: Injection) -> Self {
        Self {
            name,
            action: Action::ConditionalInject(injection),
        }
    }

    /// Apply this rule. Returns `Cow::Borrowed` when nothing matched.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.action {
            Action::Delete(pattern) => pattern.replace_all(text, ""),
            Action::Substitute {
                pattern,
                replacement,
            } => pattern.replace_all(text, NoExpand(replacement.as_ref())),
            Action::CommentOut { pattern, tag } => comment_out(pattern, tag, text),
            Action::StructuralReplace {
                alternatives,
                replacement,
            } => alternatives
                .iter()
                .find(|re| re.is_match(text))
                .map_or(Cow::Borrowed(text), |re| {
                    re.replace_all(text, NoExpand(*replacement))
                }),
            Action::ConditionalInject(injection) => injection.apply(text),
        }
    }
}

fn comment_out<'a>(pattern: &Regex, tag: &str, text: &'a str) -> Cow<'a, str> {
    // Avoid allocating when every occurrence is already commented.
    if !pattern.captures_iter(text).any(|caps| caps.get(1).is_none()) {
        return Cow::Borrowed(text);
    }
    pattern.replace_all(text, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            caps[0].to_string()
        } else {
            format!("<!-- {tag} -->")
        }
    })
}

impl Injection {
    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.contains(self.marker.as_str()) {
            return Cow::Borrowed(text);
        }
        if let Some(required) = self.requires
            && !text.contains(required)
        {
            return Cow::Borrowed(text);
        }
        let Some(start) = text.find(self.anchor) else {
            return Cow::Borrowed(text);
        };

        let at = match self.position {
            Position::Before => start,
            Position::After => start + self.anchor.len(),
        };
        let mut out = String::with_capacity(text.len() + self.content.len());
        out.push_str(&text[..at]);
        out.push_str(&self.content);
        out.push_str(&text[at..]);
        Cow::Owned(out)
    }
}

// ============================================================================
// RuleSet
// ============================================================================

/// Result of running a [`RuleSet`] over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Names of rules that changed the text, in application order.
    pub fired: Vec<&'static str>,
}

impl Rewrite {
    pub fn is_unchanged(&self) -> bool {
        self.fired.is_empty()
    }
}

/// Ordered collection of rules, applied once per document.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fold every rule over `text` in order.
    pub fn apply(&self, text: &str) -> Rewrite {
        let mut fired = Vec::new();
        let text = self.rules.iter().fold(text.to_owned(), |acc, rule| {
            let changed = match rule.apply(&acc) {
                Cow::Owned(out) if out != acc => Some(out),
                _ => None,
            };
            match changed {
                Some(out) => {
                    fired.push(rule.name);
                    out
                }
                None => acc,
            }
        });
        Rewrite { text, fired }
    }
}
