//! Product name and brand normalization.
//!
//! A [`Normalizer`] is compiled once from [`NormalizeRules`] and then applied
//! to every record. The pipeline is: literal substitutions in table order,
//! regex rewrites in table order, trim. Order is significant, later rules act
//! on the output of earlier ones.

use std::collections::HashMap;

use regex::Regex;
use salsheli_catalog::{NormalizeRules, Substitution};

use crate::error::RuleError;

/// Upper bound on pipeline passes while waiting for the output to settle.
const MAX_PASSES: usize = 8;

#[derive(Debug, Clone)]
struct CompiledRewrite {
    regex: Regex,
    replacement: String,
}

/// Compiled normalization rules.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    substitutions: Vec<Substitution>,
    rewrites: Vec<CompiledRewrite>,
    renames: HashMap<String, String>,
    icon_overrides: HashMap<String, String>,
}

impl Normalizer {
    /// Compile a rule table. Fails on an invalid regex or an empty literal.
    pub fn new(rules: &NormalizeRules) -> Result<Self, RuleError> {
        for sub in &rules.substitutions {
            if sub.from.is_empty() {
                return Err(RuleError::EmptyPattern { to: sub.to.clone() });
            }
        }

        let rewrites = rules
            .rewrites
            .iter()
            .map(|rw| {
                Regex::new(&rw.pattern)
                    .map(|regex| CompiledRewrite {
                        regex,
                        replacement: rw.replacement.clone(),
                    })
                    .map_err(|e| RuleError::InvalidPattern {
                        pattern: rw.pattern.clone(),
                        source: e,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            substitutions: rules.substitutions.clone(),
            rewrites,
            renames: rules
                .renames
                .iter()
                .map(|r| (r.from.clone(), r.to.clone()))
                .collect(),
            icon_overrides: rules
                .icon_overrides
                .iter()
                .map(|o| (o.name.clone(), o.icon.clone()))
                .collect(),
        })
    }

    /// Normalize a piece of text.
    ///
    /// The pipeline is re-run until its output stops changing, so the result
    /// is a fixed point: `normalize(normalize(s)) == normalize(s)`.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.pass(text);
        for _ in 1..MAX_PASSES {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
        log::warn!(
            "Normalizing '{}' did not settle after {} passes",
            text,
            MAX_PASSES
        );
        current
    }

    /// Fix a product name: an exact rename wins, otherwise [`Self::normalize`].
    pub fn fix_name(&self, name: &str) -> String {
        match self.renames.get(name) {
            Some(renamed) => renamed.clone(),
            None => self.normalize(name),
        }
    }

    /// Forced icon for an exact product name, if any.
    pub fn icon_override(&self, name: &str) -> Option<&str> {
        self.icon_overrides.get(name).map(String::as_str)
    }

    fn pass(&self, text: &str) -> String {
        let mut result = text.to_string();
        for sub in &self.substitutions {
            result = apply_substitution(&result, sub);
        }
        for rw in &self.rewrites {
            result = rw
                .regex
                .replace_all(&result, rw.replacement.as_str())
                .into_owned();
        }
        result.trim().to_string()
    }
}

/// Apply one literal substitution to every occurrence, left to right.
///
/// `word_start` substitutions only fire at the start of the text or right
/// after a space.
fn apply_substitution(text: &str, sub: &Substitution) -> String {
    if !sub.word_start {
        return text.replace(&sub.from, &sub.to);
    }

    let result = match text.strip_prefix(sub.from.as_str()) {
        Some(rest) => format!("{}{}", sub.to, rest),
        None => text.to_string(),
    };
    result.replace(&format!(" {}", sub.from), &format!(" {}", sub.to))
}

/// Strip control characters (stray newlines, carriage returns) and surrounding
/// whitespace from a brand label.
pub fn clean_brand(brand: &str) -> String {
    let cleaned: String = brand.chars().filter(|c| !c.is_control()).collect();
    cleaned.trim().to_string()
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
