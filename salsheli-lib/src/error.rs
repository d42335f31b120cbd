use thiserror::Error;

/// Errors raised while compiling or looking up rules.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A rewrite pattern is not a valid regular expression
    #[error("Invalid rewrite pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// A literal substitution with nothing to match
    #[error("Empty substitution pattern (replacement '{to}')")]
    EmptyPattern { to: String },

    /// No reclassify or prune plan with this id
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),
}

impl RuleError {
    pub fn unknown_plan(id: impl Into<String>) -> Self {
        Self::UnknownPlan(id.into())
    }
}
