// Resume review: first-page extraction, model completion, and the form controller.
// All model calls go through llm_client — no direct HTTP calls here.

pub mod controller;
pub mod extractor;
pub mod form;
pub mod handlers;
pub mod page;
pub mod prompts;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::review::prompts::{ANALYZE_PROMPT, MATCH_PROMPT};

/// The two buttons on the review form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Analyze,
    Match,
}

impl ReviewAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewAction::Analyze => "analyze",
            ReviewAction::Match => "match",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            ReviewAction::Analyze => ANALYZE_PROMPT,
            ReviewAction::Match => MATCH_PROMPT,
        }
    }

    /// Banner shown once the model has answered.
    pub fn success_title(self) -> &'static str {
        match self {
            ReviewAction::Analyze => "Resume Analysis Complete",
            ReviewAction::Match => "Match Score Ready",
        }
    }

    pub fn result_heading(self) -> &'static str {
        match self {
            ReviewAction::Analyze => "Expert Feedback",
            ReviewAction::Match => "Results",
        }
    }

    pub fn missing_resume_warning(self) -> &'static str {
        match self {
            ReviewAction::Analyze => "Please upload your resume to analyze.",
            ReviewAction::Match => "Please upload your resume to calculate match percentage.",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown review action '{}' (expected 'analyze' or 'match')", self.0)
    }
}

impl FromStr for ReviewAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analyze" => Ok(ReviewAction::Analyze),
            "match" => Ok(ReviewAction::Match),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}
