use crate::config::RulesConfig;
use crate::error::{Result, TagBumpError};
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Severity of a version increment, ordered `None < Patch < Minor < Major`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpClass {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpClass::None => "none",
            BumpClass::Patch => "patch",
            BumpClass::Minor => "minor",
            BumpClass::Major => "major",
        };
        f.write_str(name)
    }
}

/// Classifies a trigger string (commit or pull-request title) into a bump class
///
/// Each class owns a list of literal prefixes. Matching is case-insensitive
/// and anchored at the start of the trigger. Classes are tried from major
/// down to patch and the first hit wins.
pub struct BumpClassifier {
    rules: Vec<(BumpClass, Regex)>,
}

impl BumpClassifier {
    /// Build a classifier from configured prefix lists
    pub fn new(config: &RulesConfig) -> Result<Self> {
        let mut rules = Vec::new();

        for (class, prefixes) in [
            (BumpClass::Major, &config.major),
            (BumpClass::Minor, &config.minor),
            (BumpClass::Patch, &config.patch),
        ] {
            if let Some(re) = prefix_regex(prefixes)? {
                rules.push((class, re));
            }
        }

        Ok(BumpClassifier { rules })
    }

    /// Return the bump class for a trigger string
    pub fn classify(&self, trigger: &str) -> BumpClass {
        self.rules
            .iter()
            .find(|(_, re)| re.is_match(trigger))
            .map(|(class, _)| *class)
            .unwrap_or(BumpClass::None)
    }
}

fn prefix_regex(prefixes: &[String]) -> Result<Option<Regex>> {
    let alternatives: Vec<String> = prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| regex::escape(p))
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    RegexBuilder::new(&format!("^(?:{})", alternatives.join("|")))
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| TagBumpError::config(format!("Invalid bump rule: {}", e)))
}
