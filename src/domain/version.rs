use crate::domain::BumpClass;
use crate::error::{Result, TagBumpError};
use std::fmt;

/// Semantic version representation
///
/// Always rendered with a leading `v`, e.g. `v1.2.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a baseline version string (e.g., "v1.2.3" or "1.2.3")
    ///
    /// Surrounding whitespace and a single leading `v` are ignored. The rest
    /// must be exactly three dot-separated runs of ASCII digits.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let parts: Vec<&str> = clean.split('.').collect();
        if parts.len() != 3 {
            return Err(TagBumpError::malformed_version(format!(
                "'{}' - expected MAJOR.MINOR.PATCH",
                text
            )));
        }

        let major = parse_component(text, "major", parts[0])?;
        let minor = parse_component(text, "minor", parts[1])?;
        let patch = parse_component(text, "patch", parts[2])?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump version according to the bump class
    ///
    /// `BumpClass::None` returns the version unchanged. Fails if the
    /// incremented component does not fit.
    pub fn bump(&self, class: BumpClass) -> Result<Self> {
        let bumped = match class {
            BumpClass::None => Some(*self),
            BumpClass::Major => self.major.checked_add(1).map(|major| Version {
                major,
                minor: 0,
                patch: 0,
            }),
            BumpClass::Minor => self.minor.checked_add(1).map(|minor| Version {
                major: self.major,
                minor,
                patch: 0,
            }),
            BumpClass::Patch => self.patch.checked_add(1).map(|patch| Version {
                major: self.major,
                minor: self.minor,
                patch,
            }),
        };

        bumped.ok_or_else(|| {
            TagBumpError::malformed_version(format!("{} cannot take a {} bump", self, class))
        })
    }
}

fn parse_component(text: &str, name: &str, part: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TagBumpError::malformed_version(format!(
            "'{}' - invalid {} component '{}'",
            text, name, part
        )));
    }

    part.parse::<u32>().map_err(|_| {
        TagBumpError::malformed_version(format!(
            "'{}' - {} component '{}' is out of range",
            text, name, part
        ))
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
