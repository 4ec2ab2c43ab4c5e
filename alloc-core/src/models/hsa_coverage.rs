use std::fmt;

use serde::{Deserialize, Serialize};

/// HSA coverage tier; selects which annual HSA cap applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HsaCoverageType {
    #[default]
    Individual,
    Family,
}

impl HsaCoverageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Family => "family",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" | "self" | "self-only" => Some(Self::Individual),
            "family" => Some(Self::Family),
            _ => None,
        }
    }
}

impl fmt::Display for HsaCoverageType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_is_individual() {
        assert_eq!(HsaCoverageType::default(), HsaCoverageType::Individual);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(HsaCoverageType::parse("FAMILY"), Some(HsaCoverageType::Family));
        assert_eq!(
            HsaCoverageType::parse(" Individual "),
            Some(HsaCoverageType::Individual)
        );
        assert_eq!(HsaCoverageType::parse("couple"), None);
    }
}
