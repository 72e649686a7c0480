use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::LimitDatesError;

/// Jurisdictions in the order they are processed. Era-suffixed codes are
/// independent datasets; the suffix is never interpreted.
pub const DEFAULT_JURISDICTIONS: [&str; 57] = [
    "AL",
    "AK",
    "AZ",
    "AR",
    "CA",
    "CO",
    "CT",
    "DE",
    "FL",
    "GA",
    "HI",
    "ID",
    "IL",
    "IN",
    "IA",
    "KS",
    "KY_pre-2010",
    "KY_2010-2019",
    "KY_post-2019",
    "LA",
    "MA",
    "MD",
    "ME",
    "MI",
    "MN",
    "MS",
    "MO",
    "MT",
    "NE",
    "NV",
    "NH",
    "NJ",
    "NM",
    "NY",
    "NC",
    "ND",
    "OH_pre-2010",
    "OH_post-2010",
    "OK",
    "OR",
    "PA",
    "RI",
    "SC",
    "SD",
    "TN",
    "TX",
    "UT",
    "VT",
    "VA",
    "WA",
    "WV_pre-2010",
    "WV_2010-2015",
    "WV_2015-2018",
    "WV_2018-2020",
    "WV_post-2020",
    "WI",
    "WY",
];

/// Opaque dataset key naming one jurisdiction's input and output files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jurisdiction(String);

impl Jurisdiction {
    pub fn new(token: impl Into<String>) -> Result<Self, LimitDatesError> {
        let token = token.into();
        let reason = if token.trim().is_empty() {
            Some("must not be empty")
        } else if token.contains(['/', '\\']) {
            Some("must not contain path separators")
        } else if token.contains("..") {
            Some("must not contain '..'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(LimitDatesError::InvalidJurisdiction { token, reason }),
            None => Ok(Self(token)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Jurisdiction {
    type Err = LimitDatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Jurisdiction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Jurisdiction::new(token).map_err(serde::de::Error::custom)
    }
}

pub fn default_jurisdictions() -> Vec<Jurisdiction> {
    DEFAULT_JURISDICTIONS
        .iter()
        .map(|token| Jurisdiction((*token).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn default_list_is_ordered_and_unique() {
        let list = default_jurisdictions();
        assert_eq!(list.len(), DEFAULT_JURISDICTIONS.len());
        assert_eq!(list.first().map(Jurisdiction::as_str), Some("AL"));
        assert_eq!(list.last().map(Jurisdiction::as_str), Some("WY"));

        let unique: HashSet<_> = list.iter().collect();
        assert_eq!(unique.len(), list.len());
    }

    #[test]
    fn era_variants_are_separate_keys() {
        let kentucky: Vec<&str> = DEFAULT_JURISDICTIONS
            .iter()
            .copied()
            .filter(|token| token.starts_with("KY"))
            .collect();
        assert_eq!(kentucky, ["KY_pre-2010", "KY_2010-2019", "KY_post-2019"]);

        let west_virginia = DEFAULT_JURISDICTIONS
            .iter()
            .filter(|token| token.starts_with("WV"))
            .count();
        assert_eq!(west_virginia, 5);
    }

    #[test]
    fn rejects_tokens_unsafe_for_file_names() {
        for token in ["", "  ", "../AL", "AL/x", "AL\\x"] {
            let err = Jurisdiction::new(token).expect_err("token should be rejected");
            assert!(matches!(err, LimitDatesError::InvalidJurisdiction { .. }));
        }
        assert_eq!(
            "OH_post-2010".parse::<Jurisdiction>().unwrap().as_str(),
            "OH_post-2010"
        );
    }
}
