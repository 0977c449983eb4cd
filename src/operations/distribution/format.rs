//! Text forms of distributions as they are stored on a bar run.
//!
//! Custom distributions are `amount@spacing` segments joined by `+`
//! (`3@100+12@183.33+3@100`). Diameter groups use `count#diameter` segments
//! with an optional `mm` suffix on input (`3#16mm+2#20`), printed without it.
//! A single `0` stands for an empty group list. Integral numbers print
//! without a fractional part.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, RebarError, Result};
use crate::operations::layout::RebarGroup;

use super::{CustomDistribution, Segment};

/// Ordered `(count, diameter)` groups, as written in `count#diameter` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberDiameterList {
    groups: Vec<RebarGroup>,
}

impl NumberDiameterList {
    #[must_use]
    pub fn new(groups: Vec<RebarGroup>) -> Self {
        Self { groups }
    }

    #[must_use]
    pub fn groups(&self) -> &[RebarGroup] {
        &self.groups
    }

    #[must_use]
    pub fn into_groups(self) -> Vec<RebarGroup> {
        self.groups
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl TryFrom<String> for NumberDiameterList {
    type Error = RebarError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<NumberDiameterList> for String {
    fn from(value: NumberDiameterList) -> Self {
        value.to_string()
    }
}

fn malformed(input: &str, reason: impl Into<String>) -> RebarError {
    let reason = reason.into();
    tracing::warn!(input, %reason, "malformed distribution string");
    ParseError::MalformedDistributionString {
        input: input.to_owned(),
        reason,
    }
    .into()
}

/// Splits `input` into `(count, value)` pairs around `separator`.
fn parse_pairs(input: &str, separator: char, strip_mm: bool) -> Result<Vec<(u32, f64)>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(malformed(input, "empty string"));
    }
    trimmed
        .split('+')
        .map(|token| {
            let (count, value) = token.split_once(separator).ok_or_else(|| {
                malformed(input, format!("segment {token:?} has no '{separator}'"))
            })?;
            let count = count.trim();
            let count: u32 = count
                .parse()
                .map_err(|_| malformed(input, format!("count {count:?} is not a whole number")))?;
            let mut value = value.trim();
            if strip_mm {
                value = value.strip_suffix("mm").unwrap_or(value).trim_end();
            }
            let number: f64 = value
                .parse()
                .map_err(|_| malformed(input, format!("value {value:?} is not a number")))?;
            if count == 0 {
                return Err(malformed(input, format!("segment {token:?} has a zero count")));
            }
            if !number.is_finite() || number <= 0.0 {
                return Err(malformed(input, format!("value {value:?} must be positive")));
            }
            Ok((count, number))
        })
        .collect()
}

impl FromStr for CustomDistribution {
    type Err = RebarError;

    fn from_str(s: &str) -> Result<Self> {
        let segments = parse_pairs(s, '@', false)?
            .into_iter()
            .map(|(amount, spacing)| Segment::new(amount, spacing))
            .collect();
        let distribution = Self::new(segments);
        if distribution.total_bars().is_err() {
            return Err(malformed(s, "total bar count exceeds u32"));
        }
        Ok(distribution)
    }
}

impl fmt::Display for CustomDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}@{}", segment.amount, segment.spacing)?;
        }
        Ok(())
    }
}

impl FromStr for NumberDiameterList {
    type Err = RebarError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim() == "0" {
            return Ok(Self::new(Vec::new()));
        }
        let groups = parse_pairs(s, '#', true)?
            .into_iter()
            .map(|(count, diameter)| RebarGroup::new(count, diameter))
            .collect();
        Ok(Self::new(groups))
    }
}

impl fmt::Display for NumberDiameterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.groups.is_empty() {
            return f.write_str("0");
        }
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}#{}", group.count, group.diameter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_three_segments() {
        let distribution: CustomDistribution = "3@100+12@183.33+3@100".parse().unwrap();
        let segments = distribution.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::new(3, 100.0));
        assert_eq!(segments[1].amount, 12);
        assert_relative_eq!(segments[1].spacing, 183.33);
        assert_eq!(segments[2], Segment::new(3, 100.0));
        assert_eq!(distribution.to_string(), "3@100+12@183.33+3@100");
    }

    #[test]
    fn tolerates_whitespace() {
        let distribution: CustomDistribution = " 2 @ 150 + 4@200 ".parse().unwrap();
        assert_eq!(
            distribution.segments(),
            &[Segment::new(2, 150.0), Segment::new(4, 200.0)]
        );
        assert_eq!(distribution.to_string(), "2@150+4@200");
    }

    #[test]
    fn rejects_malformed_input() {
        for input in [
            "",
            "3@",
            "@100",
            "3x100",
            "3@100+",
            "2.5@100",
            "3@abc",
            "0@100",
            "3@-10",
            "4294967296@1",
            "4294967295@1+1@1",
        ] {
            let err = input.parse::<CustomDistribution>().unwrap_err();
            assert!(
                matches!(err, RebarError::Parse(ParseError::MalformedDistributionString { .. })),
                "{input:?}"
            );
        }
    }

    #[test]
    fn parses_number_diameter_list() {
        let list: NumberDiameterList = "3#16mm+2#20".parse().unwrap();
        assert_eq!(list.groups(), &[RebarGroup::new(3, 16.0), RebarGroup::new(2, 20.0)]);
        assert_eq!(list.to_string(), "3#16+2#20");
        let again: NumberDiameterList = list.to_string().parse().unwrap();
        assert_eq!(again, list);
    }

    #[test]
    fn bare_diameters_print_unchanged() {
        let list: NumberDiameterList = "3#100+2#200".parse().unwrap();
        assert_eq!(list.to_string(), "3#100+2#200");
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, "\"3#100+2#200\"");
    }

    #[test]
    fn zero_means_no_groups() {
        let list: NumberDiameterList = "0".parse().unwrap();
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "0");
    }

    #[test]
    fn number_diameter_list_rejects_wrong_separator() {
        assert!("3@16".parse::<NumberDiameterList>().is_err());
        assert!("3#16cm".parse::<NumberDiameterList>().is_err());
    }
}
