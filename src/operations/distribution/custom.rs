use serde::{Deserialize, Serialize};

use crate::error::{DistributionError, RebarError, Result};

use super::count_from;

/// `amount` bars at a constant `spacing`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub amount: u32,
    pub spacing: f64,
}

impl Segment {
    #[must_use]
    pub fn new(amount: u32, spacing: f64) -> Self {
        Self { amount, spacing }
    }

    /// Length an end segment occupies: `amount * spacing - spacing / 2`.
    ///
    /// The half spacing is shared with the neighbouring middle segment.
    #[must_use]
    pub fn area(&self) -> f64 {
        f64::from(self.amount) * self.spacing - self.spacing / 2.0
    }

    /// Length a middle segment occupies: `amount * spacing`.
    ///
    /// It takes both half spacings it shares with the end segments.
    #[must_use]
    pub fn covered_length(&self) -> f64 {
        f64::from(self.amount) * self.spacing
    }

    fn check(self, role: &str) -> Result<Self> {
        if self.amount == 0 || !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(DistributionError::InvalidInput(format!(
                "{role} segment {}@{} needs a positive amount and a positive finite spacing",
                self.amount, self.spacing
            ))
            .into());
        }
        Ok(self)
    }
}

/// How the middle segment of a three-part distribution is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiddleSegment {
    /// Target spacing; the amount is rounded up and the spacing recomputed.
    Spacing(f64),
    /// Fixed amount; the spacing is floored to a whole unit.
    Amount(u32),
    /// Fully specified, passed through unchanged.
    Fixed(Segment),
}

/// Ordered list of segments, stored as text such as `3@100+12@183.33+3@100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomDistribution {
    segments: Vec<Segment>,
}

impl CustomDistribution {
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of bars over all segments.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::InvalidInput` when the total does not fit
    /// a `u32`.
    pub fn total_bars(&self) -> Result<u32> {
        self.segments
            .iter()
            .try_fold(0u32, |total, s| total.checked_add(s.amount))
            .ok_or_else(|| {
                DistributionError::InvalidInput("total bar count exceeds u32".into()).into()
            })
    }

    /// [`Segment::area`] of every segment, in order.
    ///
    /// This is the end-segment rule applied to all segments. The middle of a
    /// solved three-part distribution covers [`Segment::covered_length`]
    /// instead, so these areas only sum to the span for the two ends.
    #[must_use]
    pub fn segment_areas(&self) -> Vec<f64> {
        self.segments.iter().map(Segment::area).collect()
    }
}

impl TryFrom<String> for CustomDistribution {
    type Error = RebarError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CustomDistribution> for String {
    fn from(value: CustomDistribution) -> Self {
        value.to_string()
    }
}

/// Solves the middle segment of a three-part distribution over `span`.
///
/// The end segments take [`Segment::area`] each; the middle segment fills
/// what is left after both offsets with its [`Segment::covered_length`].
///
/// # Errors
///
/// Returns `DistributionError::InfeasibleLayout` when the end segments and
/// offsets leave no room for the middle one, and
/// `DistributionError::InvalidInput` for an end or fixed segment with a zero
/// amount or a non-positive spacing, a non-positive or infinite middle
/// spacing, a zero middle amount, or a middle amount past `u32::MAX`.
pub fn resolve_custom_distribution(
    span: f64,
    offset_start: f64,
    offset_end: f64,
    first: Segment,
    middle: MiddleSegment,
    last: Segment,
) -> Result<CustomDistribution> {
    let first = first.check("first")?;
    let last = last.check("last")?;
    let middle = match middle {
        MiddleSegment::Fixed(segment) => segment.check("middle")?,
        solvable => {
            let required = first.area() + last.area() + offset_start + offset_end;
            let remaining = span - required;
            if remaining.is_nan() || remaining <= 0.0 {
                tracing::warn!(span, required, "end segments leave no room for the middle");
                return Err(DistributionError::InfeasibleLayout { span, required }.into());
            }
            solve_middle(solvable, remaining, span, required)?
        }
    };
    let distribution = CustomDistribution::new(vec![first, middle, last]);
    tracing::debug!(%distribution, "solved custom distribution");
    Ok(distribution)
}

fn solve_middle(
    middle: MiddleSegment,
    remaining: f64,
    span: f64,
    required: f64,
) -> Result<Segment> {
    match middle {
        MiddleSegment::Spacing(s) if !s.is_finite() || s <= 0.0 => {
            Err(DistributionError::InvalidInput(format!(
                "middle spacing must be positive and finite, got {s}"
            ))
            .into())
        }
        MiddleSegment::Spacing(s) => {
            let amount = count_from((remaining / s).ceil())?;
            if amount == 0 {
                return Err(DistributionError::InvalidInput(format!(
                    "middle spacing {s} leaves no bars in {remaining}"
                ))
                .into());
            }
            Ok(Segment::new(amount, remaining / f64::from(amount)))
        }
        MiddleSegment::Amount(0) => {
            Err(DistributionError::InvalidInput("middle amount must be at least 1".into()).into())
        }
        MiddleSegment::Amount(n) => {
            let spacing = (remaining / f64::from(n)).floor();
            if spacing <= 0.0 {
                return Err(DistributionError::InfeasibleLayout {
                    span,
                    required: required + f64::from(n),
                }
                .into());
            }
            Ok(Segment::new(n, spacing))
        }
        MiddleSegment::Fixed(segment) => Ok(segment),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn spacing_driven_middle() {
        // remaining = 1000 - 250 - 250 - 50 = 450, ceil(450 / 180) = 3.
        let solved = resolve_custom_distribution(
            1000.0,
            25.0,
            25.0,
            Segment::new(3, 100.0),
            MiddleSegment::Spacing(180.0),
            Segment::new(3, 100.0),
        )
        .unwrap();
        let middle = solved.segments()[1];
        assert_eq!(middle.amount, 3);
        assert_relative_eq!(middle.spacing, 150.0);
        assert_eq!(solved.total_bars().unwrap(), 9);
        assert_eq!(solved.to_string(), "3@100+3@150+3@100");
    }

    #[test]
    fn spacing_solution_closes_span() {
        for (span, spacing) in [(1000.0, 180.0), (2350.0, 125.0), (4000.0, 190.0)] {
            let first = Segment::new(4, 75.0);
            let last = Segment::new(2, 120.0);
            let middle = MiddleSegment::Spacing(spacing);
            let solved =
                resolve_custom_distribution(span, 30.0, 40.0, first, middle, last).unwrap();
            let middle = solved.segments()[1];
            let covered = first.area() + last.area() + middle.covered_length() + 70.0;
            assert_relative_eq!(covered, span, epsilon = 1e-9);
            assert!(middle.spacing <= spacing);
        }
    }

    #[test]
    fn amount_driven_middle_floors_spacing() {
        let solved = resolve_custom_distribution(
            1000.0,
            25.0,
            25.0,
            Segment::new(3, 100.0),
            MiddleSegment::Amount(4),
            Segment::new(3, 100.0),
        )
        .unwrap();
        assert_eq!(solved.segments()[1], Segment::new(4, 112.0));
    }

    #[test]
    fn fixed_middle_passes_through() {
        let fixed = Segment::new(5, 200.0);
        let solved = resolve_custom_distribution(
            100.0,
            25.0,
            25.0,
            Segment::new(3, 100.0),
            MiddleSegment::Fixed(fixed),
            Segment::new(3, 100.0),
        )
        .unwrap();
        assert_eq!(solved.segments()[1], fixed);
    }

    #[test]
    fn oversized_ends_are_infeasible() {
        let result = resolve_custom_distribution(
            400.0,
            25.0,
            25.0,
            Segment::new(3, 100.0),
            MiddleSegment::Spacing(100.0),
            Segment::new(3, 100.0),
        );
        assert!(matches!(
            result,
            Err(RebarError::Distribution(DistributionError::InfeasibleLayout { .. }))
        ));
    }

    #[test]
    fn bad_middle_parameters_are_invalid() {
        for middle in [
            MiddleSegment::Spacing(0.0),
            MiddleSegment::Spacing(f64::INFINITY),
            MiddleSegment::Amount(0),
            MiddleSegment::Fixed(Segment::new(0, 100.0)),
            MiddleSegment::Fixed(Segment::new(3, f64::NAN)),
        ] {
            let end = Segment::new(1, 50.0);
            let result = resolve_custom_distribution(1000.0, 0.0, 0.0, end, middle, end);
            assert!(matches!(
                result,
                Err(RebarError::Distribution(DistributionError::InvalidInput(_)))
            ));
        }
    }

    #[test]
    fn serde_uses_text_form() {
        let distribution: CustomDistribution = "3@100+12@183.33+3@100".parse().unwrap();
        let json = serde_json::to_string(&distribution).unwrap();
        assert_eq!(json, "\"3@100+12@183.33+3@100\"");
        let back: CustomDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, distribution);
        assert!(serde_json::from_str::<CustomDistribution>("\"3@\"").is_err());
    }

    #[test]
    fn bad_end_segments_are_invalid() {
        let middle = MiddleSegment::Spacing(150.0);
        for (first, last) in [
            (Segment::new(0, 100.0), Segment::new(3, 100.0)),
            (Segment::new(3, 100.0), Segment::new(3, -100.0)),
            (Segment::new(3, f64::INFINITY), Segment::new(3, 100.0)),
        ] {
            let result = resolve_custom_distribution(1000.0, 25.0, 25.0, first, middle, last);
            assert!(matches!(
                result,
                Err(RebarError::Distribution(DistributionError::InvalidInput(_)))
            ));
        }
    }

    #[test]
    fn solved_distribution_reloads_from_text() {
        let solved = resolve_custom_distribution(
            2350.0,
            30.0,
            40.0,
            Segment::new(4, 75.0),
            MiddleSegment::Spacing(125.0),
            Segment::new(2, 120.0),
        )
        .unwrap();
        let json = serde_json::to_string(&solved).unwrap();
        let back: CustomDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back.segments().len(), 3);
        assert_eq!(back.total_bars().unwrap(), solved.total_bars().unwrap());
        for (a, b) in back.segments().iter().zip(solved.segments()) {
            assert_eq!(a.amount, b.amount);
            assert_relative_eq!(a.spacing, b.spacing);
        }
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let distribution = CustomDistribution::new(vec![
            Segment::new(u32::MAX, 1.0),
            Segment::new(1, 1.0),
        ]);
        assert!(matches!(
            distribution.total_bars(),
            Err(RebarError::Distribution(DistributionError::InvalidInput(_)))
        ));
    }
}
