use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// `count` bars of one nominal `diameter`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarGroup {
    pub count: u32,
    pub diameter: f64,
}

impl RebarGroup {
    #[must_use]
    pub fn new(count: u32, diameter: f64) -> Self {
        Self { count, diameter }
    }

    /// Width the group's bars occupy side by side.
    #[must_use]
    pub fn occupied_width(&self) -> f64 {
        f64::from(self.count) * self.diameter
    }
}

/// One bar of a multi-group layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBar {
    /// Distance from the start of the span to the bar's near face.
    pub front_offset: f64,
    pub diameter: f64,
    /// Index of the owning group in layout order.
    pub group: usize,
}

/// Placement of one group as a single bar run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGroup {
    /// Front cover of the run: offset of its first bar.
    pub front_cover: f64,
    /// Clear distance from the run's last bar to the end of the span.
    pub rear_cover: f64,
    /// End offset of the run, `rear_cover + diameter / 2`.
    pub end_offset: f64,
}

/// Result of [`GroupLayout::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    /// Uniform clear gap between neighbouring bars and at both ends.
    pub gap: f64,
    pub bars: Vec<PlacedBar>,
    pub groups: Vec<PlacedGroup>,
}

/// Places groups of bars of differing diameters across a span with one
/// uniform gap.
///
/// After `leading` and `trailing` are taken off, the remaining length minus
/// the bar widths is split into `bars + 1` equal gaps. Groups are walked in
/// order and each bar advances by its diameter plus the gap.
pub struct GroupLayout {
    span: f64,
    groups: Vec<RebarGroup>,
    leading: f64,
    trailing: f64,
}

impl GroupLayout {
    /// Creates a new `GroupLayout` operation.
    #[must_use]
    pub fn new(span: f64, groups: Vec<RebarGroup>, leading: f64, trailing: f64) -> Self {
        Self {
            span,
            groups,
            leading,
            trailing,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidInput` for an empty group list, a zero
    /// count, a non-positive diameter or a total count past `u32::MAX`, and
    /// `LayoutError::InfeasibleLayout`
    /// when the bars and offsets do not fit inside the span.
    pub fn execute(&self) -> Result<BarLayout> {
        if self.groups.is_empty() {
            return Err(LayoutError::InvalidInput("no bar groups to lay out".into()).into());
        }
        if let Some(bad) = self
            .groups
            .iter()
            .find(|g| g.count == 0 || g.diameter.is_nan() || g.diameter <= 0.0)
        {
            return Err(LayoutError::InvalidInput(format!(
                "group of {} bars with diameter {} is not placeable",
                bad.count, bad.diameter
            ))
            .into());
        }

        let occupied: f64 = self.groups.iter().map(RebarGroup::occupied_width).sum();
        let required = occupied + self.leading + self.trailing;
        if required.is_nan() || required >= self.span {
            tracing::warn!(span = self.span, required, "bar groups do not fit the span");
            return Err(LayoutError::InfeasibleLayout {
                span: self.span,
                required,
            }
            .into());
        }

        let bar_count = self
            .groups
            .iter()
            .try_fold(0u32, |total, g| total.checked_add(g.count))
            .ok_or_else(|| LayoutError::InvalidInput("total bar count exceeds u32".into()))?;
        let gap = (self.span - required) / (f64::from(bar_count) + 1.0);

        let mut bars = Vec::new();
        let mut groups = Vec::with_capacity(self.groups.len());
        let mut cursor = self.leading + gap;
        for (index, group) in self.groups.iter().enumerate() {
            let front_cover = cursor;
            for _ in 0..group.count {
                bars.push(PlacedBar {
                    front_offset: cursor,
                    diameter: group.diameter,
                    group: index,
                });
                cursor += group.diameter + gap;
            }
            let rear_cover = self.span
                - front_cover
                - group.occupied_width()
                - (f64::from(group.count) - 1.0) * gap;
            groups.push(PlacedGroup {
                front_cover,
                rear_cover,
                end_offset: rear_cover + group.diameter / 2.0,
            });
        }

        tracing::debug!(gap, bars = bars.len(), "laid out bar groups");
        Ok(BarLayout { gap, bars, groups })
    }
}

/// Shorthand for [`GroupLayout::execute`].
///
/// # Errors
///
/// See [`GroupLayout::execute`].
pub fn layout_groups(
    span: f64,
    groups: &[RebarGroup],
    leading: f64,
    trailing: f64,
) -> Result<BarLayout> {
    GroupLayout::new(span, groups.to_vec(), leading, trailing).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RebarError;
    use approx::assert_relative_eq;

    fn sample() -> BarLayout {
        let groups = [RebarGroup::new(3, 16.0), RebarGroup::new(2, 20.0)];
        layout_groups(760.0, &groups, 40.0, 40.0).unwrap()
    }

    #[test]
    fn two_groups_across_760() {
        let layout = sample();
        // (760 - 80 - 88) / 6
        assert_relative_eq!(layout.gap, 592.0 / 6.0);
        assert_eq!(layout.bars.len(), 5);
        for pair in layout.bars.windows(2) {
            assert!(pair[1].front_offset > pair[0].front_offset);
        }
        assert_eq!(layout.bars[2].group, 0);
        assert_eq!(layout.bars[3].group, 1);
        let last = layout.groups.last().unwrap();
        assert!(last.rear_cover >= 0.0);
        // The last run ends one gap before the trailing allowance.
        assert_relative_eq!(last.rear_cover, 40.0 + layout.gap, epsilon = 1e-9);
        assert_relative_eq!(last.end_offset, last.rear_cover + 10.0, epsilon = 1e-9);
    }

    #[test]
    fn second_group_starts_after_first() {
        let layout = sample();
        let first = layout.groups[0];
        let second = layout.groups[1];
        assert_relative_eq!(first.front_cover, 40.0 + layout.gap);
        assert_relative_eq!(
            second.front_cover,
            first.front_cover + 3.0 * (16.0 + layout.gap),
            epsilon = 1e-9
        );
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn widths_gaps_and_offsets_close_the_span() {
        for (span, groups) in [
            (760.0, vec![RebarGroup::new(3, 16.0), RebarGroup::new(2, 20.0)]),
            (1200.0, vec![RebarGroup::new(1, 32.0)]),
            (
                545.5,
                vec![
                    RebarGroup::new(2, 12.0),
                    RebarGroup::new(4, 10.0),
                    RebarGroup::new(2, 12.0),
                ],
            ),
        ] {
            let layout = layout_groups(span, &groups, 35.0, 52.0).unwrap();
            let widths: f64 = layout.bars.iter().map(|b| b.diameter).sum();
            let gaps = layout.gap * (layout.bars.len() as f64 + 1.0);
            assert_relative_eq!(widths + gaps + 35.0 + 52.0, span, epsilon = 1e-9);
        }
    }

    #[test]
    fn overfull_span_is_infeasible() {
        let result = layout_groups(200.0, &[RebarGroup::new(5, 25.0)], 40.0, 40.0);
        assert!(matches!(
            result,
            Err(RebarError::Layout(LayoutError::InfeasibleLayout { .. }))
        ));
    }

    #[test]
    fn empty_or_zero_groups_are_invalid() {
        assert!(matches!(
            layout_groups(500.0, &[], 0.0, 0.0),
            Err(RebarError::Layout(LayoutError::InvalidInput(_)))
        ));
        assert!(matches!(
            layout_groups(500.0, &[RebarGroup::new(0, 16.0)], 0.0, 0.0),
            Err(RebarError::Layout(LayoutError::InvalidInput(_)))
        ));
    }

    #[test]
    fn total_count_past_u32_is_invalid() {
        // Thin enough that the widths fit, so only the count can fail.
        let groups = [RebarGroup::new(u32::MAX, 1e-12), RebarGroup::new(1, 1e-12)];
        assert!(matches!(
            layout_groups(500.0, &groups, 0.0, 0.0),
            Err(RebarError::Layout(LayoutError::InvalidInput(_)))
        ));
    }
}
