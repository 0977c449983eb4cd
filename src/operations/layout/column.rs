use crate::error::{LayoutError, Result};
use crate::geometry::Covers;

use super::{BarLayout, GroupLayout, RebarGroup};

/// Layout of the intermediate bars along one axis of a column section.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub layout: BarLayout,
    /// Covers to the two faces the runs lie along, measured past the tie:
    /// top then bottom for x-direction bars, right then left for y-direction
    /// bars.
    pub side_covers: [f64; 2],
}

/// Both axes of a column cross-section; an axis without groups is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub x: Option<AxisLayout>,
    pub y: Option<AxisLayout>,
}

/// Spaces intermediate bars between the corner bars of a tied column.
///
/// Along each axis the bars sit inside the tie and clear of the corner bars:
/// the leading and trailing offsets are `cover + tie diameter + corner bar
/// diameter`. X-direction bars start from the right cover and their groups
/// are laid out in reverse order; y-direction bars start from the bottom
/// cover.
pub struct ColumnSectionLayout {
    length: f64,
    width: f64,
    tie_covers: Covers,
    tie_diameter: f64,
    main_diameter: f64,
    x_groups: Vec<RebarGroup>,
    y_groups: Vec<RebarGroup>,
}

impl ColumnSectionLayout {
    /// Creates a new `ColumnSectionLayout` operation with no intermediate
    /// bars.
    #[must_use]
    pub fn new(
        length: f64,
        width: f64,
        tie_covers: Covers,
        tie_diameter: f64,
        main_diameter: f64,
    ) -> Self {
        Self {
            length,
            width,
            tie_covers,
            tie_diameter,
            main_diameter,
            x_groups: Vec::new(),
            y_groups: Vec::new(),
        }
    }

    /// Sets the groups along the face length.
    #[must_use]
    pub fn with_x_groups(mut self, groups: Vec<RebarGroup>) -> Self {
        self.x_groups = groups;
        self
    }

    /// Sets the groups along the face width.
    #[must_use]
    pub fn with_y_groups(mut self, groups: Vec<RebarGroup>) -> Self {
        self.y_groups = groups;
        self
    }

    fn axis(
        &self,
        span: f64,
        near: f64,
        far: f64,
        groups: Vec<RebarGroup>,
        sides: [f64; 2],
    ) -> Result<Option<AxisLayout>> {
        if groups.is_empty() {
            return Ok(None);
        }
        let inset = self.tie_diameter + self.main_diameter;
        let layout = GroupLayout::new(span, groups, near + inset, far + inset).execute()?;
        Ok(Some(AxisLayout {
            layout,
            side_covers: sides.map(|cover| cover + self.tie_diameter),
        }))
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidInput` for non-positive diameters and
    /// propagates the group layout error of either axis.
    pub fn execute(&self) -> Result<ColumnLayout> {
        if self.tie_diameter.is_nan()
            || self.tie_diameter <= 0.0
            || self.main_diameter.is_nan()
            || self.main_diameter <= 0.0
        {
            return Err(LayoutError::InvalidInput(format!(
                "tie diameter {} and main bar diameter {} must be positive",
                self.tie_diameter, self.main_diameter
            ))
            .into());
        }
        let cv = &self.tie_covers;
        let mut x_groups = self.x_groups.clone();
        x_groups.reverse();
        Ok(ColumnLayout {
            x: self.axis(self.length, cv.right, cv.left, x_groups, [cv.top, cv.bottom])?,
            y: self.axis(
                self.width,
                cv.bottom,
                cv.top,
                self.y_groups.clone(),
                [cv.right, cv.left],
            )?,
        })
    }
}
