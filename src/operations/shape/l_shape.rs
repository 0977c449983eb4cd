use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RebarError, Result, ShapeError};
use crate::geometry::{CenterlinePolyline, Covers, FaceFrame};
use crate::math::Point2;

use super::{check_diameter, invalid_orientation};

/// Where the bend of an L-shaped bar sits.
///
/// The corner variants name a face corner directly. The inside and outside
/// variants only fix the top or bottom edge; the hook leg then points toward
/// (inside) or away from (outside) the section centre, which needs the
/// [`SectionSide`] the bar sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LShapeOrientation {
    #[serde(rename = "Bottom Left")]
    BottomLeft,
    #[serde(rename = "Bottom Right")]
    BottomRight,
    #[serde(rename = "Top Left")]
    TopLeft,
    #[serde(rename = "Top Right")]
    TopRight,
    #[serde(rename = "Top Inside")]
    TopInside,
    #[serde(rename = "Top Outside")]
    TopOutside,
    #[serde(rename = "Bottom Inside")]
    BottomInside,
    #[serde(rename = "Bottom Outside")]
    BottomOutside,
}

/// Side of the section centre a bar sits on, along the face's local x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionSide {
    Left,
    Right,
}

impl LShapeOrientation {
    /// Resolves the bend to a corner as `(bottom, left)`.
    ///
    /// The horizontal leg always runs from the corner toward the opposite
    /// side, so an inside hook bends on the bar's own side and an outside
    /// hook on the other.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidInput` for an inside or outside
    /// orientation without a section side.
    pub fn corner(self, side: Option<SectionSide>) -> Result<(bool, bool)> {
        let bottom = matches!(
            self,
            Self::BottomLeft | Self::BottomRight | Self::BottomInside | Self::BottomOutside
        );
        let inside = match self {
            Self::BottomLeft | Self::TopLeft => return Ok((bottom, true)),
            Self::BottomRight | Self::TopRight => return Ok((bottom, false)),
            Self::TopInside | Self::BottomInside => true,
            Self::TopOutside | Self::BottomOutside => false,
        };
        let side = side.ok_or_else(|| {
            ShapeError::InvalidInput(format!(
                "L-shape orientation {self:?} needs the section side of the bar"
            ))
        })?;
        Ok((bottom, (side == SectionSide::Left) == inside))
    }
}

impl FromStr for LShapeOrientation {
    type Err = RebarError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Bottom Left" => Ok(Self::BottomLeft),
            "Bottom Right" => Ok(Self::BottomRight),
            "Top Left" => Ok(Self::TopLeft),
            "Top Right" => Ok(Self::TopRight),
            "Top Inside" => Ok(Self::TopInside),
            "Top Outside" => Ok(Self::TopOutside),
            "Bottom Inside" => Ok(Self::BottomInside),
            "Bottom Outside" => Ok(Self::BottomOutside),
            other => Err(invalid_orientation("L-shape", other)),
        }
    }
}

/// Local axis the hook leg of an L-shaped bar extends along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookAxis {
    #[serde(rename = "x-axis")]
    XAxis,
    #[serde(rename = "y-axis")]
    YAxis,
}

impl FromStr for HookAxis {
    type Err = RebarError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "x-axis" => Ok(Self::XAxis),
            "y-axis" => Ok(Self::YAxis),
            other => Err(invalid_orientation("hook axis", other)),
        }
    }
}

/// Generates the three points of an L-shaped bar.
///
/// The bend sits in the corner the orientation resolves to. Both legs run to
/// the opposite covers unless a hook length shortens the leg along
/// `hook_along`. Points go from the free end of the vertical leg through the
/// corner to the free end of the horizontal leg.
pub struct LShape {
    frame: FaceFrame,
    covers: Covers,
    diameter: f64,
    orientation: LShapeOrientation,
    hook_along: HookAxis,
    hook_length: Option<f64>,
    section_side: Option<SectionSide>,
}

impl LShape {
    /// Creates a new `LShape` operation with full-length legs.
    #[must_use]
    pub fn new(
        frame: FaceFrame,
        covers: Covers,
        diameter: f64,
        orientation: LShapeOrientation,
        hook_along: HookAxis,
    ) -> Self {
        Self {
            frame,
            covers,
            diameter,
            orientation,
            hook_along,
            hook_length: None,
            section_side: None,
        }
    }

    /// Shortens the hook leg to `length`, measured from the corner.
    #[must_use]
    pub fn with_hook_length(mut self, length: f64) -> Self {
        self.hook_length = Some(length);
        self
    }

    /// Sets the side of the section centre the bar sits on, which resolves
    /// inside and outside orientations.
    #[must_use]
    pub fn with_section_side(mut self, side: SectionSide) -> Self {
        self.section_side = Some(side);
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidInput` if the diameter is not positive,
    /// the hook length is not within the available leg length, or an inside
    /// or outside orientation has no section side.
    pub fn execute(&self) -> Result<CenterlinePolyline> {
        check_diameter(self.diameter)?;
        let c = self.frame.signed_center();
        let half_l = self.frame.length() / 2.0;
        let half_w = self.frame.width() / 2.0;
        let half_d = self.diameter / 2.0;
        let cv = &self.covers;
        let (bottom, left) = self.orientation.corner(self.section_side)?;

        let corner = Point2::new(
            if left {
                c.x - half_l + cv.left + half_d
            } else {
                c.x + half_l - cv.right - half_d
            },
            if bottom {
                c.y - half_w + cv.bottom + half_d
            } else {
                c.y + half_w - cv.top - half_d
            },
        );
        let mut vertical_end = if bottom {
            c.y + half_w - cv.top
        } else {
            c.y - half_w + cv.bottom
        };
        let mut horizontal_end = if left {
            c.x + half_l - cv.right
        } else {
            c.x - half_l + cv.left
        };

        if let Some(length) = self.hook_length {
            let (end, origin) = match self.hook_along {
                HookAxis::XAxis => (&mut horizontal_end, corner.x),
                HookAxis::YAxis => (&mut vertical_end, corner.y),
            };
            let available = (*end - origin).abs();
            if !(length > 0.0 && length <= available + crate::math::TOLERANCE) {
                return Err(ShapeError::InvalidInput(format!(
                    "hook length {length} must be in (0, {available}]"
                ))
                .into());
            }
            *end = origin + length.copysign(*end - origin);
        }

        Ok(CenterlinePolyline::planar(&[
            Point2::new(corner.x, vertical_end),
            corner,
            Point2::new(horizontal_end, corner.y),
        ]))
    }
}
