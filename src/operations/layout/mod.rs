//! Placement of bar groups across a span and across column sections.

mod column;
mod groups;

pub use column::{AxisLayout, ColumnLayout, ColumnSectionLayout};
pub use groups::{layout_groups, BarLayout, GroupLayout, PlacedBar, PlacedGroup, RebarGroup};
