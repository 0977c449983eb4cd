pub mod centerline;
pub mod frame;
pub mod pline;

pub use centerline::CenterlinePolyline;
pub use frame::{AxisSign, Covers, FaceFrame};
pub use pline::{Pline, PlineVertex};
