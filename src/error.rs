use thiserror::Error;

/// Top-level error type for the rebar kernel.
#[derive(Debug, Error)]
pub enum RebarError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors raised while generating centerline geometry.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("invalid {family} orientation: {tag:?}")]
    InvalidOrientation { family: &'static str, tag: String },

    #[error("bend angle {angle} deg is at a trigonometric singularity")]
    DegenerateAngle { angle: f64 },

    #[error("face with normal ({}, {}, {}) is not supported", normal[0], normal[1], normal[2])]
    UnsupportedFace { normal: [f64; 3] },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised by the spacing and custom distribution solvers.
#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("infeasible distribution: {required} required but only {span} available")]
    InfeasibleLayout { span: f64, required: f64 },
}

/// Errors raised by the multi-group bar layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("infeasible layout: bars and offsets need {required} but span is {span}")]
    InfeasibleLayout { span: f64, required: f64 },
}

/// Errors raised while reading stored text or configuration.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed distribution string {input:?}: {reason}")]
    MalformedDistributionString { input: String, reason: String },

    #[error("unsupported configuration version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Convenience type alias for results using [`RebarError`].
pub type Result<T> = std::result::Result<T, RebarError>;
