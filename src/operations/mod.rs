pub mod distribution;
pub mod layout;
pub mod shape;
