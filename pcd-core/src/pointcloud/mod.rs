pub mod extent;
pub mod point;
