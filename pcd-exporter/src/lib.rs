pub mod cloud;
pub mod report;
