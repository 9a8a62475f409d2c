pub mod decoder;
pub mod parsers;
pub mod reader;
