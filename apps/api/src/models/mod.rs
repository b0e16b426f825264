pub mod document;
pub mod ranking;
