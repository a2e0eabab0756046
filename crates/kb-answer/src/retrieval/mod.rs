//! Passage extraction from raw search responses

pub mod extract;

pub use extract::extract;
