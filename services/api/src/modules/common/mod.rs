pub mod extractors;
pub mod responses;
pub mod validators;
