pub mod common;
pub mod dispatcher;
pub mod driver;
pub mod tracking_record;
