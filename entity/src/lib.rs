pub mod tracking_record;
