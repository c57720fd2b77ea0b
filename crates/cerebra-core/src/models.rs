pub mod form;
pub mod notice;
pub mod patient;
pub mod record;
pub mod scan;
