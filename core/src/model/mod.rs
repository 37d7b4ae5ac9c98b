pub mod collection;
pub mod metrics;
pub mod report;
pub mod unit;
