pub mod aggregator;
pub mod dto;
