pub mod dataset;
pub mod error;
pub mod prep_config;
