pub mod config;
pub mod discretize;
pub mod error;
pub mod geometry;
pub mod registry;
pub mod report;
pub mod system;
