pub mod class_mapper;
pub mod config;
pub mod dataset;
pub mod error;
pub mod iter;
pub mod metadata;
pub mod progress;
pub mod sample;
