pub mod config;
pub mod di;
pub mod domain;
pub mod infrastructure;
pub mod usecases;
