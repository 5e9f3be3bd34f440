pub mod catalog;
pub mod models;
pub mod normalizer;
pub mod suggestion;
