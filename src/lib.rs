pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod optimizer;
pub mod problem;
pub mod scorer;
// cmd and reports are binary modules, declared in main.rs.
