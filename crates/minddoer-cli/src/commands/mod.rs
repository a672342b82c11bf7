pub mod config;
pub mod goals;
mod input;
pub mod plan;
pub mod render;
pub mod session;
