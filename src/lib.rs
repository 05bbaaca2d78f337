// Core layer - shared types and configuration
pub mod core;

// Features layer - domain logic behind commands
pub mod features;

// Platform layer - chat platform trait and the Discord implementation
pub mod platform;

// Application layer
pub mod commands;

pub use core::Config;
