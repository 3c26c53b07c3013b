pub mod ai;
pub mod attachment;
pub mod config;
pub mod features;
pub mod markdown;
pub mod parser;
pub mod prompts;
pub mod session;
pub mod types;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
