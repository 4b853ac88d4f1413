//! careercraft: resume skill detection, readiness scoring and career documents

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod session;

pub use config::Config;
pub use error::{CareerCraftError, Result};
