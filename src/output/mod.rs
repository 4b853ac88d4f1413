//! Report data, formatters and generated documents

pub mod report;
pub mod formatter;
pub mod documents;
pub mod renderers;
