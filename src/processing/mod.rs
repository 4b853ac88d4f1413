//! Skill detection, scoring and analysis

pub mod text_processor;
pub mod skill_detector;
pub mod scorer;
pub mod context;
pub mod analyzer;
