//! Curriculum grading engine and the subject result assembly built around it.

pub mod config;
pub mod error;
pub mod grading;
pub mod results;
pub mod telemetry;
