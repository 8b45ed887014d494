//! churnscope: Employee Attrition Analysis
//!
//! Loads an employee records CSV, derives a numeric attrition flag and
//! presents grouped attrition rates and distributions in the terminal.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
