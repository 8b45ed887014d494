//! Fixed report text: the title and the authored takeaways

pub const TITLE: &str = "Employee Attrition Analysis Dashboard";

pub const PREVIEW_HEADING: &str = "Dataset Preview";

pub const TAKEAWAYS_HEADING: &str = "Key Takeaways";

/// Authored conclusions. These are written prose about the reference
/// dataset and are not derived from the computed aggregates.
pub const KEY_TAKEAWAYS: [&str; 3] = [
    "The Human Resources department has the highest attrition rate, followed by R&D and Sales.",
    "Employees who travel frequently for business have the highest attrition rate, while those \
     who travel rarely or do not travel have significantly lower attrition.",
    "The monthly income distribution is right-skewed, indicating that most employees earn lower \
     salaries, but there is a smaller group with high earnings. This could impact attrition, \
     with lower-income employees possibly leaving more frequently.",
];
