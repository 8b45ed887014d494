//! Column names of the employee records dataset

pub const ATTRITION: &str = "Attrition";
pub const DEPARTMENT: &str = "Department";
pub const BUSINESS_TRAVEL: &str = "BusinessTravel";
pub const MONTHLY_INCOME: &str = "MonthlyIncome";
pub const JOB_ROLE: &str = "JobRole";
pub const WORK_LIFE_BALANCE: &str = "WorkLifeBalance";
pub const YEARS_AT_COMPANY: &str = "YearsAtCompany";
pub const JOB_SATISFACTION: &str = "JobSatisfaction";
pub const ENVIRONMENT_SATISFACTION: &str = "EnvironmentSatisfaction";
pub const AGE: &str = "Age";

