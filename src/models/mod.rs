// Public exports for data models

pub mod survey;

pub use survey::SurveySummary;
