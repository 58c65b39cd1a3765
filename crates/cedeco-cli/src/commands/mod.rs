pub mod report;
pub mod rules;
pub mod sample;
pub mod score;
