pub mod engine;
pub mod outcome;

pub use engine::{classify, Classifier};
pub use outcome::{ClassifiedToken, FieldClassification, MatchSource, RecordLabels};
