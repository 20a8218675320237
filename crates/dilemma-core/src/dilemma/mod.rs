//! Dilemma records, parsing, and the pre-analysis validation gate.

mod parser;
mod validation;

pub use parser::{DilemmaError, DilemmaOption, EthicalDilemma};
pub use validation::{collect_issues, validate, ValidationIssue, MIN_OPTIONS, MIN_STAKEHOLDERS};
