//! Diagnosis codes and the per-address ledger that collects them.
//!
//! Codes are ordered by severity: the higher the value, the worse the
//! problem. [`Diagnoses`] keeps every report so a single input surfaces all
//! of its problems, and reduces them to one code on demand.

mod codes;
mod ledger;

pub use codes::{Category, DiagnosisCode, UnknownDiagnosis};
pub use ledger::{Diagnoses, Diagnosis};

#[cfg(test)]
mod tests;
