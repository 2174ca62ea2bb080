#![forbid(unsafe_code)]
//! addrspec_lib — RFC 5321/5322/6530 email address diagnosis
//!
//! Every address is walked through the full address grammar and each
//! deviation is recorded as a [`Diagnosis`]. The worst one decides the
//! verdict:
//!
//! ```
//! use addrspec_lib::{DiagnosisCode, Options, diagnose, is_valid};
//!
//! let options = Options::default();
//! assert!(is_valid("test@iana.org", &options));
//! assert_eq!(diagnose("test..x@iana.org", &options), DiagnosisCode::ErrConsecutiveDots);
//! ```

pub mod diagnosis;
pub mod parser;
pub mod punycode;
pub mod validator;

pub use diagnosis::{Category, Diagnoses, Diagnosis, DiagnosisCode, UnknownDiagnosis};
pub use parser::{ParsedAddress, Parser, ParserOptions};
pub use validator::{
    DEFAULT_THRESHOLD, Options, OptionsBuilder, OptionsError, Report, TldList, diagnose, is_valid,
    normalize, parse, validate,
};
