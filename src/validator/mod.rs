mod error;
mod options;
mod tld;

pub use error::OptionsError;
pub use options::{DEFAULT_THRESHOLD, Options, OptionsBuilder, TldList};

use unicode_normalization::UnicodeNormalization;

use crate::diagnosis::{Diagnoses, Diagnosis, DiagnosisCode};
use crate::parser::{ParsedAddress, Parser, ParserOptions};

/// Outcome of [`validate`].
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// NFC-normalized input, the text diagnosis offsets refer to.
    pub input: String,
    /// Final code once exclusions and the threshold are applied.
    pub code: DiagnosisCode,
    /// Boolean verdict, independent of the threshold.
    pub valid: bool,
    pub address: Option<ParsedAddress>,
    pub diagnoses: Vec<Diagnosis>,
}

/// Unicode NFC form of the input.
pub fn normalize(email: &str) -> String {
    email.nfc().collect()
}

/// Grammar walk only: no normalization, no option checks.
pub fn parse(email: &str, options: ParserOptions) -> (Option<ParsedAddress>, Diagnoses) {
    let mut diagnoses = Diagnoses::new();
    let parsed = Parser::new(email, &mut diagnoses, options).parse();
    (parsed, diagnoses)
}

pub fn validate(email: &str, options: &Options) -> Report {
    let input = normalize(email);
    let mut diagnoses = Diagnoses::new();

    if !options.allow_unicode {
        // everything before the match is ASCII, so the byte offset is also
        // the UTF-16 offset
        if let Some(offset) = input.find(|c: char| !c.is_ascii()) {
            diagnoses.diagnose(DiagnosisCode::UndesiredNonAscii, Some(offset));
        }
    }

    let address = Parser::new(&input, &mut diagnoses, ParserOptions::default()).parse();
    if let Some(parsed) = &address {
        tld::check_parsed(parsed, &mut diagnoses, options);
    }

    let raw = diagnoses
        .legacy(&options.exclude_diagnoses)
        .map_or(DiagnosisCode::Valid, |d| d.code);
    let valid = raw.as_u8() < DEFAULT_THRESHOLD;
    let code = if raw.as_u8() < options.threshold {
        DiagnosisCode::Valid
    } else {
        raw
    };

    #[cfg(feature = "with-tracing")]
    tracing::debug!(
        email = %input,
        raw = %raw,
        code = %code,
        valid,
        reported = diagnoses.len(),
        "address checked"
    );

    Report {
        input,
        code,
        valid,
        address,
        diagnoses: diagnoses.into_vec(),
    }
}

/// Final diagnosis code; see [`Options::threshold`].
pub fn diagnose(email: &str, options: &Options) -> DiagnosisCode {
    validate(email, options).code
}

/// True when the worst code is below [`DEFAULT_THRESHOLD`].
pub fn is_valid(email: &str, options: &Options) -> bool {
    validate(email, options).valid
}
