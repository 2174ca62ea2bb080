//! Recursive-descent walker over the RFC 5321/5322 address grammar.
//!
//! The parser never fails: every deviation is reported to a [`Diagnoses`]
//! ledger and the walk continues, so one pass surfaces every problem.

mod cfws;
mod chars;
mod domain;
mod literal;
mod local;
mod reader;

use crate::diagnosis::{Diagnoses, DiagnosisCode};
use crate::punycode;

use reader::Reader;

/// RFC 5321 §4.5.3.1.1
const MAX_LOCAL_OCTETS: usize = 64;
/// RFC 5890 §2.3.2.1, after Punycode encoding
const MAX_LABEL_OCTETS: usize = 63;
/// RFC 5321 §4.5.3.1.2
const MAX_DOMAIN_OCTETS: usize = 255;
/// RFC 5321 §4.5.3.1.3 path limit (256) minus the angle brackets
const MAX_ADDRESS_OCTETS: usize = 254;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Drop the quotes around a quoted local-part element whose content is
    /// plain atext (no escapes, no folding).
    pub normalize_unnecessary_quotes: bool,
}

/// Structure recovered from an address that contained an `@`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub local_parts: Vec<String>,
    pub local: String,
    pub domain_parts: Vec<String>,
    pub domain: String,
    /// `local@domain` with the domain in its ASCII (Punycode) form.
    pub email: String,
}

impl ParsedAddress {
    /// True when the domain is a single `[...]` literal.
    pub fn is_domain_literal(&self) -> bool {
        matches!(self.domain_parts.as_slice(), [only] if only.starts_with('['))
    }
}

pub struct Parser<'a, 'd> {
    reader: Reader<'a>,
    diagnoses: &'d mut Diagnoses,
    options: ParserOptions,
}

impl<'a, 'd> Parser<'a, 'd> {
    pub fn new(email: &'a str, diagnoses: &'d mut Diagnoses, options: ParserOptions) -> Self {
        Self {
            reader: Reader::new(email),
            diagnoses,
            options,
        }
    }

    /// Walks the local-part then the domain.
    ///
    /// Returns `None` when there is no `@` at all; everything else yields a
    /// (possibly broken) [`ParsedAddress`].
    pub fn parse(mut self) -> Option<ParsedAddress> {
        let local_parts = self.parse_local();
        let local = local_parts.join(".");

        if self.diagnoses.has_diagnosis(DiagnosisCode::ErrNoDomain) {
            return None;
        }

        let domain_parts = self.parse_domain();
        let domain = domain_parts.join(".");

        let domain_len = if domain.is_ascii() {
            domain.len()
        } else {
            punycode::ascii_len(&domain)
        };
        if local.len() + domain_len + 1 > MAX_ADDRESS_OCTETS {
            self.diagnose(DiagnosisCode::Rfc5322TooLong);
        }

        let email = format!("{local}@{}", punycode::to_ascii(&domain));
        Some(ParsedAddress {
            local_parts,
            local,
            domain_parts,
            domain,
            email,
        })
    }

    /// Reports `code` at the codepoint just consumed.
    fn diagnose(&mut self, code: DiagnosisCode) {
        let index = self.reader.prev_index();
        self.diagnose_at(code, Some(index));
    }

    fn diagnose_at(&mut self, code: DiagnosisCode, index: Option<usize>) {
        #[cfg(feature = "with-tracing")]
        tracing::trace!(code = %code, index = ?index, "diagnosis");
        self.diagnoses.diagnose(code, index);
    }

    /// A CR was just consumed: it must be followed by LF. On error the next
    /// codepoint is left for the caller.
    fn expect_lf(&mut self) {
        if self.reader.peek() == Some('\n') {
            self.reader.next();
        } else {
            self.diagnose(DiagnosisCode::ErrCRNoLF);
        }
    }
}
