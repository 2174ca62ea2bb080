use crate::diagnosis::DiagnosisCode;

use super::Parser;
use super::chars::{is_c0, is_c1_not_del, is_obsolete_text};

impl Parser<'_, '_> {
    /// Folding white space (RFC 5322 §3.2.2 with erratum 1908):
    ///
    /// ```text
    /// FWS     = ([*WSP CRLF] 1*WSP) / obs-FWS
    /// obs-FWS = 1*([CRLF] WSP)
    /// ```
    ///
    /// `prev` is the codepoint that opened the run; `'\r'` means a CRLF was
    /// just consumed. Stops, without consuming, at the first codepoint that
    /// is not part of the run.
    pub(super) fn parse_fws(&mut self, mut prev: char) {
        let mut crlf_count = 0;

        while let Some(rune) = self.reader.peek() {
            if prev == '\r' {
                if rune == '\r' {
                    self.diagnose(DiagnosisCode::ErrFWSCRLFx2);
                    self.reader.next();
                    continue;
                }

                crlf_count += 1;
                if crlf_count > 1 {
                    // several folds: obsolete
                    self.diagnose(DiagnosisCode::DeprecatedFWS);
                }
            }

            match rune {
                '\r' => {
                    self.reader.next();
                    self.expect_lf();
                }
                ' ' | '\t' => {
                    self.reader.next();
                }
                _ => {
                    if prev == '\r' {
                        self.diagnose(DiagnosisCode::ErrFWSCRLFEnd);
                    }
                    return;
                }
            }

            prev = rune;
        }

        if prev == '\r' {
            self.diagnose(DiagnosisCode::ErrFWSCRLFEnd);
        }
    }

    /// Body of a quoted pair, the backslash being already consumed.
    ///
    /// ```text
    /// quoted-pair = ("\" (VCHAR / WSP)) / obs-qp
    /// obs-qp      = "\" (%d0 / obs-NO-WS-CTL / LF / CR)
    /// ```
    pub(super) fn parse_quoted_pair(&mut self) -> Option<char> {
        let Some(rune) = self.reader.next() else {
            self.diagnose(DiagnosisCode::ErrBackslashEnd);
            return None;
        };

        if is_c1_not_del(rune) {
            self.diagnose(DiagnosisCode::ErrExpectingQPair);
        } else if (is_c0(rune) && rune != '\t') || rune == '\u{7F}' {
            self.diagnose(DiagnosisCode::DeprecatedQP);
        }

        Some(rune)
    }

    /// Comment content, the opening `(` being already consumed. Contents are
    /// discarded.
    ///
    /// ```text
    /// comment  = "(" *([FWS] ccontent) [FWS] ")"
    /// ccontent = ctext / quoted-pair / comment
    /// ```
    ///
    /// Nesting is tracked with a counter so crafted input cannot blow the
    /// stack; every level still open at end of input is reported.
    pub(super) fn parse_comment(&mut self) {
        let mut depth: usize = 1;

        while let Some(rune) = self.reader.next() {
            match rune {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                '\\' => {
                    self.parse_quoted_pair();
                }
                '\r' | ' ' | '\t' => {
                    if rune == '\r' {
                        self.expect_lf();
                    }
                    self.diagnose(DiagnosisCode::CfwsFWS);
                    self.parse_fws(rune);
                }
                _ => {
                    if rune == '\0' || rune == '\n' || is_c1_not_del(rune) {
                        self.diagnose(DiagnosisCode::ErrExpectingCTEXT);
                    } else if is_obsolete_text(rune) {
                        self.diagnose(DiagnosisCode::DeprecatedCTEXT);
                    }
                }
            }
        }

        for _ in 0..depth {
            self.diagnose(DiagnosisCode::ErrUnclosedComment);
        }
    }
}
