use std::mem;

use crate::diagnosis::DiagnosisCode;
use crate::punycode;

use super::chars::{is_atext_reject, is_c1_not_del, is_non_ldh, is_obsolete_text};
use super::{MAX_DOMAIN_OCTETS, MAX_LABEL_OCTETS, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closed {
    Cfws,
    Literal,
}

impl Parser<'_, '_> {
    /// Domain literal content, the opening `[` being already consumed.
    /// Returns the content followed by the closing `]` when there is one.
    ///
    /// ```text
    /// domain-literal = [CFWS] "[" *([FWS] dtext) [FWS] "]" [CFWS]
    /// dtext          = %d33-90 / %d94-126 / obs-dtext
    /// obs-dtext      = obs-NO-WS-CTL / quoted-pair
    /// ```
    pub(super) fn parse_domain_literal(&mut self) -> String {
        let mut literal = String::new();

        while let Some(rune) = self.reader.next() {
            match rune {
                ']' => {
                    self.classify_domain_literal(&literal);
                    literal.push(']');
                    return literal;
                }
                '\\' => {
                    self.diagnose(DiagnosisCode::Rfc5322DomainLiteralOBSDText);
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
                    if rune == '\0' || rune == '\n' || rune == '[' || is_c1_not_del(rune) {
                        self.diagnose(DiagnosisCode::ErrExpectingDTEXT);
                        continue;
                    }
                    if is_obsolete_text(rune) {
                        self.diagnose(DiagnosisCode::Rfc5322DomainLiteralOBSDText);
                    }
                    literal.push(rune);
                }
            }
        }

        self.diagnose(DiagnosisCode::ErrUnclosedDomainLiteral);
        literal
    }

    /// Domain, up to the end of input.
    ///
    /// ```text
    /// domain     = dot-atom / domain-literal / obs-domain
    /// sub-domain = Let-dig [Ldh-str]        ; RFC 5321
    /// ```
    ///
    /// Addressing information is held to RFC 5321 (letter-digit-hyphen);
    /// other atext only downgrades the result to `rfc5322Domain`, which keeps
    /// internationalized labels usable.
    pub(super) fn parse_domain(&mut self) -> Vec<String> {
        let mut elements: Vec<String> = Vec::new();
        let mut element = String::new();
        let mut closed: Option<Closed> = None;

        while let Some(rune) = self.reader.next() {
            match rune {
                '(' => {
                    if element.is_empty() {
                        self.diagnose(if elements.is_empty() {
                            DiagnosisCode::DeprecatedCFWSNearAt
                        } else {
                            DiagnosisCode::DeprecatedComment
                        });
                    } else {
                        self.diagnose(DiagnosisCode::CfwsComment);
                        closed = Some(Closed::Cfws);
                    }
                    self.parse_comment();
                }
                '.' => {
                    if closed == Some(Closed::Literal) {
                        self.diagnose(DiagnosisCode::ErrDotAfterDomainLiteral);
                    }

                    if element.is_empty() {
                        self.diagnose(if elements.is_empty() {
                            DiagnosisCode::ErrDotStart
                        } else {
                            DiagnosisCode::ErrConsecutiveDots
                        });
                    } else if element.ends_with('-') {
                        let index = self.reader.prev_index().saturating_sub(1);
                        self.diagnose_at(DiagnosisCode::ErrDomainHyphenEnd, Some(index));
                    } else if punycode::ascii_len(&element) > MAX_LABEL_OCTETS {
                        self.diagnose(DiagnosisCode::Rfc5322LabelTooLong);
                    }

                    closed = None;
                    elements.push(mem::take(&mut element));
                }
                '[' => {
                    if !element.is_empty() {
                        elements.push(mem::take(&mut element));
                    }

                    if elements.is_empty() {
                        // a literal must be the whole domain
                        closed = Some(Closed::Literal);
                        let literal = self.parse_domain_literal();
                        element.push('[');
                        element.push_str(&literal);
                    } else {
                        self.diagnose(DiagnosisCode::ErrExpectingATEXT);
                    }
                }
                '\r' | ' ' | '\t' => {
                    if rune == '\r' {
                        self.expect_lf();
                    }
                    if element.is_empty() {
                        self.diagnose(if elements.is_empty() {
                            DiagnosisCode::DeprecatedCFWSNearAt
                        } else {
                            DiagnosisCode::DeprecatedFWS
                        });
                    } else {
                        self.diagnose(DiagnosisCode::CfwsFWS);
                        closed = Some(Closed::Cfws);
                    }
                    self.parse_fws(rune);
                }
                _ => {
                    match closed {
                        Some(Closed::Cfws) => self.diagnose(DiagnosisCode::ErrATEXTAfterCFWS),
                        Some(Closed::Literal) => {
                            self.diagnose(DiagnosisCode::ErrATEXTAfterDomainLiteral)
                        }
                        None => {}
                    }

                    if is_atext_reject(rune) {
                        self.diagnose(DiagnosisCode::ErrExpectingATEXT);
                    } else if rune == '-' {
                        if element.is_empty() {
                            self.diagnose(DiagnosisCode::ErrDomainHyphenStart);
                        }
                    } else if is_non_ldh(rune) {
                        self.diagnose(DiagnosisCode::Rfc5322Domain);
                    }

                    element.push(rune);
                }
            }
        }

        let last_is_empty = element.is_empty();
        if !last_is_empty {
            elements.push(element);
        }

        match elements.last() {
            None => self.diagnose(DiagnosisCode::ErrNoDomain),
            Some(_) if last_is_empty => self.diagnose(DiagnosisCode::ErrDotEnd),
            Some(last) => {
                let last = last.clone();
                self.check_last_label(&last, &elements);
            }
        }

        elements
    }

    fn check_last_label(&mut self, last: &str, elements: &[String]) {
        if last.ends_with('-') {
            self.diagnose(DiagnosisCode::ErrDomainHyphenEnd);
        }

        // labels are letter-digit-hyphen, so a leading code <= '9' is a digit,
        // internationalized labels included
        if last.chars().next().is_some_and(|c| c <= '9') {
            self.diagnose(DiagnosisCode::Rfc5321TLDNumeric);
        }

        if punycode::ascii_len(last) > MAX_LABEL_OCTETS {
            self.diagnose(DiagnosisCode::Rfc5322LabelTooLong);
        }

        if punycode::ascii_len(&elements.join(".")) > MAX_DOMAIN_OCTETS {
            self.diagnose(DiagnosisCode::Rfc5322DomainTooLong);
        }
    }
}
