use std::mem;

use crate::diagnosis::DiagnosisCode;

use super::chars::{is_atext_reject, is_c1_not_del, is_obsolete_text};
use super::{MAX_LOCAL_OCTETS, Parser};

/// What the current element already ended with; only `.`, CFWS or `@` may
/// follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closed {
    Cfws,
    Quoted,
}

impl Parser<'_, '_> {
    /// Quoted string content, the opening `"` being already consumed.
    ///
    /// ```text
    /// quoted-string = [CFWS] DQUOTE *([FWS] qcontent) [FWS] DQUOTE [CFWS]
    /// qcontent      = qtext / quoted-pair
    /// ```
    ///
    /// Escapes are kept escaped and every fold becomes one space. Returns the
    /// quoted form, or the bare content when quote normalization is on and
    /// the content is plain atext.
    pub(super) fn parse_quoted_string(&mut self) -> String {
        let mut string = String::new();
        let mut need_be_quoted = false;

        while let Some(rune) = self.reader.next() {
            match rune {
                '\\' => {
                    string.push('\\');
                    if let Some(quoted) = self.parse_quoted_pair() {
                        string.push(quoted);
                    }
                    need_be_quoted = true;
                }
                // a plain space is qtext here; only tab and CRLF fold
                '\r' | '\t' => {
                    if rune == '\r' {
                        self.expect_lf();
                    }
                    string.push(' ');
                    self.diagnose(DiagnosisCode::CfwsFWS);
                    self.parse_fws(rune);
                    need_be_quoted = true;
                }
                '"' => {
                    let bare_ok = !need_be_quoted
                        && !string.is_empty()
                        && !string.chars().any(is_atext_reject);
                    if self.options.normalize_unnecessary_quotes && bare_ok {
                        return string;
                    }
                    return format!("\"{string}\"");
                }
                _ => {
                    if is_c1_not_del(rune) || rune == '\0' || rune == '\n' {
                        self.diagnose(DiagnosisCode::ErrExpectingQTEXT);
                    } else if is_obsolete_text(rune) {
                        self.diagnose(DiagnosisCode::DeprecatedQTEXT);
                    }
                    string.push(rune);
                }
            }
        }

        self.diagnose(DiagnosisCode::ErrUnclosedQuotedString);
        string
    }

    /// Local-part, up to and including the `@`.
    ///
    /// ```text
    /// local-part     = dot-atom / quoted-string / obs-local-part
    /// obs-local-part = word *("." word)
    /// word           = atom / quoted-string
    /// ```
    ///
    /// Without an `@` this reports `errNoDomain` and returns what it read.
    pub(super) fn parse_local(&mut self) -> Vec<String> {
        let mut local_len = 0;
        let mut elements: Vec<String> = Vec::new();
        let mut element = String::new();
        let mut closed: Option<Closed> = None;
        let mut was_cfws = false;

        while let Some(rune) = self.reader.next() {
            match rune {
                '(' => {
                    if element.is_empty() {
                        self.diagnose(if elements.is_empty() {
                            DiagnosisCode::CfwsComment
                        } else {
                            DiagnosisCode::DeprecatedComment
                        });
                    } else {
                        self.diagnose(DiagnosisCode::CfwsComment);
                        closed = Some(Closed::Cfws);
                    }
                    self.parse_comment();
                    was_cfws = true;
                }
                '.' => {
                    if element.is_empty() {
                        self.diagnose(if elements.is_empty() {
                            DiagnosisCode::ErrDotStart
                        } else {
                            DiagnosisCode::ErrConsecutiveDots
                        });
                    } else {
                        // a quoted or CFWS-wrapped word among others is obs-local-part
                        if closed.is_some() {
                            self.diagnose(DiagnosisCode::DeprecatedLocalPart);
                        }
                        closed = None;
                        elements.push(mem::take(&mut element));
                        local_len += 1;
                    }
                    was_cfws = false;
                }
                '"' => {
                    if element.is_empty() {
                        // a fully quoted local-part is fine for RFC 5321
                        self.diagnose(if elements.is_empty() {
                            DiagnosisCode::Rfc5321QuotedString
                        } else {
                            DiagnosisCode::DeprecatedLocalPart
                        });
                        closed = Some(Closed::Quoted);
                        let quoted = self.parse_quoted_string();
                        local_len += quoted.len();
                        if !quoted.starts_with('"') {
                            local_len += 2;
                        }
                        element.push_str(&quoted);
                    } else {
                        self.diagnose(DiagnosisCode::ErrExpectingATEXT);
                    }
                    was_cfws = false;
                }
                '\r' | ' ' | '\t' => {
                    if rune == '\r' {
                        self.expect_lf();
                    }
                    if element.is_empty() {
                        self.diagnose(if elements.is_empty() {
                            DiagnosisCode::CfwsFWS
                        } else {
                            DiagnosisCode::DeprecatedFWS
                        });
                    } else {
                        closed = Some(Closed::Cfws);
                    }
                    self.parse_fws(rune);
                    was_cfws = true;
                }
                '@' => {
                    let trailing_dot = element.is_empty();
                    if !trailing_dot {
                        elements.push(mem::take(&mut element));
                    }

                    if elements.is_empty() {
                        self.diagnose(DiagnosisCode::ErrNoLocalPart);
                    } else {
                        if trailing_dot {
                            self.diagnose(DiagnosisCode::ErrDotEnd);
                        }
                        if local_len > MAX_LOCAL_OCTETS {
                            self.diagnose(DiagnosisCode::Rfc5322LocalTooLong);
                        }
                    }

                    // RFC 5322 §3.4.1: CFWS SHOULD NOT be used around "@"
                    if was_cfws {
                        self.diagnose(DiagnosisCode::DeprecatedCFWSNearAt);
                    }
                    return elements;
                }
                _ => {
                    match closed {
                        Some(Closed::Cfws) => self.diagnose(DiagnosisCode::ErrATEXTAfterCFWS),
                        Some(Closed::Quoted) => self.diagnose(DiagnosisCode::ErrATEXTAfterQS),
                        None => {
                            if is_atext_reject(rune) {
                                self.diagnose(DiagnosisCode::ErrExpectingATEXT);
                            }
                            element.push(rune);
                            local_len += rune.len_utf8();
                        }
                    }
                    was_cfws = false;
                }
            }
        }

        self.diagnose(DiagnosisCode::ErrNoDomain);
        if !element.is_empty() {
            elements.push(element);
        }
        elements
    }
}
