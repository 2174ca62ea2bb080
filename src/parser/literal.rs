use crate::diagnosis::{Category, DiagnosisCode};

use super::Parser;
use super::chars::{IPV4_TAIL, IPV6_GROUP};

const IPV6_TAG: &str = "ipv6:";
const IPV6_MAX_GROUPS: usize = 8;

impl Parser<'_, '_> {
    /// Classifies a closed domain literal as an RFC 5321 address literal or
    /// a plain RFC 5322 one.
    ///
    /// ```text
    /// address-literal  = "[" ( IPv4-address-literal /
    ///                          IPv6-address-literal /
    ///                          General-address-literal ) "]"
    /// IPv6-addr        = IPv6-full / IPv6-comp / IPv6v4-full / IPv6v4-comp
    /// ```
    ///
    /// Anything already deprecated or worse can't be an address literal.
    pub(super) fn classify_domain_literal(&mut self, literal: &str) {
        let tainted = self
            .diagnoses
            .current_worst()
            .is_some_and(|d| d.code.as_u8() >= Category::Deprecated.bound());
        if tainted {
            self.diagnose(DiagnosisCode::Rfc5322DomainLiteral);
            return;
        }

        // an IPv4 tail stands for the last two IPv6 groups
        let address = match IPV4_TAIL.find(literal) {
            Some(m) if m.start() == 0 => {
                self.diagnose(DiagnosisCode::Rfc5321AddressLiteral);
                return;
            }
            Some(m) => format!("{}0:0", &literal[..m.start()]),
            None => literal.to_owned(),
        };

        let tagged = address
            .get(..IPV6_TAG.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(IPV6_TAG));
        if !tagged {
            self.diagnose(DiagnosisCode::Rfc5322DomainLiteral);
            return;
        }

        let text = &address[IPV6_TAG.len()..];
        self.classify_ipv6(text);
    }

    fn classify_ipv6(&mut self, text: &str) {
        let groups: Vec<&str> = text.split(':').collect();
        let mut max_groups = IPV6_MAX_GROUPS;

        match text.find("::") {
            None => {
                if groups.len() != max_groups {
                    self.diagnose(DiagnosisCode::Rfc5322IPv6GroupCount);
                }
            }
            Some(first) if text[first + 1..].contains("::") => {
                self.diagnose(DiagnosisCode::Rfc5322IPv62x2xColon);
            }
            Some(first) => {
                // a leading or trailing "::" leaves one empty group more
                if first == 0 || first + 2 == text.len() {
                    max_groups += 1;
                }

                if groups.len() > max_groups {
                    self.diagnose(DiagnosisCode::Rfc5322IPv6MaxGroups);
                } else if groups.len() == max_groups {
                    // "::" standing for a single group
                    self.diagnose(DiagnosisCode::DeprecatedIPv6);
                }
            }
        }

        let bytes = text.as_bytes();
        if bytes.first() == Some(&b':') && bytes.get(1) != Some(&b':') {
            self.diagnose(DiagnosisCode::Rfc5322IPv6ColonStart);
        } else if bytes.last() == Some(&b':') && bytes.len() >= 2 && bytes[bytes.len() - 2] != b':' {
            self.diagnose(DiagnosisCode::Rfc5322IPv6ColonEnd);
        } else if groups.iter().all(|group| IPV6_GROUP.is_match(group)) {
            self.diagnose(DiagnosisCode::Rfc5321AddressLiteral);
        } else {
            self.diagnose(DiagnosisCode::Rfc5322IPv6BadCharacter);
        }
    }
}
