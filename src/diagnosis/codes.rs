use std::fmt;
use std::str::FromStr;

use phf::phf_map;

/// Severity bands. A code belongs to the first band whose bound is `>=` the code.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    Valid = 1,
    DnsWarn = 7,
    Rfc5321 = 15,
    Cfws = 31,
    Deprecated = 63,
    Rfc5322 = 127,
    Error = 255,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Valid,
        Self::DnsWarn,
        Self::Rfc5321,
        Self::Cfws,
        Self::Deprecated,
        Self::Rfc5322,
        Self::Error,
    ];

    /// Upper bound (inclusive) of the band.
    pub const fn bound(self) -> u8 {
        self as u8
    }

    pub fn of(value: u8) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| value <= c.bound())
            .unwrap_or(Self::Error)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::DnsWarn => "dnsWarn",
            Self::Rfc5321 => "rfc5321",
            Self::Cfws => "cfws",
            Self::Deprecated => "deprecated",
            Self::Rfc5322 => "rfc5322",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Enum, name lookups and value lookups all come from the one list below.
macro_rules! diagnosis_codes {
    ($( $(#[$doc:meta])* $variant:ident = $value:literal => $name:tt, )*) => {
        /// Diagnosis codes. Values and names are a stable public contract.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum DiagnosisCode {
            $( $(#[$doc])* $variant = $value, )*
        }

        impl DiagnosisCode {
            /// Every code, in ascending order.
            pub const ALL: &'static [DiagnosisCode] = &[ $( Self::$variant, )* ];

            /// Symbolic name, e.g. `errDotStart`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }

            pub const fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )*
                    _ => None,
                }
            }
        }

        static NAMES: phf::Map<&'static str, DiagnosisCode> = phf_map! {
            $( $name => DiagnosisCode::$variant, )*
        };
    };
}

diagnosis_codes! {
    Valid = 0 => "valid",

    // valid for SMTP, unusual
    Rfc5321TLD = 9 => "rfc5321TLD",
    Rfc5321TLDNumeric = 10 => "rfc5321TLDNumeric",
    Rfc5321QuotedString = 11 => "rfc5321QuotedString",
    Rfc5321AddressLiteral = 12 => "rfc5321AddressLiteral",

    // valid in a message, must be modified for the envelope
    CfwsComment = 17 => "cfwsComment",
    CfwsFWS = 18 => "cfwsFWS",

    /// Non-ASCII input while unicode is disallowed. Sits above the boolean
    /// threshold so that it fails by default.
    UndesiredNonAscii = 25 => "undesiredNonAscii",

    DeprecatedLocalPart = 33 => "deprecatedLocalPart",
    DeprecatedFWS = 34 => "deprecatedFWS",
    DeprecatedQTEXT = 35 => "deprecatedQTEXT",
    DeprecatedQP = 36 => "deprecatedQP",
    DeprecatedComment = 37 => "deprecatedComment",
    DeprecatedCTEXT = 38 => "deprecatedCTEXT",
    DeprecatedIPv6 = 39 => "deprecatedIPv6",
    DeprecatedCFWSNearAt = 49 => "deprecatedCFWSNearAt",

    // only valid under the broad RFC 5322 definition
    Rfc5322Domain = 65 => "rfc5322Domain",
    Rfc5322TooLong = 66 => "rfc5322TooLong",
    Rfc5322LocalTooLong = 67 => "rfc5322LocalTooLong",
    Rfc5322DomainTooLong = 68 => "rfc5322DomainTooLong",
    Rfc5322LabelTooLong = 69 => "rfc5322LabelTooLong",
    Rfc5322DomainLiteral = 70 => "rfc5322DomainLiteral",
    Rfc5322DomainLiteralOBSDText = 71 => "rfc5322DomainLiteralOBSDText",
    Rfc5322IPv6GroupCount = 72 => "rfc5322IPv6GroupCount",
    Rfc5322IPv62x2xColon = 73 => "rfc5322IPv62x2xColon",
    Rfc5322IPv6BadCharacter = 74 => "rfc5322IPv6BadCharacter",
    Rfc5322IPv6MaxGroups = 75 => "rfc5322IPv6MaxGroups",
    Rfc5322IPv6ColonStart = 76 => "rfc5322IPv6ColonStart",
    Rfc5322IPv6ColonEnd = 77 => "rfc5322IPv6ColonEnd",

    // invalid for any purpose
    ErrExpectingDTEXT = 129 => "errExpectingDTEXT",
    ErrNoLocalPart = 130 => "errNoLocalPart",
    ErrNoDomain = 131 => "errNoDomain",
    ErrConsecutiveDots = 132 => "errConsecutiveDots",
    ErrATEXTAfterCFWS = 133 => "errATEXTAfterCFWS",
    ErrATEXTAfterQS = 134 => "errATEXTAfterQS",
    ErrATEXTAfterDomainLiteral = 135 => "errATEXTAfterDomainLiteral",
    ErrExpectingQPair = 136 => "errExpectingQPair",
    ErrExpectingATEXT = 137 => "errExpectingATEXT",
    ErrExpectingQTEXT = 138 => "errExpectingQTEXT",
    ErrExpectingCTEXT = 139 => "errExpectingCTEXT",
    ErrBackslashEnd = 140 => "errBackslashEnd",
    ErrDotStart = 141 => "errDotStart",
    ErrDotEnd = 142 => "errDotEnd",
    ErrDomainHyphenStart = 143 => "errDomainHyphenStart",
    ErrDomainHyphenEnd = 144 => "errDomainHyphenEnd",
    ErrUnclosedQuotedString = 145 => "errUnclosedQuotedString",
    ErrUnclosedComment = 146 => "errUnclosedComment",
    ErrUnclosedDomainLiteral = 147 => "errUnclosedDomainLiteral",
    ErrFWSCRLFx2 = 148 => "errFWSCRLFx2",
    ErrFWSCRLFEnd = 149 => "errFWSCRLFEnd",
    ErrCRNoLF = 150 => "errCRNoLF",
    ErrUnknownTLD = 160 => "errUnknownTLD",
    ErrDomainTooShort = 161 => "errDomainTooShort",
    ErrDotAfterDomainLiteral = 162 => "errDotAfterDomainLiteral",
    ErrMalformedUnicode = 163 => "errMalformedUnicode",
}

impl DiagnosisCode {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn category(self) -> Category {
        Category::of(self.as_u8())
    }

    /// Invalid for any purpose, whatever the threshold.
    pub const fn is_fatal(self) -> bool {
        self.as_u8() > Category::Rfc5322.bound()
    }
}

impl fmt::Display for DiagnosisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagnosis '{0}'")]
pub struct UnknownDiagnosis(pub String);

/// Accepts the symbolic name (`errDotStart`) or the numeric value (`141`).
impl FromStr for DiagnosisCode {
    type Err = UnknownDiagnosis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(code) = NAMES.get(s) {
            return Ok(*code);
        }
        s.parse::<u8>()
            .ok()
            .and_then(Self::from_u8)
            .ok_or_else(|| UnknownDiagnosis(s.to_string()))
    }
}

impl TryFrom<u8> for DiagnosisCode {
    type Error = UnknownDiagnosis;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or_else(|| UnknownDiagnosis(value.to_string()))
    }
}

impl From<DiagnosisCode> for u8 {
    fn from(code: DiagnosisCode) -> Self {
        code.as_u8()
    }
}

#[cfg(feature = "with-serde")]
impl serde::Serialize for DiagnosisCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "with-serde")]
impl<'de> serde::Deserialize<'de> for DiagnosisCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Value(u8),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
            Repr::Value(value) => Self::try_from(value).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &code in DiagnosisCode::ALL {
            assert_eq!(code.name().parse::<DiagnosisCode>(), Ok(code));
            assert_eq!(DiagnosisCode::from_u8(code.as_u8()), Some(code));
        }
        assert_eq!(NAMES.len(), DiagnosisCode::ALL.len());
    }

    #[test]
    fn table_is_sorted() {
        assert!(DiagnosisCode::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parses_numeric_values() {
        assert_eq!("141".parse(), Ok(DiagnosisCode::ErrDotStart));
        assert!("142x".parse::<DiagnosisCode>().is_err());
        assert!("1".parse::<DiagnosisCode>().is_err());
        assert!("errNope".parse::<DiagnosisCode>().is_err());
    }

    #[test]
    fn categories_follow_value_ranges() {
        assert_eq!(DiagnosisCode::Valid.category(), Category::Valid);
        assert_eq!(DiagnosisCode::Rfc5321TLDNumeric.category(), Category::Rfc5321);
        assert_eq!(DiagnosisCode::CfwsFWS.category(), Category::Cfws);
        assert_eq!(DiagnosisCode::UndesiredNonAscii.category(), Category::Cfws);
        assert_eq!(DiagnosisCode::DeprecatedCFWSNearAt.category(), Category::Deprecated);
        assert_eq!(DiagnosisCode::Rfc5322IPv6ColonEnd.category(), Category::Rfc5322);
        assert_eq!(DiagnosisCode::ErrExpectingDTEXT.category(), Category::Error);
        assert!(DiagnosisCode::ErrExpectingDTEXT.is_fatal());
        assert!(!DiagnosisCode::Rfc5322IPv6ColonEnd.is_fatal());
    }

    #[test]
    fn undesired_non_ascii_fails_boolean_threshold() {
        assert!(DiagnosisCode::UndesiredNonAscii.as_u8() > 16);
    }
}
