//! Punycode helpers used for the octet-length limits and TLD canonicalization.
//!
//! Only labels with characters outside printable ASCII are encoded; ASCII
//! labels (uppercase included) are left untouched, no UTS 46 mapping happens
//! here.

const ACE_PREFIX: &str = "xn--";

fn is_separator(c: char) -> bool {
    matches!(c, '.' | '\u{3002}' | '\u{FF0E}' | '\u{FF61}')
}

fn needs_encoding(label: &str) -> bool {
    label.chars().any(|c| c > '\u{7E}')
}

/// Length of the Punycode form of `label` (without `xn--`). Falls back to
/// the raw length when the encoder gives up on overflow.
pub fn encoded_len(label: &str) -> usize {
    idna::punycode::encode_str(label).map_or(label.len(), |encoded| encoded.len())
}

/// Octet length of [`to_ascii`]`(domain)`.
pub fn ascii_len(domain: &str) -> usize {
    let mut len = 0;
    for (i, label) in domain.split(is_separator).enumerate() {
        if i > 0 {
            len += 1;
        }
        len += if needs_encoding(label) {
            idna::punycode::encode_str(label)
                .map_or(label.len(), |encoded| ACE_PREFIX.len() + encoded.len())
        } else {
            label.len()
        };
    }
    len
}

/// ASCII form of a domain: every label needing it becomes `xn--` + Punycode.
pub fn to_ascii(domain: &str) -> String {
    domain
        .split(is_separator)
        .map(|label| {
            if !needs_encoding(label) {
                return label.to_string();
            }
            match idna::punycode::encode_str(label) {
                Some(encoded) => format!("{ACE_PREFIX}{encoded}"),
                // only on arithmetic overflow with absurdly long labels
                None => label.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Canonical form of a top-level label for allow/deny list comparison.
pub fn canonicalize_label(label: &str) -> String {
    to_ascii(label).to_ascii_lowercase()
}
