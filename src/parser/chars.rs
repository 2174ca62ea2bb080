//! Static character classes and patterns shared by the grammar procedures.

use std::sync::LazyLock;

use regex::Regex;

/// US-ASCII visible characters not valid in atext (RFC 5322 §3.2.3).
pub(crate) fn is_special(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '<' | '>' | '[' | ']' | ':' | ';' | '@' | '\\' | ',' | '.' | '"'
    )
}

/// C0 controls and space. Space is never seen here in practice: every caller
/// handles it as folding white space first.
pub(crate) fn is_c0_or_space(c: char) -> bool {
    (c as u32) <= 0x20
}

/// C0 controls proper (`0x00..=0x1F`).
pub(crate) fn is_c0(c: char) -> bool {
    (c as u32) < 0x20
}

/// DEL and the C1 controls (`0x7F..=0x9F`).
pub(crate) fn is_c1(c: char) -> bool {
    matches!(c as u32, 0x7F..=0x9F)
}

/// C1 controls excluding DEL; DEL only ever counts as obsolete text.
pub(crate) fn is_c1_not_del(c: char) -> bool {
    c != '\u{7F}' && is_c1(c)
}

/// Not atext in a dot-atom: specials and control characters.
pub(crate) fn is_atext_reject(c: char) -> bool {
    is_special(c) || is_c0_or_space(c) || is_c1(c)
}

/// Obsolete-but-valid text (`obs-NO-WS-CTL` and DEL) inside quoted strings,
/// comments and domain literals.
pub(crate) fn is_obsolete_text(c: char) -> bool {
    is_c0(c) || c == '\u{7F}'
}

/// Anything that is neither a digit nor a latin/unicode letter, as far as a
/// DNS label is concerned.
pub(crate) fn is_non_ldh(c: char) -> bool {
    let code = c as u32;
    code < 48 || (code > 122 && code < 192) || (code > 57 && code < 65) || (code > 90 && code < 97)
}

/// Dotted quad at the end of an address literal.
pub(crate) static IPV4_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$")
        .expect("valid IPv4 pattern")
});

/// One IPv6 group: up to four hex digits.
pub(crate) static IPV6_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-fA-F0-9]{0,4}$").expect("valid IPv6 group pattern"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specials_and_controls_reject_atext() {
        for c in "()<>[]:;@\\,.\"".chars() {
            assert!(is_atext_reject(c), "{c:?}");
        }
        for c in ['\0', '\n', '\u{7}', '\u{7F}', '\u{85}', '\u{9F}'] {
            assert!(is_atext_reject(c), "{c:?}");
        }
        for c in "azAZ09!#$%&'*+-/=?^_`{|}~é".chars() {
            assert!(!is_atext_reject(c), "{c:?}");
        }
    }

    #[test]
    fn del_is_obsolete_not_c1_error() {
        assert!(!is_c1_not_del('\u{7F}'));
        assert!(is_obsolete_text('\u{7F}'));
        assert!(is_c1_not_del('\u{80}'));
        assert!(!is_obsolete_text(' '));
    }

    #[test]
    fn ipv4_tail_finds_trailing_quad() {
        let m = IPV4_TAIL.find("IPv6:1111::255.255.255.255").expect("match");
        assert_eq!(m.start(), 11);
        assert!(IPV4_TAIL.find("255.255.255.256").is_none());
        assert_eq!(IPV4_TAIL.find("1.2.3.4.5").map(|m| m.start()), Some(2));
        // word boundaries are ASCII only, so a letter like é does not glue to the digits
        assert_eq!(IPV4_TAIL.find("IPv6:\u{E9}1.2.3.4").map(|m| m.start()), Some(7));
        assert!(IPV4_TAIL.find("IPv6:a1.2.3.4").is_none());
    }

    #[test]
    fn non_ldh_characters() {
        assert!(is_non_ldh('/'));
        assert!(is_non_ldh('_'));
        assert!(!is_non_ldh('a'));
        assert!(!is_non_ldh('7'));
        assert!(!is_non_ldh('é'));
    }
}
