use crate::diagnosis::{Diagnoses, DiagnosisCode};
use crate::parser::ParsedAddress;
use crate::punycode::canonicalize_label;

use super::Options;

/// Checks that only make sense once the grammar walk is over: minimum
/// number of domain atoms and the TLD allow/deny lists.
pub(crate) fn check_parsed(parsed: &ParsedAddress, diagnoses: &mut Diagnoses, options: &Options) {
    let atoms = parsed.domain_parts.len();
    if options.min_domain_atoms > 0
        && atoms < options.min_domain_atoms
        && !parsed.is_domain_literal()
    {
        report(diagnoses, DiagnosisCode::ErrDomainTooShort);
    }

    if options.checks_tld() && !tld_allowed(parsed, options) {
        report(diagnoses, DiagnosisCode::ErrUnknownTLD);
    }
}

fn tld_allowed(parsed: &ParsedAddress, options: &Options) -> bool {
    let Some(tld) = parsed.domain_parts.last() else {
        // nothing to deny
        return options.tld_blacklist.is_some();
    };
    let tld = canonicalize_label(tld);

    match (&options.tld_blacklist, &options.tld_whitelist) {
        (Some(deny), _) => !deny.contains(&tld),
        (None, Some(allow)) => allow.contains(&tld),
        (None, None) => true,
    }
}

fn report(diagnoses: &mut Diagnoses, code: DiagnosisCode) {
    #[cfg(feature = "with-tracing")]
    tracing::trace!(code = %code, "diagnosis");
    diagnoses.diagnose(code, None);
}
