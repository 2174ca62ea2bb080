use std::collections::HashSet;

use super::{Diagnoses, Diagnosis, DiagnosisCode as D};

fn none() -> HashSet<D> {
    HashSet::new()
}

#[test]
fn empty_ledger_has_no_worst() {
    let ledger = Diagnoses::new();
    assert!(ledger.worst(&none()).is_none());
    assert!(ledger.legacy(&none()).is_none());
    assert!(ledger.is_empty());
}

#[test]
fn worst_keeps_first_of_equal_codes() {
    let mut ledger = Diagnoses::new();
    ledger.diagnose(D::CfwsFWS, Some(0));
    ledger.diagnose(D::DeprecatedFWS, Some(3));
    ledger.diagnose(D::DeprecatedFWS, Some(7));
    ledger.diagnose(D::CfwsComment, Some(9));

    let worst = ledger.worst(&none()).expect("worst");
    assert_eq!(*worst, Diagnosis::new(D::DeprecatedFWS, Some(3)));
    assert!(ledger.has_diagnosis(D::CfwsComment));
    assert!(!ledger.has_diagnosis(D::ErrDotEnd));
}

#[test]
fn worst_rescans_when_cached_is_excluded() {
    let mut ledger = Diagnoses::new();
    ledger.diagnose(D::CfwsComment, Some(1));
    ledger.diagnose(D::Rfc5321AddressLiteral, Some(2));
    ledger.diagnose(D::DeprecatedComment, Some(4));
    ledger.diagnose(D::CfwsComment, Some(5));

    let exclusions: HashSet<D> = [D::DeprecatedComment].into_iter().collect();
    let worst = ledger.worst(&exclusions).expect("worst");
    assert_eq!(*worst, Diagnosis::new(D::CfwsComment, Some(1)));

    let all: HashSet<D> = [D::DeprecatedComment, D::CfwsComment, D::Rfc5321AddressLiteral]
        .into_iter()
        .collect();
    assert!(ledger.worst(&all).is_none());
}

#[test]
fn legacy_prefers_first_fatal_over_higher_later_code() {
    let mut ledger = Diagnoses::new();
    ledger.diagnose(D::DeprecatedCFWSNearAt, Some(0));
    ledger.diagnose(D::ErrNoDomain, Some(5));
    ledger.diagnose(D::ErrConsecutiveDots, Some(14));
    assert!(D::ErrConsecutiveDots > D::ErrNoDomain);

    assert_eq!(ledger.worst(&none()).map(|d| d.code), Some(D::ErrConsecutiveDots));
    assert_eq!(ledger.legacy(&none()).map(|d| d.code), Some(D::ErrNoDomain));

    let exclusions: HashSet<D> = [D::ErrNoDomain].into_iter().collect();
    assert_eq!(ledger.legacy(&exclusions).map(|d| d.code), Some(D::ErrConsecutiveDots));
}

#[test]
fn legacy_falls_back_to_worst_without_fatal() {
    let mut ledger = Diagnoses::new();
    ledger.diagnose(D::Rfc5322IPv6GroupCount, None);
    ledger.diagnose(D::Rfc5321AddressLiteral, None);
    assert_eq!(
        ledger.legacy(&none()).map(|d| d.code),
        Some(D::Rfc5322IPv6GroupCount)
    );
}
