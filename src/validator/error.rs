use thiserror::Error;

use crate::diagnosis::UnknownDiagnosis;

/// Configuration rejected before any address is parsed.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("empty entry in TLD list")]
    EmptyTld,
    #[error("invalid excluded diagnosis")]
    UnknownDiagnosis {
        #[source]
        source: UnknownDiagnosis,
    },
    #[error("invalid threshold {value:?}: expected an integer in 0..=255")]
    Threshold {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("invalid minimum domain atoms {value:?}: expected a non-negative integer")]
    MinDomainAtoms {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

impl OptionsError {
    pub(crate) fn unknown_diagnosis(source: UnknownDiagnosis) -> Self {
        Self::UnknownDiagnosis { source }
    }

    pub(crate) fn threshold(value: &str, source: std::num::ParseIntError) -> Self {
        Self::Threshold {
            value: value.to_owned(),
            source,
        }
    }

    pub(crate) fn min_domain_atoms(value: &str, source: std::num::ParseIntError) -> Self {
        Self::MinDomainAtoms {
            value: value.to_owned(),
            source,
        }
    }
}
