use std::collections::{BTreeSet, HashMap, HashSet};

use crate::diagnosis::DiagnosisCode;
use crate::punycode::canonicalize_label;

use super::error::OptionsError;

/// Codes below this are valid for the boolean verdict.
pub const DEFAULT_THRESHOLD: u8 = 16;

/// Top-level domains to allow or deny, stored in canonical form (ASCII,
/// Punycode, lowercase) so `COM`, `com` and `游戏`/`xn--unup4y` compare equal.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "with-serde",
    serde(from = "Vec<String>", into = "Vec<String>")
)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TldList {
    labels: BTreeSet<String>,
}

impl TldList {
    /// Comma separated list, as given on a command line. Empty entries are
    /// rejected.
    pub fn parse(list: &str) -> Result<Self, OptionsError> {
        list.split(',')
            .map(str::trim)
            .map(|label| match label {
                "" => Err(OptionsError::EmptyTld),
                label => Ok(label),
            })
            .collect()
    }

    /// `label` must already be canonical.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl From<&str> for TldList {
    fn from(label: &str) -> Self {
        std::iter::once(label).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TldList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter
                .into_iter()
                .map(|label| canonicalize_label(label.as_ref()))
                .collect(),
        }
    }
}

impl<S: AsRef<str>> From<Vec<S>> for TldList {
    fn from(labels: Vec<S>) -> Self {
        labels.into_iter().collect()
    }
}

impl<S: AsRef<str>> From<HashSet<S>> for TldList {
    fn from(labels: HashSet<S>) -> Self {
        labels.into_iter().collect()
    }
}

/// Only the keys count; values are ignored.
impl<S: AsRef<str>, V> From<HashMap<S, V>> for TldList {
    fn from(table: HashMap<S, V>) -> Self {
        table.keys().collect()
    }
}

impl From<TldList> for Vec<String> {
    fn from(list: TldList) -> Self {
        list.labels.into_iter().collect()
    }
}

/// Validation settings.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Codes below this collapse to `valid` in [`diagnose`](super::diagnose);
    /// `0` reports the raw code.
    pub threshold: u8,
    pub tld_whitelist: Option<TldList>,
    /// Takes precedence over the whitelist when both are set.
    pub tld_blacklist: Option<TldList>,
    pub allow_unicode: bool,
    /// `0` disables the check.
    pub min_domain_atoms: usize,
    pub exclude_diagnoses: HashSet<DiagnosisCode>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threshold: 0,
            tld_whitelist: None,
            tld_blacklist: None,
            allow_unicode: true,
            min_domain_atoms: 0,
            exclude_diagnoses: HashSet::new(),
        }
    }
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    pub(crate) fn checks_tld(&self) -> bool {
        self.tld_whitelist.is_some() || self.tld_blacklist.is_some()
    }
}

/// Builds [`Options`] from their textual forms (command line, environment).
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl From<Options> for OptionsBuilder {
    /// Starts from existing options, e.g. loaded from a file.
    fn from(options: Options) -> Self {
        Self { options }
    }
}

impl OptionsBuilder {
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.options.threshold = threshold;
        self
    }

    pub fn threshold_str(self, value: &str) -> Result<Self, OptionsError> {
        let threshold = value
            .trim()
            .parse()
            .map_err(|e| OptionsError::threshold(value, e))?;
        Ok(self.threshold(threshold))
    }

    pub fn tld_whitelist(mut self, list: impl Into<TldList>) -> Self {
        self.options.tld_whitelist = Some(list.into());
        self
    }

    pub fn tld_whitelist_str(self, list: &str) -> Result<Self, OptionsError> {
        Ok(self.tld_whitelist(TldList::parse(list)?))
    }

    pub fn tld_blacklist(mut self, list: impl Into<TldList>) -> Self {
        self.options.tld_blacklist = Some(list.into());
        self
    }

    pub fn tld_blacklist_str(self, list: &str) -> Result<Self, OptionsError> {
        Ok(self.tld_blacklist(TldList::parse(list)?))
    }

    pub fn allow_unicode(mut self, allow: bool) -> Self {
        self.options.allow_unicode = allow;
        self
    }

    pub fn min_domain_atoms(mut self, atoms: usize) -> Self {
        self.options.min_domain_atoms = atoms;
        self
    }

    pub fn min_domain_atoms_str(self, value: &str) -> Result<Self, OptionsError> {
        let atoms = value
            .trim()
            .parse()
            .map_err(|e| OptionsError::min_domain_atoms(value, e))?;
        Ok(self.min_domain_atoms(atoms))
    }

    pub fn exclude(mut self, code: DiagnosisCode) -> Self {
        self.options.exclude_diagnoses.insert(code);
        self
    }

    /// Name (`rfc5321AddressLiteral`) or numeric value (`12`).
    pub fn exclude_str(self, code: &str) -> Result<Self, OptionsError> {
        let code = code.parse().map_err(OptionsError::unknown_diagnosis)?;
        Ok(self.exclude(code))
    }

    pub fn build(self) -> Options {
        self.options
    }
}
