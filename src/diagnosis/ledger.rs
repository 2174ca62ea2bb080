use std::collections::HashSet;
use std::fmt;

use super::{Category, DiagnosisCode};

/// A reported problem and where it was found.
///
/// `index` is an offset into the normalized input, in UTF-16 code units.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnosis {
    pub code: DiagnosisCode,
    pub index: Option<usize>,
}

impl Diagnosis {
    pub fn new(code: DiagnosisCode, index: Option<usize>) -> Self {
        Self { code, index }
    }
}

/// `errDotStart (141) at 0`
impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.code.as_u8())?;
        if let Some(index) = self.index {
            write!(f, " at {index}")?;
        }
        Ok(())
    }
}

/// Every diagnosis reported for one address, in the order they were found.
#[derive(Debug, Clone, Default)]
pub struct Diagnoses {
    entries: Vec<Diagnosis>,
    // position of the highest code; the earliest one wins ties
    worst: Option<usize>,
}

impl Diagnoses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnose(&mut self, code: DiagnosisCode, index: Option<usize>) {
        let replaces_worst = match self.worst {
            None => true,
            Some(pos) => code > self.entries[pos].code,
        };
        if replaces_worst {
            self.worst = Some(self.entries.len());
        }
        self.entries.push(Diagnosis::new(code, index));
    }

    pub fn has_diagnosis(&self, code: DiagnosisCode) -> bool {
        self.entries.iter().any(|d| d.code == code)
    }

    /// Highest code reported so far, exclusions ignored.
    pub fn current_worst(&self) -> Option<&Diagnosis> {
        self.entries.get(self.worst?)
    }

    /// Highest non-excluded code. The cached worst is used unless excluded.
    pub fn worst(&self, exclusions: &HashSet<DiagnosisCode>) -> Option<&Diagnosis> {
        let cached = self.entries.get(self.worst?)?;
        if !exclusions.contains(&cached.code) {
            return Some(cached);
        }

        self.entries
            .iter()
            .filter(|d| !exclusions.contains(&d.code))
            .fold(None, |worst: Option<&Diagnosis>, d| match worst {
                Some(w) if d.code <= w.code => Some(w),
                _ => Some(d),
            })
    }

    /// First non-excluded fatal diagnosis, else the worst one.
    ///
    /// A fatal error anywhere invalidates the address, so the position of the
    /// first one matters more than a higher number reported later.
    pub fn legacy(&self, exclusions: &HashSet<DiagnosisCode>) -> Option<&Diagnosis> {
        self.entries
            .iter()
            .find(|d| d.code.as_u8() > Category::Rfc5322.bound() && !exclusions.contains(&d.code))
            .or_else(|| self.worst(exclusions))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnosis> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnosis> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnoses {
    type Item = &'a Diagnosis;
    type IntoIter = std::slice::Iter<'a, Diagnosis>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
