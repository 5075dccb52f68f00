//! A local authority area: its code, localized names and measures.

use std::collections::BTreeMap;

use crate::error::{StatsError, StatsResult};

use super::{Measure, upsert_by_key};

/// Language code for English names.
pub const LANG_ENG: &str = "eng";
/// Language code for Welsh names.
pub const LANG_CYM: &str = "cym";

/// A named geographic area identified by an authority code.
///
/// The authority code keeps the case it was given. Names are keyed by lowercase three-letter
/// language codes (e.g. `eng`, `cym`). Measures are keyed by lowercase measure code and looked
/// up case-insensitively.
///
/// Equality compares the authority code case-sensitively, plus all names and measures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Area {
    code: String,
    names: BTreeMap<String, String>,
    measures: BTreeMap<String, Measure>,
}

impl Area {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            names: BTreeMap::new(),
            measures: BTreeMap::new(),
        }
    }

    /// The authority code as last written.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Name of the area in `lang`, matched case-insensitively.
    pub fn name(&self, lang: &str) -> StatsResult<&str> {
        self.names
            .get(&lang.to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| StatsError::not_found(format!("no name in language '{lang}'")))
    }

    /// Like [`Self::name`], but returns `""` when there is no name in `lang`.
    pub fn name_or_empty(&self, lang: &str) -> &str {
        self.name(lang).unwrap_or("")
    }

    /// Set the name for `lang`, which must be exactly three ASCII letters.
    pub fn set_name(&mut self, lang: &str, name: impl Into<String>) -> StatsResult<()> {
        if lang.len() != 3 || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(StatsError::invalid_format(format!(
                "language code must be three alphabetical letters, got '{lang}'"
            )));
        }
        self.names.insert(lang.to_ascii_lowercase(), name.into());
        Ok(())
    }

    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// Measure stored under `code`, matched case-insensitively.
    pub fn measure(&self, code: &str) -> StatsResult<&Measure> {
        self.measures
            .get(&code.to_lowercase())
            .ok_or_else(|| StatsError::not_found(format!("no measure found matching {code}")))
    }

    pub fn measure_mut(&mut self, code: &str) -> StatsResult<&mut Measure> {
        self.measures
            .get_mut(&code.to_lowercase())
            .ok_or_else(|| StatsError::not_found(format!("no measure found matching {code}")))
    }

    /// Store `measure` under the lowercased `code`, combining with any measure already there.
    pub fn set_measure(&mut self, code: &str, measure: Measure) {
        upsert_by_key(&mut self.measures, code.to_lowercase(), measure, Measure::combine);
    }

    /// Measures ordered by code.
    pub fn measures(&self) -> &BTreeMap<String, Measure> {
        &self.measures
    }

    /// Number of measures.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Fold `other` into this area.
    ///
    /// The code is replaced by `other`'s, names are overwritten per language and measures are
    /// merged with [`Measure::combine`].
    pub fn combine(&mut self, other: Area) {
        self.code = other.code;
        self.names.extend(other.names);
        for (code, measure) in other.measures {
            upsert_by_key(&mut self.measures, code, measure, Measure::combine);
        }
    }
}
