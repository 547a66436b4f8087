// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Girder section library.
//!
//! Layout only needs the top width of each section: joint spacing is inflated
//! by half the width of each flanking girder, and idealized piers extend past
//! the exterior girders by half their width.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// Section name to top width.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SectionLibrary {
    widths: FxHashMap<String, f64>,
}

impl SectionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a section.
    pub fn insert(&mut self, name: impl Into<String>, width: f64) -> &mut Self {
        self.widths.insert(name.into(), width);
        self
    }

    pub fn with_section(mut self, name: impl Into<String>, width: f64) -> Self {
        self.insert(name, width);
        self
    }

    /// Top width of a section.
    pub fn width(&self, name: &str) -> Result<f64> {
        self.widths
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownSection(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.widths.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_replace() {
        let mut lib = SectionLibrary::new().with_section("WF42", 4.0);
        assert_eq!(lib.width("WF42").unwrap(), 4.0);
        lib.insert("WF42", 4.5);
        assert_eq!(lib.width("WF42").unwrap(), 4.5);
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn missing_section_is_an_error() {
        let lib = SectionLibrary::new();
        assert_eq!(
            lib.width("U54"),
            Err(Error::UnknownSection("U54".to_string()))
        );
    }
}
