//! The report structure: an insertion-ordered mapping from section title to
//! that section's content items.
//!
//! Built empty by [`ReportStructure::from_sections`] (one key per checklist
//! section, in declaration order), mutated in place by the populator, then
//! read-only for validation and rendering. A plain `Vec` of entries keeps
//! iteration order identical to checklist order without pulling in an
//! ordered-map dependency; lookups are linear, which is fine for checklist
//! sized inputs.
//!
//! Duplicate titles are *not* an error: a later section with the same title
//! silently merges its content into the first occurrence's list. This
//! mirrors the observed behaviour of keying a dict by title and is preserved
//! deliberately.

use crate::checklist::Section;
use crate::error::ReportError;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One section's accumulated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContent {
    pub title: String,
    pub items: Vec<String>,
}

/// Ordered mapping from section title to content items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportStructure {
    entries: Vec<SectionContent>,
}

impl ReportStructure {
    /// Build the empty structure for a checklist's section list.
    ///
    /// Produces exactly one entry per *distinct* title, in first-occurrence
    /// order, each mapped to an empty list.
    ///
    /// # Errors
    /// [`ReportError::Schema`] if any section has a missing or empty title.
    pub fn from_sections(sections: &[Section]) -> Result<Self, ReportError> {
        let mut structure = Self::default();
        for (idx, section) in sections.iter().enumerate() {
            if section.title.trim().is_empty() {
                return Err(ReportError::Schema {
                    detail: format!("section {} has no title", idx + 1),
                });
            }
            if structure.position(&section.title).is_none() {
                structure.entries.push(SectionContent {
                    title: section.title.clone(),
                    items: Vec::new(),
                });
            }
        }
        Ok(structure)
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.title == title)
    }

    /// Append a content item to the named section.
    ///
    /// The populator only pushes to titles the builder created, so a miss is
    /// a bug in this crate, not in user input.
    pub(crate) fn push(&mut self, title: &str, item: String) {
        match self.position(title) {
            Some(i) => self.entries[i].items.push(item),
            None => debug_assert!(false, "push to unknown section '{title}'"),
        }
    }

    /// Content items of the named section, if it exists.
    pub fn items(&self, title: &str) -> Option<&[String]> {
        self.position(title).map(|i| self.entries[i].items.as_slice())
    }

    /// Iterate sections in checklist declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionContent> {
        self.entries.iter()
    }

    /// Section titles in order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of content items across all sections.
    pub fn item_count(&self) -> usize {
        self.entries.iter().map(|e| e.items.len()).sum()
    }
}

// Serialised as a JSON object so a placeholder-only report dumps as
// {"Intro": ["TBD"]}; entry order is preserved in the output.
impl Serialize for ReportStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.title, &entry.items)?;
        }
        map.end()
    }
}
