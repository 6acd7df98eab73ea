//! Section matching.
//!
//! Pairs every section start with its end in one left-to-right scan using a
//! stack of open starts. Sections therefore nest strictly and never cross.

use crate::error::{Result, TemplateError};
use crate::slot::{Slot, SlotKind};

/// Mapping from each section start index to its matching end index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    ends: Vec<Option<usize>>,
    count: usize,
}

impl SectionMap {
    /// End index of the section opened at `start`.
    pub fn end_of(&self, start: usize) -> Option<usize> {
        self.ends.get(start).copied().flatten()
    }

    /// Number of matched sections.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `(start, end)` pairs ordered by start.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.ends
            .iter()
            .enumerate()
            .filter_map(|(start, end)| end.map(|end| (start, end)))
    }
}

/// Matches section starts to ends.
///
/// Fails with [`TemplateError::UnmatchedEnd`] on an end with no open start,
/// or [`TemplateError::UnmatchedStart`] (innermost unclosed start) when the
/// scan finishes with sections still open.
pub fn match_sections(slots: &[Slot]) -> Result<SectionMap> {
    let mut ends = vec![None; slots.len()];
    let mut stack = Vec::new();
    let mut count = 0;

    for (i, slot) in slots.iter().enumerate() {
        match slot.kind() {
            SlotKind::SectionStart => stack.push(i),
            SlotKind::SectionEnd => {
                let start = stack.pop().ok_or(TemplateError::UnmatchedEnd(i))?;
                ends[start] = Some(i);
                count += 1;
            }
            SlotKind::Direct | SlotKind::Accessor => {}
        }
    }

    if let Some(start) = stack.pop() {
        return Err(TemplateError::UnmatchedStart(start));
    }

    tracing::debug!(slots = slots.len(), sections = count, "matched sections");
    Ok(SectionMap { ends, count })
}
