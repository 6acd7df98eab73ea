//! Blank-line collapsing around section markers.
//!
//! A section marker written alone on its own line leaves an empty line in
//! the output once the marker itself renders as nothing:
//!
//! ```text
//! Names:\n{rows}\n- {item}\n{/rows}\nDone
//! ```
//!
//! Collapsing drops the newline that follows such a marker, so the output
//! reads as if the marker lines were never there.

use crate::slot::Slot;

/// Drops the leading newline after section markers that sit on their own
/// line.
///
/// For each start or end slot `i`, if fragment `i` ends with a newline and
/// fragment `i + 1` starts with one, the newline starting fragment `i + 1`
/// is removed. A marker at slot 0 also counts as being on its own line when
/// fragment 0 is empty; fragment 0 is cleared if it was exactly `"\n"`.
/// Decisions are taken on the original fragments, so consecutive markers
/// collapse independently. Other slots are left alone.
pub fn collapse_marker_lines<'a, S: AsRef<str>>(
    fragments: &'a [S],
    slots: &[Slot],
) -> Vec<&'a str> {
    let mut out: Vec<&'a str> = fragments.iter().map(|fragment| fragment.as_ref()).collect();

    for (i, slot) in slots.iter().enumerate() {
        if !slot.kind().is_marker() {
            continue;
        }
        let (left, right): (&'a str, &'a str) = match (fragments.get(i), fragments.get(i + 1)) {
            (Some(left), Some(right)) => (left.as_ref(), right.as_ref()),
            _ => continue,
        };
        let Some(stripped) = right.strip_prefix('\n') else {
            continue;
        };

        let leading = i == 0 && (left.is_empty() || left == "\n");
        if leading || left.ends_with('\n') {
            out[i + 1] = stripped;
            if leading && left == "\n" {
                out[0] = "";
            }
        }
    }

    out
}
