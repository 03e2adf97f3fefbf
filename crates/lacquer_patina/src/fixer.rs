//! Splices diagnostic fixes into source text.
//!
//! Fixes are taken in source order. A fix whose range starts at or before
//! the end of an already accepted fix is skipped and left for a later pass.

use crate::diagnostic::{LintDiagnostic, TextEdit};

/// Result of applying fixes to one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// Fixed source text
    pub output: String,
    /// Number of fixes applied
    pub applied: usize,
    /// Number of fixes skipped because they overlapped or were out of range
    pub skipped: usize,
}

impl FixOutcome {
    #[inline]
    pub fn is_changed(&self) -> bool {
        self.applied > 0
    }
}

/// Apply every non-overlapping fix in `diagnostics` to `source`.
pub fn apply_fixes(source: &str, diagnostics: &[LintDiagnostic]) -> FixOutcome {
    let mut fixes: Vec<_> = diagnostics
        .iter()
        .filter_map(|diagnostic| {
            let fix = diagnostic.fix.as_ref()?;
            Some((fix.range()?, fix))
        })
        .collect();
    fixes.sort_by_key(|(range, _)| *range);

    let mut accepted: Vec<&TextEdit> = Vec::new();
    let mut last_end: Option<u32> = None;
    let mut applied = 0;
    let mut skipped = 0;

    for ((start, end), fix) in fixes {
        let in_bounds = fix.edits.iter().all(|edit| {
            edit.start <= edit.end
                && source.is_char_boundary(edit.start as usize)
                && source.is_char_boundary(edit.end as usize)
        });
        let overlaps = last_end.is_some_and(|last| start <= last);
        if !in_bounds || overlaps {
            skipped += 1;
            continue;
        }
        accepted.extend(fix.edits.iter());
        last_end = Some(end);
        applied += 1;
    }

    // Splice back to front so earlier offsets stay valid
    accepted.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));
    let mut output = source.to_string();
    for edit in accepted {
        output.replace_range(edit.start as usize..edit.end as usize, &edit.new_text);
    }

    FixOutcome {
        output,
        applied,
        skipped,
    }
}
