//! Sub-section splitter heuristic for section 0 (SPEC_FULL.md §4.4).

use crate::config::{SUBSECTION_ALIGN, SUBSECTION_MIN_ZERO_RUN};
use crate::error::Warning;

use super::section::SubSection;

/// Partition a section-0 body into an uncompressed prologue and N compressed
/// sub-blocks, using runs of zero bytes that end on a 2048-byte-aligned
/// offset as boundary markers.
///
/// Also reports [`Warning::SplitterAmbiguity`] for zero runs that come close
/// to an aligned offset (within [`SUBSECTION_MIN_ZERO_RUN`] bytes) without
/// quite reaching it — the documented open question in SPEC_FULL.md §4.4:
/// these are exactly the cases where a real sub-section boundary could be
/// missed.
pub fn split_section_zero(body: &[u8]) -> (Vec<SubSection>, Vec<Warning>) {
    let mut boundaries = vec![0usize];
    let mut warnings = Vec::new();
    let mut run_start: Option<usize> = None;

    for i in 0..body.len() {
        if body[i] == 0 {
            if run_start.is_none() {
                run_start = Some(i);
            }
            continue;
        }
        if let Some(start) = run_start.take() {
            consider_run(start, i, &mut boundaries, &mut warnings);
        }
    }
    if let Some(start) = run_start {
        consider_run(start, body.len(), &mut boundaries, &mut warnings);
    }

    boundaries.push(body.len());
    boundaries.dedup();

    let mut sub_sections = Vec::with_capacity(boundaries.len().saturating_sub(1));
    for (idx, window) in boundaries.windows(2).enumerate() {
        let (start, end) = (window[0], window[1]);
        sub_sections.push(SubSection {
            offset: start,
            length: end - start,
            compressed: idx > 0,
            body: body[start..end].to_vec(),
        });
    }

    (sub_sections, warnings)
}

fn consider_run(start: usize, end: usize, boundaries: &mut Vec<usize>, warnings: &mut Vec<Warning>) {
    let run_len = end - start;
    if run_len > SUBSECTION_MIN_ZERO_RUN && end % SUBSECTION_ALIGN == 0 {
        boundaries.push(end);
        return;
    }
    let next_alignment = end.div_ceil(SUBSECTION_ALIGN) * SUBSECTION_ALIGN;
    if next_alignment > 0 && next_alignment - end <= SUBSECTION_MIN_ZERO_RUN && run_len > 0 {
        warnings.push(Warning::SplitterAmbiguity { offset: end });
    }
}
