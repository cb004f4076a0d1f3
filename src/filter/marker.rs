//! The two sentinel tokens understood by the compactor.
//!
//! Content authors drop these around regions the compactor must not touch,
//! typically `<pre>` blocks or inline ASCII art. The tokens are HTML
//! comments, so a page renders the same whether or not it goes through the
//! filter; the filter deletes them from its output.

/// Suspends compaction until [`SC_ON`] shows up.
pub const SC_OFF: &[u8] = b"<!--SC_OFF-->";

/// Resumes compaction.
pub const SC_ON: &[u8] = b"<!--SC_ON-->";

/// Tests whether `marker` sits at position `at` in `bytes`, ASCII
/// case-insensitively. A marker cut short by the end of the buffer never
/// matches; its leading bytes stay ordinary content.
pub(crate) fn marker_at(bytes: &[u8], at: usize, marker: &[u8]) -> bool {
    bytes.len() - at >= marker.len() && bytes[at..at + marker.len()].eq_ignore_ascii_case(marker)
}
