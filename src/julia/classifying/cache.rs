//! Incremental classification
//!
//! Classification is a pure function of the text, so the cache never changes results; it
//! only skips re-scanning a prefix that is known not to have changed.
//!
//! Resume Points
//!
//!     The scanner can restart at the first byte of any code span: at that point no
//!     construct is open, and the only backward context it needs (whether a literal just
//!     closed, for the char literal rule) is recoverable from the previous span. An edit at
//!     offset `n` can still change how spans *before* `n` end (a quote typed after `"""x"""`
//!     extends the closing run), so the boundary kept after an edit is the start of the
//!     last code span that begins strictly before `n`.

use super::scanner::RegionScanner;
use super::span::Span;

/// Memo of spans for the prefix of a document that is known to be classified correctly.
///
/// Callers must report every edit at or before [`validated_len`](Self::validated_len)
/// through [`invalidate`](Self::invalidate); edits after it need no report.
#[derive(Debug, Clone, Default)]
pub struct ClassificationCache {
    /// Spans ending at `validated`.
    prefix: Vec<Span>,
    validated: usize,
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the prefix that will not be re-scanned.
    pub fn validated_len(&self) -> usize {
        self.validated
    }

    /// Forget everything that an edit at `offset` may have changed.
    pub fn invalidate(&mut self, offset: usize) {
        if offset > self.validated {
            return;
        }
        let keep = self.resume_index(offset);
        self.validated = self.prefix.get(keep).map_or(0, |span| span.start);
        self.prefix.truncate(keep);
        if self.prefix.is_empty() {
            self.validated = 0;
        }
        tracing::debug!(
            offset,
            validated = self.validated,
            "invalidated classification cache"
        );
    }

    pub fn clear(&mut self) {
        self.prefix.clear();
        self.validated = 0;
    }

    /// Classify `text`, re-scanning only from the validated boundary.
    pub fn classify(&mut self, text: &str) -> Vec<Span> {
        if self.validated > text.len() || !text.is_char_boundary(self.validated) {
            self.clear();
        }
        let start = self.validated;
        let spans = RegionScanner::resume(text, start, self.prefix.clone()).run();
        tracing::trace!(
            resumed_at = start,
            spans = spans.len(),
            "classified text incrementally"
        );

        // The last code span is the new boundary; everything before it is settled.
        let boundary = spans
            .iter()
            .rposition(|span| span.kind.is_code())
            .unwrap_or(0);
        self.prefix = spans[..boundary].to_vec();
        self.validated = spans.get(boundary).map_or(0, |span| span.start);
        if self.prefix.is_empty() {
            self.validated = 0;
        }
        spans
    }

    /// Index of the last code span in the prefix starting strictly before `offset`,
    /// or 0 when there is none.
    fn resume_index(&self, offset: usize) -> usize {
        self.prefix
            .iter()
            .rposition(|span| span.kind.is_code() && span.start < offset)
            .unwrap_or(0)
    }
}
