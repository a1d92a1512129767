//! Byte spans and per-category span bookkeeping.
//!
//! Every extractor owns one [`SpanTracker`]. A rule match is only accepted
//! when its span does not overlap anything the same category has already
//! claimed, which is what keeps a single phrase from being counted twice by
//! two rules of one category. Trackers of different categories never talk to
//! each other, so "cab 10km" may be claimed by transport and still be visible
//! to every other extractor.

use serde::Serialize;

use crate::activity::Category;

/// Half-open byte range `[start, end)` into the normalized input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two half-open ranges share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

impl From<regex::Match<'_>> for Span {
    fn from(m: regex::Match<'_>) -> Self {
        Self::new(m.start(), m.end())
    }
}

/// Consumed ranges for one category.
#[derive(Debug, Clone)]
pub struct SpanTracker {
    category: Category,
    spans: Vec<Span>,
}

impl SpanTracker {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            spans: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Whether `span` collides with an already claimed range.
    pub fn overlaps(&self, span: Span) -> bool {
        self.spans.iter().any(|claimed| claimed.overlaps(&span))
    }

    /// Claim `span` for this category.
    ///
    /// Returns `false` (and records nothing) when the span overlaps an
    /// earlier claim.
    pub fn claim(&mut self, span: Span) -> bool {
        if self.overlaps(span) {
            return false;
        }
        self.spans.push(span);
        true
    }

    /// Claimed spans in claim order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
