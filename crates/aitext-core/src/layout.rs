//! Reading-order reconstruction over positioned spans.
//!
//! Spans are sorted top-to-bottom, then left-to-right, and grouped into lines
//! by a single vertical tolerance. This is a heuristic, not a layout model:
//! the tolerance does not follow font size, and columns are not detected.

use crate::error::ExtractError;
use crate::extraction::SpanBackend;
use crate::model::TextSpan;
use std::path::Path;

/// Spans judged to share one visual line.
///
/// Every member's top lies within the tolerance of `reference_top`, the top of
/// the span that opened the group.
#[derive(Debug, Clone)]
pub struct LineGroup {
    reference_top: f32,
    spans: Vec<TextSpan>,
}

impl LineGroup {
    fn start(span: TextSpan) -> Self {
        LineGroup {
            reference_top: span.bbox.top,
            spans: vec![span],
        }
    }

    fn accepts(&self, span: &TextSpan, tolerance: f32) -> bool {
        (span.bbox.top - self.reference_top).abs() <= tolerance
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// The member texts joined by single spaces.
    pub fn into_text(self) -> String {
        self.spans
            .into_iter()
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Group one page's spans into lines, in reading order.
pub fn group_lines(mut spans: Vec<TextSpan>, tolerance: f32) -> Vec<LineGroup> {
    spans.retain(|s| !s.text.trim().is_empty());
    // Stable, so spans sharing both coordinates keep backend order.
    spans.sort_by(|a, b| {
        a.bbox
            .top
            .total_cmp(&b.bbox.top)
            .then(a.bbox.left.total_cmp(&b.bbox.left))
    });

    // The last group is the open accumulator.
    let mut lines: Vec<LineGroup> = Vec::new();
    for span in spans {
        match lines.last_mut() {
            Some(line) if line.accepts(&span, tolerance) => line.spans.push(span),
            _ => lines.push(LineGroup::start(span)),
        }
    }

    lines
}

/// Reconstruct one page's text lines.
pub fn reconstruct_lines(spans: Vec<TextSpan>, tolerance: f32) -> Vec<String> {
    group_lines(spans, tolerance)
        .into_iter()
        .map(LineGroup::into_text)
        .collect()
}

/// Layout-aware extraction: every page's reconstructed lines, in page order,
/// joined by newlines.
pub fn read_with_layout(
    backend: Option<&dyn SpanBackend>,
    path: &Path,
    tolerance: f32,
) -> Result<String, ExtractError> {
    let backend = backend.ok_or_else(|| ExtractError::MissingBackend {
        missing: "structured layout backend (pdftotext)".into(),
    })?;

    let mut doc = backend.open(path)?;
    let mut all_lines = Vec::new();
    for page_index in 0..doc.page_count() {
        let spans = doc.page_spans(page_index)?;
        tracing::debug!(page_index, spans = spans.len(), "grouping page spans");
        all_lines.extend(reconstruct_lines(spans, tolerance));
    }

    Ok(all_lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn span(text: &str, top: f32, left: f32) -> TextSpan {
        TextSpan::new(
            text,
            BBox {
                left,
                top,
                right: left + 10.0,
                bottom: top + 8.0,
            },
            0,
        )
    }

    #[test]
    fn test_groups_within_tolerance() {
        let spans = vec![span("A", 10.0, 0.0), span("B", 12.0, 50.0), span("C", 40.0, 0.0)];
        assert_eq!(reconstruct_lines(spans, 5.0), vec!["A B", "C"]);
    }

    #[test]
    fn test_equal_tops_sorted_by_left() {
        let spans = vec![
            span("world", 100.0, 80.0),
            span("Hello", 100.0, 10.0),
            span("there", 100.0, 200.0),
        ];
        assert_eq!(reconstruct_lines(spans, 5.0), vec!["Hello world there"]);
    }

    #[test]
    fn test_backend_order_is_not_reading_order() {
        let spans = vec![
            span("footer", 700.0, 10.0),
            span("title", 20.0, 10.0),
            span("body", 300.0, 10.0),
        ];
        assert_eq!(
            reconstruct_lines(spans, 5.0),
            vec!["title", "body", "footer"]
        );
    }

    #[test]
    fn test_blank_spans_dropped() {
        let spans = vec![span("  ", 10.0, 0.0), span("x", 30.0, 0.0), span("", 60.0, 0.0)];
        assert_eq!(reconstruct_lines(spans, 5.0), vec!["x"]);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let spans = vec![span("a", 10.0, 0.0), span("b", 15.0, 5.0), span("c", 15.1, 0.0)];
        let lines = group_lines(spans, 5.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans().len(), 2);
    }

    #[test]
    fn test_reference_stays_at_first_span() {
        // 10 -> 14 -> 18: 18 is within 5 of 14 but not of 10.
        let spans = vec![span("a", 10.0, 0.0), span("b", 14.0, 0.0), span("c", 18.0, 0.0)];
        assert_eq!(reconstruct_lines(spans, 5.0), vec!["a b", "c"]);
    }

    #[test]
    fn test_zero_tolerance_splits_every_row() {
        let spans = vec![span("a", 10.0, 0.0), span("b", 10.5, 0.0)];
        assert_eq!(reconstruct_lines(spans, 0.0), vec!["a", "b"]);
    }

    #[test]
    fn test_no_spans_no_lines() {
        assert!(reconstruct_lines(Vec::new(), 5.0).is_empty());
    }

    #[test]
    fn test_missing_backend() {
        let err = read_with_layout(None, Path::new("x.ai"), 5.0).unwrap_err();
        assert_eq!(err.kind(), crate::error::FailureKind::MissingCapability);
    }
}
