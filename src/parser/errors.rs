//! Parser-facing diagnostics (spec §7: "errors carry a line number"),
//! grounded on the teacher's boundary-facing error style in
//! `error.rs::LoadError` — a dedicated type at the parser seam, rendered
//! through `ariadne` the way the pack's other example repos render
//! source-span diagnostics, rather than folded into `CantusError`
//! directly.

use std::ops::Range;

use ariadne::{Label, Report, ReportKind, Source};

use crate::error::{CantusError, SyntaxError};

#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub kind: SyntaxError,
    pub span: Range<usize>,
}

impl ParserError {
    pub fn new(kind: SyntaxError, span: Range<usize>) -> Self {
        ParserError { kind, span }
    }

    /// Renders this error against `source` as a human-readable report,
    /// pointing at the offending span.
    pub fn render(&self, source_name: &str, source: &str) -> String {
        let mut buffer = Vec::new();
        let report = Report::build(ReportKind::Error, (source_name, self.span.clone()))
            .with_message(self.kind.to_string())
            .with_label(Label::new((source_name, self.span.clone())).with_message(self.kind.to_string()))
            .finish();
        let _ = report.write((source_name, Source::from(source)), &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl From<ParserError> for CantusError {
    fn from(error: ParserError) -> Self {
        error.kind.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_without_panicking() {
        let error = ParserError::new(SyntaxError::UnexpectedEndOfInput, 3..4);
        let rendered = error.render("test.ct", "1 + ");
        assert!(rendered.contains("unexpected end of input"));
    }
}
