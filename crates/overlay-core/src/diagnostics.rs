//! Diagnostics data model.
//!
//! Diagnostics arrive from the analysis collaborator with line/character locations expressed in
//! the full analyzed document, which may include hidden preamble lines the user never sees. The
//! overlay pipeline ([`crate::overlay`]) resolves them against the visible buffer.

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    /// Compile errors.
    Error,
    /// Warnings.
    Warning,
    /// Informational messages.
    Info,
    /// Hidden diagnostics; never highlighted nor counted.
    Hidden,
}

/// A zero-based `(line, character)` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinePosition {
    /// Zero-based line.
    pub line: usize,
    /// Zero-based character within the line.
    pub character: usize,
}

impl LinePosition {
    /// Create a new position.
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A half-open `(line, character)` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    /// Range start (inclusive).
    pub start: LinePosition,
    /// Range end (exclusive).
    pub end: LinePosition,
}

impl LineSpan {
    /// Create a new line span.
    pub const fn new(start: LinePosition, end: LinePosition) -> Self {
        Self { start, end }
    }
}

/// A single diagnostic reported by the analysis collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub severity: DiagnosticSeverity,
    /// Diagnostic id (e.g. `"CS0103"`).
    pub id: String,
    /// Human-readable message.
    pub message: String,
    /// Location in the analyzed document (preamble included).
    pub location: LineSpan,
}

impl Diagnostic {
    /// Convenience constructor.
    pub fn new(
        severity: DiagnosticSeverity,
        id: impl Into<String>,
        message: impl Into<String>,
        location: LineSpan,
    ) -> Self {
        Self {
            severity,
            id: id.into(),
            message: message.into(),
            location,
        }
    }
}

/// Summary counts for a status bar or problems badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticCounts {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
    /// Number of informational diagnostics.
    pub infos: usize,
}

impl DiagnosticCounts {
    /// Count one diagnostic. Hidden diagnostics are ignored.
    pub fn record(&mut self, severity: DiagnosticSeverity) {
        match severity {
            DiagnosticSeverity::Error => self.errors += 1,
            DiagnosticSeverity::Warning => self.warnings += 1,
            DiagnosticSeverity::Info => self.infos += 1,
            DiagnosticSeverity::Hidden => {}
        }
    }

    /// Total number of counted diagnostics.
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }
}
