//! # Batch Reports
//!
//! Per-line issues and commit receipts. Issues carry the entity, the
//! input line, and the rule broken, so a caller sees every faulty line
//! of a rejected request, not just the first.

use std::fmt;

use crate::schema::EntityType;
use crate::validate::{ConstraintViolation, UnresolvedReference};

/// Why one line was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The line could not be parsed into a typed row
    Parse { reason: String },
    /// The row breaks a structural or uniqueness constraint
    Constraint(ConstraintViolation),
    /// A foreign key matched no committed or batch-local row
    Reference(UnresolvedReference),
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Parse { reason } => write!(f, "parse error: {}", reason),
            IssueKind::Constraint(v) => write!(f, "{}", v),
            IssueKind::Reference(r) => write!(f, "{}", r),
        }
    }
}

/// One rejected line of a request.
///
/// For bulk input, `line` is the 1-based input line (the header is
/// line 1). Single-entry rows are reported as line 1; their issues
/// name the field involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub entity: EntityType,
    pub line: usize,
    pub kind: IssueKind,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

/// Outcome of a committed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReceipt {
    pub entity: EntityType,
    pub rows: usize,
}

impl fmt::Display for BatchReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "committed {} {} row(s)", self.rows, self.entity)
    }
}
