//! Tab-separated batch parsing.
//!
//! The first line must equal the table's declared field list exactly,
//! names and order both; anything else fails the whole request before
//! a single data row is read. Data lines parse cell by cell through
//! the catalog's field domains. An empty cell is an absent value, so
//! required-field enforcement stays with the constraint pass and the
//! single-entry path behaves identically. Blank lines carry no cells
//! and are skipped, wherever they appear; line numbering still counts
//! them, so reported lines match the input file.

use crate::schema::{value, Row, SchemaError, TableSchema};

use super::report::{IssueKind, RowIssue};

/// A parsed batch: typed rows plus per-line parse issues
#[derive(Debug)]
pub struct ParsedBatch {
    pub rows: Vec<(usize, Row)>,
    pub issues: Vec<RowIssue>,
}

/// Parses one bulk request body for the given table.
pub fn parse_batch(schema: &TableSchema, input: &str) -> Result<ParsedBatch, SchemaError> {
    let mut lines = input.lines();
    let header = lines.next().unwrap_or("");
    let names: Vec<&str> = header.split('\t').collect();
    if names != schema.field_names() {
        return Err(SchemaError::HeaderMismatch {
            entity: schema.entity,
            expected: schema.header(),
            found: header.to_string(),
        });
    }

    let mut rows = Vec::new();
    let mut issues = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        if line.is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split('\t').collect();
        if cells.len() != schema.fields.len() {
            issues.push(RowIssue {
                entity: schema.entity,
                line: line_no,
                kind: IssueKind::Parse {
                    reason: format!(
                        "expected {} fields, got {}",
                        schema.fields.len(),
                        cells.len()
                    ),
                },
            });
            continue;
        }
        match parse_cells(schema, &cells) {
            Ok(row) => rows.push((line_no, row)),
            Err(reason) => issues.push(RowIssue {
                entity: schema.entity,
                line: line_no,
                kind: IssueKind::Parse { reason },
            }),
        }
    }
    Ok(ParsedBatch { rows, issues })
}

/// Parses one row from named raw values (the single-entry form path).
///
/// Unknown field names are rejected; empty values are absent, exactly
/// as an empty bulk cell would be.
pub fn parse_fields(schema: &TableSchema, fields: &[(&str, &str)]) -> Result<Row, String> {
    let mut row = Row::new();
    for (name, raw) in fields {
        let def = schema
            .field(name)
            .ok_or_else(|| format!("unknown field '{}'", name))?;
        if raw.is_empty() {
            continue;
        }
        let value = value::parse(def.domain, raw).map_err(|e| format!("field '{}': {}", name, e))?;
        row.set(def.name, value);
    }
    Ok(row)
}

fn parse_cells(schema: &TableSchema, cells: &[&str]) -> Result<Row, String> {
    let mut row = Row::new();
    for (def, raw) in schema.fields.iter().zip(cells) {
        if raw.is_empty() {
            continue;
        }
        let value = value::parse(def.domain, raw)
            .map_err(|e| format!("field '{}': {}", def.name, e))?;
        row.set(def.name, value);
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Catalog, EntityType, Value};

    #[test]
    fn test_header_must_match_exactly() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        let err = parse_batch(schema, "uid\temail\tu_name\n").unwrap_err();
        assert!(matches!(err, SchemaError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_missing_header_is_mismatch() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        assert!(parse_batch(schema, "").is_err());
    }

    #[test]
    fn test_parses_typed_rows_with_line_numbers() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        let input = "uid\tu_name\temail\n1\talice\talice@example.com\n2\tbob\tbob@example.com\n";
        let batch = parse_batch(schema, input).unwrap();
        assert!(batch.issues.is_empty());
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.rows[0].0, 2);
        assert_eq!(batch.rows[1].0, 3);
        assert_eq!(batch.rows[1].1.get_int("uid"), Some(2));
    }

    #[test]
    fn test_bad_cell_reported_with_line() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Review);
        let input = "mid\tuid\ttext\trating\n1\t2\tfine\tnine\n";
        let batch = parse_batch(schema, input).unwrap();
        assert!(batch.rows.is_empty());
        assert_eq!(batch.issues.len(), 1);
        assert_eq!(batch.issues[0].line, 2);
        assert!(matches!(batch.issues[0].kind, IssueKind::Parse { .. }));
    }

    #[test]
    fn test_wrong_field_count_reported() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Admin);
        let input = "uid\tposition\n1\n";
        let batch = parse_batch(schema, input).unwrap();
        assert_eq!(batch.issues.len(), 1);
    }

    #[test]
    fn test_blank_lines_skipped_numbering_kept() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        let input =
            "uid\tu_name\temail\n1\talice\talice@example.com\n\n2\tbob\tbob@example.com\n";
        let batch = parse_batch(schema, input).unwrap();
        assert!(batch.issues.is_empty());
        assert_eq!(batch.rows.len(), 2);
        // the blank line 3 still counts toward numbering
        assert_eq!(batch.rows[1].0, 4);
    }

    #[test]
    fn test_empty_cell_is_absent() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Director);
        let input = "uid\tgiven_name\tfamous_for\tdob\n4\tSofia\t\t\n";
        let batch = parse_batch(schema, input).unwrap();
        assert!(batch.issues.is_empty());
        let (_, row) = &batch.rows[0];
        assert_eq!(row.get("famous_for"), None);
        assert_eq!(row.get("dob"), None);
    }

    #[test]
    fn test_parse_fields_rejects_unknown_name() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        let err = parse_fields(schema, &[("uid", "1"), ("nickname", "al")]).unwrap_err();
        assert!(err.contains("nickname"));
    }

    #[test]
    fn test_parse_fields_types_values() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Review);
        let row = parse_fields(
            schema,
            &[("mid", "5"), ("uid", "7"), ("text", ""), ("rating", "4")],
        )
        .unwrap();
        assert_eq!(row.get("rating"), Some(&Value::Int(4)));
        assert_eq!(row.get("text"), None);
    }
}
