//! Delimited text table parser.
//!
//! Two layouts are accepted:
//!
//! ```text
//! # sectioned: one two-column table per section
//! [enthalpy]
//! 0.0, -1.2e4
//! 1.0, 3.4e3
//! [entropy]
//! 0.0  5.1
//! 1.0  2.0
//! ```
//!
//! ```text
//! # combined: x, h, s on every line, no section headers
//! 0.0  -1.2e4  5.1
//! 1.0   3.4e3  2.0
//! ```
//!
//! Cells are separated by commas, semicolons, tabs or spaces. `#` starts a
//! comment. Any format fault is reported as [`TableError::InvalidTable`] with
//! the 1-based line number.

use crate::error::{TableError, TableResult};
use crate::pair::{TableKind, TablePair};
use tt_core::numeric::Real;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Undecided,
    Sectioned(TableKind),
    Combined,
}

/// Parse a delimited text document into a validated [`TablePair`].
pub fn parse_delimited(text: &str) -> TableResult<TablePair> {
    let mut layout = Layout::Undecided;
    let mut enthalpy: Vec<(Real, Real)> = Vec::new();
    let mut entropy: Vec<(Real, Real)> = Vec::new();
    let mut seen_enthalpy = false;
    let mut seen_entropy = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = section_name(line) {
            if layout == Layout::Combined {
                return Err(line_error(
                    line_no,
                    "section header after combined x, h, s rows",
                ));
            }
            let kind = TableKind::from_name(name).ok_or_else(|| {
                line_error(line_no, format!("unknown section '[{name}]'"))
            })?;
            let seen = match kind {
                TableKind::Enthalpy => &mut seen_enthalpy,
                TableKind::Entropy => &mut seen_entropy,
            };
            if *seen {
                return Err(line_error(line_no, format!("duplicate section '[{kind}]'")));
            }
            *seen = true;
            layout = Layout::Sectioned(kind);
            continue;
        }

        let cells = parse_cells(line, line_no)?;
        match layout {
            Layout::Undecided | Layout::Combined => {
                if cells.len() != 3 {
                    return Err(line_error(
                        line_no,
                        format!(
                            "expected 3 columns (x, h, s) outside a section, found {}",
                            cells.len()
                        ),
                    ));
                }
                layout = Layout::Combined;
                enthalpy.push((cells[0], cells[1]));
                entropy.push((cells[0], cells[2]));
            }
            Layout::Sectioned(kind) => {
                if cells.len() != 2 {
                    return Err(line_error(
                        line_no,
                        format!("expected 2 columns (x, y) in [{kind}], found {}", cells.len()),
                    ));
                }
                match kind {
                    TableKind::Enthalpy => enthalpy.push((cells[0], cells[1])),
                    TableKind::Entropy => entropy.push((cells[0], cells[1])),
                }
            }
        }
    }

    if matches!(layout, Layout::Sectioned(_)) {
        for (kind, seen) in [
            (TableKind::Enthalpy, seen_enthalpy),
            (TableKind::Entropy, seen_entropy),
        ] {
            if !seen {
                return Err(TableError::invalid(format!("missing section '[{kind}]'")));
            }
        }
    }

    TablePair::from_points(enthalpy, entropy)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

fn parse_cells(line: &str, line_no: usize) -> TableResult<Vec<Real>> {
    line.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|cell| !cell.is_empty())
        .map(|cell| {
            cell.parse::<Real>()
                .map_err(|_| line_error(line_no, format!("non-numeric value '{cell}'")))
        })
        .collect()
}

fn line_error(line_no: usize, reason: impl AsRef<str>) -> TableError {
    TableError::invalid(format!("line {line_no}: {}", reason.as_ref()))
}
