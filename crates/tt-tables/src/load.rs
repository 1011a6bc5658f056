//! File-based table loading.

use crate::error::TableResult;
use crate::pair::TablePair;
use crate::parse::parse_delimited;
use crate::schema::TablePairDef;
use std::path::Path;
use tracing::info;

/// On-disk table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Sectioned or combined delimited text (see [`crate::parse`]).
    Delimited,
    Yaml,
    Json,
}

impl TableFormat {
    /// Pick a format from the file extension; anything unrecognised is delimited text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml" | "yml") => TableFormat::Yaml,
            Some("json") => TableFormat::Json,
            _ => TableFormat::Delimited,
        }
    }
}

/// Parse already-read table text in the given format.
pub fn parse_tables(content: &str, format: TableFormat) -> TableResult<TablePair> {
    match format {
        TableFormat::Delimited => parse_delimited(content),
        TableFormat::Yaml => TablePairDef::from_yaml_str(content)?.build(),
        TableFormat::Json => TablePairDef::from_json_str(content)?.build(),
    }
}

/// Read and validate a table file, choosing the format by extension.
pub fn load_tables(path: &Path) -> TableResult<TablePair> {
    let content = std::fs::read_to_string(path)?;
    let format = TableFormat::from_path(path);
    let pair = parse_tables(&content, format)?;
    info!(
        path = %path.display(),
        ?format,
        enthalpy_points = pair.enthalpy.len(),
        entropy_points = pair.entropy.len(),
        "loaded composition tables"
    );
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(TableFormat::from_path(Path::new("a.yaml")), TableFormat::Yaml);
        assert_eq!(TableFormat::from_path(Path::new("a.YML")), TableFormat::Yaml);
        assert_eq!(TableFormat::from_path(Path::new("a.json")), TableFormat::Json);
        assert_eq!(TableFormat::from_path(Path::new("a.csv")), TableFormat::Delimited);
        assert_eq!(TableFormat::from_path(Path::new("data")), TableFormat::Delimited);
    }

    #[test]
    fn parse_each_format() {
        let text = parse_tables("0 1 2\n1 3 4\n", TableFormat::Delimited).unwrap();
        let yaml = parse_tables(
            "enthalpy: [[0, 1], [1, 3]]\nentropy: [[0, 2], [1, 4]]\n",
            TableFormat::Yaml,
        )
        .unwrap();
        let json = parse_tables(
            r#"{"enthalpy": [[0, 1], [1, 3]], "entropy": [[0, 2], [1, 4]]}"#,
            TableFormat::Json,
        )
        .unwrap();
        assert_eq!(text, yaml);
        assert_eq!(yaml, json);
    }
}
