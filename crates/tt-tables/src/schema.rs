//! Structured (YAML/JSON) table document schema.

use crate::error::{TableError, TableResult};
use crate::pair::TablePair;
use serde::{Deserialize, Serialize};

/// Serialized form of a [`TablePair`]: each table is a list of `[x, y]` pairs.
///
/// ```yaml
/// enthalpy: [[0.0, 100.0], [1.0, 100.0]]
/// entropy:  [[0.0, 10.0],  [1.0, 10.0]]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TablePairDef {
    pub enthalpy: Vec<(f64, f64)>,
    pub entropy: Vec<(f64, f64)>,
}

impl TablePairDef {
    /// Validate into a [`TablePair`].
    pub fn build(&self) -> TableResult<TablePair> {
        TablePair::from_points(self.enthalpy.clone(), self.entropy.clone())
    }

    pub fn from_yaml_str(content: &str) -> TableResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| TableError::invalid(format!("malformed YAML table document: {e}")))
    }

    pub fn from_json_str(content: &str) -> TableResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| TableError::invalid(format!("malformed JSON table document: {e}")))
    }

    /// Decode a table document already parsed as part of a larger file.
    pub fn from_yaml_value(value: serde_yaml::Value) -> TableResult<Self> {
        serde_yaml::from_value(value)
            .map_err(|e| TableError::invalid(format!("malformed inline table document: {e}")))
    }
}

impl From<&TablePair> for TablePairDef {
    fn from(pair: &TablePair) -> Self {
        Self {
            enthalpy: pair.enthalpy.points().to_vec(),
            entropy: pair.entropy.points().to_vec(),
        }
    }
}
