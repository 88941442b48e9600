use serde::{Deserialize, Serialize};

/// A location of a single table cell within a table.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableCellLocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    /// The 0-based row index.
    pub row_index: usize,
    /// The 0-based column index.
    pub column_index: usize,
}

/// A PageElement kind representing a table. Cell contents are never read back.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#Table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Number of rows in the table.
    pub rows: i32,
    /// Number of columns in the table.
    pub columns: i32,
}
