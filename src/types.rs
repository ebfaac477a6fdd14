//! Core data model types.
//!
//! A [`DataSet`] is the in-memory table every analysis reads: a [`Schema`] (an ordered list of
//! typed [`Field`]s) plus row-major [`Value`] storage. Missing cells are stored explicitly as
//! [`Value::Null`].

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{IngestionError, IngestionResult};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Naive (timezone-less) date-time.
    Timestamp,
}

impl DataType {
    /// The scalar category this type belongs to.
    pub fn kind(self) -> ColumnKind {
        match self {
            DataType::Int64 | DataType::Float64 => ColumnKind::Numeric,
            DataType::Bool => ColumnKind::Boolean,
            DataType::Utf8 => ColumnKind::Textual,
            DataType::Timestamp => ColumnKind::Temporal,
        }
    }

    /// Returns `true` for [`DataType::Int64`] and [`DataType::Float64`].
    pub fn is_numeric(self) -> bool {
        self.kind() == ColumnKind::Numeric
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Bool => "bool",
            DataType::Utf8 => "utf8",
            DataType::Timestamp => "timestamp",
        };
        f.write_str(s)
    }
}

/// Inferred scalar category of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Textual,
    Boolean,
    Temporal,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Indexes of numeric fields, in schema order.
    pub fn numeric_indexes(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.data_type.is_numeric())
            .map(|(i, _)| i)
            .collect()
    }
}

/// A single typed cell in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Naive date-time.
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Returns `true` for [`Value::Null`] and for a `NaN` float.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the cell. `None` for missing and non-numeric cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Whether the cell can live in a column of `data_type`. Missing fits anywhere.
    pub fn conforms_to(&self, data_type: DataType) -> bool {
        matches!(
            (self, data_type),
            (Value::Null, _)
                | (Value::Int64(_), DataType::Int64)
                | (Value::Float64(_), DataType::Float64)
                | (Value::Bool(_), DataType::Bool)
                | (Value::Utf8(_), DataType::Utf8)
                | (Value::Timestamp(_), DataType::Timestamp)
        )
    }
}

/// Format used when a timestamp is rendered as text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            // `{:?}` keeps the fractional part of whole floats ("1.0"), so text reads back as Float64.
            Value::Float64(v) => write!(f, "{v:?}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
            Value::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. A dataset is
/// treated as immutable by the analysis functions; transforms return a new dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows without validating them.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Create a dataset, checking the table invariants:
    ///
    /// - column names are unique
    /// - every row has exactly one cell per field
    /// - every non-missing cell matches its field's [`DataType`]
    pub fn try_new(schema: Schema, rows: Vec<Vec<Value>>) -> IngestionResult<Self> {
        let mut seen = HashSet::with_capacity(schema.fields.len());
        for name in schema.field_names() {
            if !seen.insert(name) {
                return Err(IngestionError::SchemaMismatch {
                    message: format!("duplicate column name '{name}'"),
                });
            }
        }

        let width = schema.fields.len();
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "row {row_idx} has {} values but schema has {width} fields",
                        row.len()
                    ),
                });
            }
            for (field, value) in schema.fields.iter().zip(row) {
                if !value.conforms_to(field.data_type) {
                    return Err(IngestionError::SchemaMismatch {
                        message: format!(
                            "row {row_idx} column '{}': value {value:?} is not {}",
                            field.name, field.data_type
                        ),
                    });
                }
            }
        }

        Ok(Self { schema, rows })
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Iterate the cells of column `idx` in row order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// The first `n` rows, as a new dataset.
    pub fn head(&self, n: usize) -> Self {
        Self {
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema and row order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset from the rows at `indexes`, in the given order.
    pub fn take_rows(&self, indexes: &[usize]) -> Self {
        let rows = indexes
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }
}
