//! Dynamically typed result rows and the typed decode step that turns them
//! into response records.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Column holding the full match count on paginated procedures.
pub const TOTAL_COUNT_COLUMN: &str = "total_count";

/// Errors decoding a row into a typed record
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("row is missing column '{column}' required by {target}")]
    MissingColumn { column: String, target: &'static str },

    #[error("cannot decode row into {target}: {source}")]
    Invalid {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// One result row: column name to scalar value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Map<String, Value>,
}

impl Row {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn columns(&self) -> &Map<String, Value> {
        &self.columns
    }

    /// Decode into a typed record. Extra columns are ignored; a missing
    /// non-optional column is a [`DecodeError::MissingColumn`].
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        let target = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("record");

        serde_json::from_value(Value::Object(self.columns.clone())).map_err(|source| {
            match missing_field(&source) {
                Some(column) => DecodeError::MissingColumn { column, target },
                None => DecodeError::Invalid { target, source },
            }
        })
    }
}

impl From<Map<String, Value>> for Row {
    fn from(columns: Map<String, Value>) -> Self {
        Self::new(columns)
    }
}

/// serde reports missing fields as "missing field `name`".
fn missing_field(err: &serde_json::Error) -> Option<String> {
    let msg = err.to_string();
    let rest = msg.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

/// A decoded page of rows plus the procedure-reported total.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPage<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}

impl<T> RowPage<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// Decode every row and pull `total_count` from the first one.
///
/// No rows is an empty page, not an error. A first row without a usable
/// `total_count` reports a total of 0.
pub fn decode_page<T: DeserializeOwned>(rows: &[Row]) -> Result<RowPage<T>, DecodeError> {
    let Some(first) = rows.first() else {
        return Ok(RowPage::empty());
    };

    let items = rows.iter().map(Row::decode).collect::<Result<Vec<T>, _>>()?;
    let total_count = first
        .get(TOTAL_COUNT_COLUMN)
        .and_then(Value::as_i64)
        .unwrap_or(0);

    Ok(RowPage { items, total_count })
}
