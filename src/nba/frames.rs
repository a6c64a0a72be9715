use polars::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use crate::nba::error::{Error, Result};

/// Top level of every stats.nba.com payload we use.
#[derive(Debug, Deserialize)]
pub struct Payload {
    #[serde(rename = "resultSets")]
    pub result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl Payload {
    pub fn from_value(json: Value) -> Result<Self> {
        serde_json::from_value(json)
            .map_err(|e| Error::malformed(format!("unexpected payload shape: {}", e)))
    }

    pub fn result_set(&self, name: &str) -> Result<&ResultSet> {
        self.result_sets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::malformed(format!("missing result set {}", name)))
    }

    pub fn into_result_set(self, name: &str) -> Result<ResultSet> {
        self.result_sets
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::malformed(format!("missing result set {}", name)))
    }
}

impl ResultSet {
    pub fn column(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| Error::malformed(format!("{} has no column {}", self.name, header)))
    }

    pub fn len(&self) -> usize {
        self.row_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_set.is_empty()
    }

    /// Keeps only the rows whose `header` cell satisfies `keep`.
    pub fn retain_rows<F>(&mut self, header: &str, keep: F) -> Result<()>
    where
        F: Fn(&Value) -> bool,
    {
        let col = self.column(header)?;
        self.row_set
            .retain(|row| row.get(col).map(|v| keep(v)).unwrap_or(false));
        Ok(())
    }

    /// Builds one series per header, in header order. The column type comes
    /// from the non-null cells: all integers -> i64, any other number -> f64,
    /// all bools -> bool, anything else -> str. Nulls stay null.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut df_series: Vec<Series> = Vec::with_capacity(self.headers.len());
        for (pos, col_name) in self.headers.iter().enumerate() {
            let mut json_values: Vec<&Value> = Vec::with_capacity(self.row_set.len());
            for row in &self.row_set {
                let v = row.get(pos).ok_or_else(|| {
                    Error::malformed(format!(
                        "{} row has {} cells, expected {}",
                        self.name,
                        row.len(),
                        self.headers.len()
                    ))
                })?;
                json_values.push(v);
            }
            df_series.push(json_series(col_name, &json_values));
        }
        Ok(DataFrame::new(df_series)?)
    }
}

fn json_series(col_name: &str, json_values: &[&Value]) -> Series {
    let non_null = json_values.iter().filter(|v| !v.is_null());
    let mut all_i64 = true;
    let mut all_num = true;
    let mut all_bool = true;
    let mut seen = false;
    for v in non_null {
        seen = true;
        all_i64 &= v.is_i64();
        all_num &= v.is_number();
        all_bool &= v.is_boolean();
    }
    if !seen || all_i64 {
        let typed_data = json_values.iter().map(|v| v.as_i64()).collect::<Vec<Option<i64>>>();
        Series::new(col_name, typed_data)
    } else if all_num {
        let typed_data = json_values.iter().map(|v| v.as_f64()).collect::<Vec<Option<f64>>>();
        Series::new(col_name, typed_data)
    } else if all_bool {
        let typed_data = json_values.iter().map(|v| v.as_bool()).collect::<Vec<Option<bool>>>();
        Series::new(col_name, typed_data)
    } else {
        let typed_data = json_values
            .iter()
            .map(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect::<Vec<Option<String>>>();
        Series::new(col_name, typed_data)
    }
}

/// Reads a cell as an integer, accepting numeric strings since the provider
/// is not consistent about it (FROM_YEAR comes back as "2009").
pub fn cell_i64(v: &Value, header: &str) -> Result<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| Error::malformed(format!("{} is not an integer: {}", header, n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::malformed(format!("{} is not an integer: {:?}", header, s))),
        other => Err(Error::malformed(format!("{} is not an integer: {}", header, other))),
    }
}

pub fn cell_f64(v: &Value, header: &str) -> Result<f64> {
    match v {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::malformed(format!("{} is not a number: {}", header, n))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::malformed(format!("{} is not a number: {:?}", header, s))),
        other => Err(Error::malformed(format!("{} is not a number: {}", header, other))),
    }
}

pub fn cell_str(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Copies a numeric column out of a frame as f64, failing on nulls.
pub fn column_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df.column(name)?.cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .map(|v| v.ok_or_else(|| Error::malformed(format!("null in column {}", name))))
        .collect()
}

pub fn column_bool(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    df.column(name)?
        .bool()?
        .into_iter()
        .map(|v| v.ok_or_else(|| Error::malformed(format!("null in column {}", name))))
        .collect()
}
