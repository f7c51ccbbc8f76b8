//! In-memory tables - the common shape every dataset takes after loading.
//!
//! Tables are built once (from a CSV file or a default constructor) and
//! never mutated afterwards; derivations produce new values instead.

use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Str,
    Date,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Str => "str",
            ColumnType::Date => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view: ints widen to f64 so numeric columns of either type
    /// feed the same derivations.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Ordered column layout of a dataset. Schemas are static: a loaded table
/// must expose exactly the column names and types of its default.
pub type Schema = &'static [(&'static str, ColumnType)];

#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { headers, rows }
    }

    pub fn from_schema(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        let headers = schema.iter().map(|(name, _)| (*name).to_string()).collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row)?.get(idx)
    }

    pub fn column_i64(&self, name: &str) -> Vec<i64> {
        self.column_map(name, Value::as_i64)
    }

    pub fn column_f64(&self, name: &str) -> Vec<f64> {
        self.column_map(name, Value::as_f64)
    }

    pub fn column_date(&self, name: &str) -> Vec<NaiveDate> {
        self.column_map(name, Value::as_date)
    }

    pub fn column_str(&self, name: &str) -> Vec<&str> {
        match self.column_index(name) {
            Some(idx) => self
                .rows
                .iter()
                .filter_map(|r| r.get(idx).and_then(Value::as_str))
                .collect(),
            None => Vec::new(),
        }
    }

    fn column_map<T>(&self, name: &str, f: impl Fn(&Value) -> Option<T>) -> Vec<T> {
        match self.column_index(name) {
            Some(idx) => self
                .rows
                .iter()
                .filter_map(|r| r.get(idx).and_then(|v| f(v)))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn first_f64(&self, name: &str) -> Option<f64> {
        self.cell(0, name).and_then(Value::as_f64)
    }

    /// New table with rows in ascending order of the named date column.
    /// Rows without a date in that column keep their relative order at the end.
    pub fn sorted_by_date(&self, name: &str) -> Table {
        let mut sorted = self.clone();
        if let Some(idx) = self.column_index(name) {
            sorted.rows.sort_by_key(|r| {
                r.get(idx)
                    .and_then(Value::as_date)
                    .unwrap_or(NaiveDate::MAX)
            });
        }
        sorted
    }

    /// Rows whose cell in `name` equals one of `keep` (string columns only).
    pub fn filter_str(&self, name: &str, keep: &[String]) -> Table {
        let rows = match self.column_index(name) {
            Some(idx) => self
                .rows
                .iter()
                .filter(|r| {
                    r.get(idx)
                        .and_then(Value::as_str)
                        .map(|s| keep.iter().any(|k| k == s))
                        .unwrap_or(false)
                })
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        Table::new(self.headers.clone(), rows)
    }

    /// Fixed-width text rendering for the runner. `max_rows` of 0 shows
    /// everything; otherwise long tables show head and tail with an ellipsis.
    pub fn render_text(&self, max_rows: usize) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        render_row(&mut out, &self.headers, &widths);
        for (i, w) in widths.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(&"-".repeat(*w));
        }
        out.push('\n');

        let truncate = max_rows > 0 && cells.len() > max_rows;
        if truncate {
            let head = max_rows / 2;
            let tail = max_rows - head;
            for row in &cells[..head] {
                render_row(&mut out, row, &widths);
            }
            out.push_str(&format!("... ({} rows omitted)\n", cells.len() - max_rows));
            for row in &cells[cells.len() - tail..] {
                render_row(&mut out, row, &widths);
            }
        } else {
            for row in &cells {
                render_row(&mut out, row, &widths);
            }
        }
        out
    }
}

fn render_row<S: AsRef<str>>(out: &mut String, row: &[S], widths: &[usize]) {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let cell = cell.as_ref();
        out.push_str(cell);
        let width = widths.get(i).copied().unwrap_or(0);
        let pad = width.saturating_sub(cell.chars().count());
        out.push_str(&" ".repeat(pad));
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
