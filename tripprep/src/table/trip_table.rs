use std::path::Path;

use kdam::tqdm;

use crate::error::PipelineError;

/// an in-memory csv table: one header row of column names plus string-typed
/// data rows. train, validation and test files carry different column sets,
/// so cells stay untyped until an operation parses the column it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TripTable {
    /// builds a table from a header and rows, rejecting rows whose width
    /// does not match the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<TripTable, PipelineError> {
        let width = columns.len();
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(PipelineError::InvalidUserInput(format!(
                "row {bad} has {} cells but the table has {width} columns",
                rows[bad].len()
            )));
        }
        Ok(TripTable { columns, rows })
    }

    pub fn read_csv(path: &Path) -> Result<TripTable, PipelineError> {
        let mut reader = csv::ReaderBuilder::new()
            .from_path(path)
            .map_err(|e| PipelineError::ReadError {
                path: path.to_owned(),
                message: e.to_string(),
            })?;
        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| PipelineError::ReadError {
                path: path.to_owned(),
                message: format!("failed to read csv header: {e}"),
            })?
            .iter()
            .map(String::from)
            .collect();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| PipelineError::ReadError {
                path: path.to_owned(),
                message: format!("failed to read csv record: {e}"),
            })?;
            rows.push(record.iter().map(String::from).collect());
        }
        TripTable::new(columns, rows)
    }

    /// truncate-and-write the table as csv, with a progress bar over rows.
    pub fn write_csv(&self, path: &Path, desc: &str) -> Result<(), PipelineError> {
        let mut writer =
            csv::WriterBuilder::new()
                .from_path(path)
                .map_err(|e| PipelineError::WriteError {
                    path: path.to_owned(),
                    message: e.to_string(),
                })?;
        writer
            .write_record(&self.columns)
            .map_err(|e| PipelineError::CsvWriteError(format!("failed to write header: {e}")))?;
        let total = self.rows.len();
        let bar_iter = tqdm!(self.rows.iter(), total = total, desc = desc);
        for row in bar_iter {
            writer.write_record(row).map_err(|e| {
                PipelineError::CsvWriteError(format!("failed to write row: {e}"))
            })?;
        }
        eprintln!();
        writer
            .flush()
            .map_err(|e| PipelineError::CsvWriteError(format!("failed to flush: {e}")))?;
        Ok(())
    }

    /// (rows, columns), in the pandas shape convention the run logs use.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize, PipelineError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PipelineError::ColumnNotFoundError(name.to_string()))
    }

    /// all cells of one column, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>, PipelineError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// a copy of the table without the named columns. every name must be
    /// present in the header.
    pub fn drop_columns(&self, names: &[&str]) -> Result<TripTable, PipelineError> {
        for name in names {
            self.column_index(name)?;
        }
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|i| !names.contains(&self.columns[*i].as_str()))
            .collect();
        let columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| keep.iter().map(|&i| r[i].clone()).collect())
            .collect();
        TripTable::new(columns, rows)
    }

    /// a copy of the table keeping only rows for which the predicate holds.
    pub fn retain_rows<F>(&self, predicate: F) -> TripTable
    where
        F: Fn(&[String]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|r| predicate(r.as_slice()))
            .cloned()
            .collect();
        TripTable {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// a copy of the table containing the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> TripTable {
        let rows = indices.iter().map(|&i| self.rows[i].clone()).collect();
        TripTable {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// a copy of the table with a new column appended on the right.
    pub fn with_column(
        &self,
        name: &str,
        values: Vec<String>,
    ) -> Result<TripTable, PipelineError> {
        if values.len() != self.rows.len() {
            return Err(PipelineError::InvalidUserInput(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.rows.len()
            )));
        }
        let mut columns = self.columns.clone();
        columns.push(name.to_string());
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(r, v)| {
                let mut row = r.clone();
                row.push(v);
                row
            })
            .collect();
        TripTable::new(columns, rows)
    }

    /// a copy of the table with every cell of one column rewritten through
    /// a fallible mapping.
    pub fn map_column<F>(&self, name: &str, f: F) -> Result<TripTable, PipelineError>
    where
        F: Fn(&str) -> Result<String, PipelineError>,
    {
        let idx = self.column_index(name)?;
        let mut rows = self.rows.clone();
        for row in rows.iter_mut() {
            row[idx] = f(&row[idx])?;
        }
        Ok(TripTable {
            columns: self.columns.clone(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TripTable {
        TripTable::new(
            vec!["id".to_string(), "passenger_count".to_string()],
            vec![
                vec!["id1".to_string(), "1".to_string()],
                vec!["id2".to_string(), "4".to_string()],
                vec!["id3".to_string(), "9".to_string()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = TripTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["1".to_string()]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_drop_columns_removes_only_named() {
        let table = sample();
        let dropped = table.drop_columns(&["id"]).unwrap();
        assert_eq!(dropped.columns(), ["passenger_count"]);
        assert_eq!(dropped.shape(), (3, 1));
        assert!(table.drop_columns(&["missing"]).is_err());
    }

    #[test]
    fn test_with_column_requires_matching_length() {
        let table = sample();
        let appended = table
            .with_column("is_weekend", vec!["0".into(), "1".into(), "0".into()])
            .unwrap();
        assert_eq!(appended.shape(), (3, 3));
        assert!(table.with_column("bad", vec!["0".into()]).is_err());
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        let table = sample();
        table.write_csv(&path, "sample.csv").unwrap();
        let reread = TripTable::read_csv(&path).unwrap();
        assert_eq!(reread, table);
    }
}
