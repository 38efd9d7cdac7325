use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use otter_core::TimeSeries;

use crate::Error;

/// The conventional name of the time column in postprocessor output.
pub const DEFAULT_TIME_COLUMN: &str = "time";

/// Columnar postprocessor output keyed by column name.
///
/// Every column shares the same time vector. Rows are stored in increasing
/// time order; when a restarted simulation writes a row for a time that was
/// already recorded, the later row wins.
#[derive(Debug, Clone, PartialEq)]
pub struct PostprocessorData {
    time_column: String,
    times: Vec<f64>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl PostprocessorData {
    /// Reads a CSV file using `time_column` as the time axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its contents are
    /// rejected by [`PostprocessorData::from_reader`].
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>, time_column: &str) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), time_column)
    }

    /// Reads CSV text with a header row.
    ///
    /// Headers and cells are trimmed; blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed, a header name repeats, the
    /// time column is missing, a cell is not a number, a time is not finite
    /// or decreases, or there are no rows.
    pub fn from_reader<R: Read>(reader: R, time_column: &str) -> Result<Self, Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        for (i, name) in headers.iter().enumerate() {
            if headers[..i].contains(name) {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }

        let time_index = headers
            .iter()
            .position(|h| h == time_column)
            .ok_or_else(|| Error::MissingTimeColumn(time_column.to_string()))?;

        let mut times: Vec<f64> = Vec::new();
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);

            let row = record
                .iter()
                .zip(&headers)
                .map(|(text, column)| {
                    text.parse::<f64>().map_err(|_| Error::BadNumber {
                        line,
                        column: column.clone(),
                        text: text.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>, Error>>()?;

            let time = row[time_index];
            if !time.is_finite() {
                return Err(Error::NonFiniteTime { line, time });
            }
            match times.last() {
                Some(&previous) if time < previous => {
                    return Err(Error::TimeWentBackwards {
                        line,
                        time,
                        previous,
                    });
                }
                Some(&previous) if time == previous => {
                    tracing::debug!(line, time, "replacing row with repeated time");
                    if let Some(last) = rows.last_mut() {
                        *last = row;
                    }
                }
                _ => {
                    times.push(time);
                    rows.push(row);
                }
            }
        }

        if rows.is_empty() {
            return Err(Error::NoRows);
        }

        let columns = headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != time_index)
            .map(|(i, name)| (name.clone(), rows.iter().map(|row| row[i]).collect()))
            .collect();

        tracing::debug!(rows = times.len(), columns = headers.len() - 1, "read postprocessor data");

        Ok(Self {
            time_column: time_column.to_string(),
            times,
            columns,
        })
    }

    #[must_use]
    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    /// Returns the de-duplicated sample times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the names of the non-time columns in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns the raw values of a column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Builds a validated time series for one column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] if the column does not exist, or
    /// [`Error::Series`] if its values are not finite.
    pub fn series(&self, name: &str) -> Result<TimeSeries, Error> {
        let values = self
            .column(name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;

        TimeSeries::new(self.times.clone(), values.to_vec()).map_err(|source| Error::Series {
            column: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use otter_core::interpolate;

    use super::*;

    fn read(text: &str) -> Result<PostprocessorData, Error> {
        PostprocessorData::from_reader(text.as_bytes(), DEFAULT_TIME_COLUMN)
    }

    #[test]
    fn reads_columns() {
        let data = read("time,energy,flux\n0,1.0,10\n1,2.0,20\n3,4.0,30\n").unwrap();

        assert_eq!(data.times(), &[0.0, 1.0, 3.0]);
        assert_eq!(data.column_names().collect::<Vec<_>>(), vec!["energy", "flux"]);
        assert_eq!(data.column("flux"), Some(&[10.0, 20.0, 30.0][..]));

        let energy = data.series("energy").unwrap();
        assert_relative_eq!(interpolate(&energy, 2.0).unwrap(), 3.0);
    }

    #[test]
    fn trims_whitespace_and_skips_blank_lines() {
        let data = read(" time , energy \n 0 , 1.5 \n\n 2 , 2.5 \n").unwrap();

        assert_eq!(data.times(), &[0.0, 2.0]);
        assert_eq!(data.column("energy"), Some(&[1.5, 2.5][..]));
    }

    #[test]
    fn custom_time_column() {
        let data =
            PostprocessorData::from_reader("step,t,value\n0,0.5,1\n1,1.5,2\n".as_bytes(), "t")
                .unwrap();

        assert_eq!(data.time_column(), "t");
        assert_eq!(data.times(), &[0.5, 1.5]);
        assert_eq!(data.column("step"), Some(&[0.0, 1.0][..]));
    }

    #[test]
    fn later_row_replaces_repeated_time() {
        let data = read("time,x\n0,1\n1,2\n1,5\n2,6\n").unwrap();

        assert_eq!(data.times(), &[0.0, 1.0, 2.0]);
        assert_eq!(data.column("x"), Some(&[1.0, 5.0, 6.0][..]));
    }

    #[test]
    fn rejects_decreasing_time() {
        let err = read("time,x\n0,1\n2,2\n1,3\n").unwrap_err();

        assert!(matches!(
            err,
            Error::TimeWentBackwards {
                line: 4,
                time,
                previous,
            } if time == 1.0 && previous == 2.0
        ));
    }

    #[test]
    fn reports_bad_number_position() {
        let err = read("time,x\n0,1\n1,oops\n").unwrap_err();

        match err {
            Error::BadNumber { line, column, text } => {
                assert_eq!(line, 3);
                assert_eq!(column, "x");
                assert_eq!(text, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_time_column() {
        assert!(matches!(
            read("t,x\n0,1\n"),
            Err(Error::MissingTimeColumn(name)) if name == "time"
        ));
    }

    #[test]
    fn header_only_has_no_rows() {
        assert!(matches!(read("time,x\n"), Err(Error::NoRows)));
    }

    #[test]
    fn unknown_column() {
        let data = read("time,x\n0,1\n").unwrap();
        assert!(matches!(data.series("y"), Err(Error::UnknownColumn(name)) if name == "y"));
    }

    #[test]
    fn non_finite_values_fail_series_validation() {
        let data = read("time,x\n0,1\n1,inf\n").unwrap();
        assert!(matches!(data.series("x"), Err(Error::Series { .. })));
    }

    #[test]
    fn rejects_duplicate_headers() {
        assert!(matches!(
            read("time,x,x\n0,1,9\n1,2,8\n"),
            Err(Error::DuplicateColumn(name)) if name == "x"
        ));
        assert!(matches!(
            read("time, x ,time\n0,1,0\n"),
            Err(Error::DuplicateColumn(name)) if name == "time"
        ));
    }

    #[test]
    fn rejects_non_finite_time() {
        let err = read("time,x\n0,1\n2,2\nnan,3\n1,4\n").unwrap_err();

        assert!(matches!(err, Error::NonFiniteTime { line: 4, time } if time.is_nan()));
    }
}
