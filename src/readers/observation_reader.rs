use crate::error::DataLoadError;
use crate::models::Observation;
use crate::readers::DataSource;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use crate::utils::dates::{normalize_date, parse_measurement};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};
use validator::Validate;

type LoadResult<T> = std::result::Result<T, DataLoadError>;

/// One CSV row before typing. Columns outside this set are ignored.
#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    province_name: String,
    station_name: String,
    #[serde(rename = "Tavg", default)]
    tavg: Option<String>,
    #[serde(rename = "Tn", default)]
    tn: Option<String>,
    #[serde(rename = "Tx", default)]
    tx: Option<String>,
    #[serde(rename = "RH_avg", default)]
    rh_avg: Option<String>,
    #[serde(rename = "RR", default)]
    rr: Option<String>,
    #[serde(rename = "ss", default)]
    ss: Option<String>,
}

pub struct ObservationReader {
    strict_validation: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            strict_validation: false,
        }
    }

    pub fn with_strict_validation(mut self, strict_validation: bool) -> Self {
        self.strict_validation = strict_validation;
        self
    }

    /// Load every observation from a file or URL
    pub fn read_source(&self, source: &DataSource) -> LoadResult<Vec<Observation>> {
        match source {
            DataSource::Path(path) => self.read_path(path),
            DataSource::Url(url) => self.read_url(url),
        }
    }

    pub fn read_path(&self, path: &Path) -> LoadResult<Vec<Observation>> {
        let location = path.display().to_string();
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            location: location.clone(),
            source,
        })?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        self.read_from_reader(reader, &location)
    }

    /// Fetch with a blocking GET; non-2xx responses are errors
    pub fn read_url(&self, url: &str) -> LoadResult<Vec<Observation>> {
        let http_error = |source| DataLoadError::Http {
            url: url.to_string(),
            source,
        };

        debug!(url, "Fetching observations");
        let body = reqwest::blocking::get(url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map_err(http_error)?;
        debug!(url, bytes = body.len(), "Download complete");

        self.read_from_reader(body.as_ref(), url)
    }

    pub fn read_from_reader<R: Read>(
        &self,
        reader: R,
        location: &str,
    ) -> LoadResult<Vec<Observation>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|source| DataLoadError::Csv {
                location: location.to_string(),
                source,
            })?
            .clone();

        let mut observations = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|source| DataLoadError::Csv {
                location: location.to_string(),
                source,
            })?;
            let line = record.position().map_or(0, |p| p.line());

            let raw: RawObservation =
                record
                    .deserialize(Some(&headers))
                    .map_err(|e| DataLoadError::InvalidRecord {
                        line,
                        message: e.to_string(),
                    })?;

            let observation = Self::convert(raw, line)?;
            if self.strict_validation {
                observation
                    .validate()
                    .map_err(|source| DataLoadError::Validation { line, source })?;
            }
            observations.push(observation);
        }

        if observations.is_empty() {
            return Err(DataLoadError::Empty {
                location: location.to_string(),
            });
        }

        info!(
            location,
            records = observations.len(),
            strict = self.strict_validation,
            "Loaded observations"
        );
        Ok(observations)
    }

    fn convert(raw: RawObservation, line: u64) -> LoadResult<Observation> {
        let date = normalize_date(&raw.date).ok_or_else(|| DataLoadError::InvalidRecord {
            line,
            message: format!("Invalid date format: '{}'", raw.date),
        })?;

        let measurement = |cell: Option<String>, column: &str| -> LoadResult<Option<f64>> {
            match cell {
                None => Ok(None),
                Some(value) => {
                    parse_measurement(&value).map_err(|message| DataLoadError::InvalidRecord {
                        line,
                        message: format!("{} ({})", message, column),
                    })
                }
            }
        };

        Ok(Observation {
            date,
            province_name: raw.province_name,
            station_name: raw.station_name,
            tavg: measurement(raw.tavg, "Tavg")?,
            tn: measurement(raw.tn, "Tn")?,
            tx: measurement(raw.tx, "Tx")?,
            rh_avg: measurement(raw.rh_avg, "RH_avg")?,
            rr: measurement(raw.rr, "RR")?,
            ss: measurement(raw.ss, "ss")?,
        })
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "date,province_name,station_name,Tn,Tx,Tavg,RH_avg,RR,ss";

    fn read(csv: &str) -> LoadResult<Vec<Observation>> {
        ObservationReader::new().read_from_reader(csv.as_bytes(), "inline")
    }

    #[test]
    fn test_read_basic_rows() {
        let csv = format!(
            "{}\n\
             2010-01-01,Aceh,Stasiun Meteorologi Maimun Saleh,21.4,30.2,26.3,84,0.0,5.5\n\
             2010-01-02,Aceh,Stasiun Meteorologi Maimun Saleh,22.0,29.8,25.9,88,12.4,2.1\n",
            HEADER
        );

        let observations = read(&csv).unwrap();
        assert_eq!(observations.len(), 2);

        let first = &observations[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2010, 1, 1).unwrap());
        assert_eq!(first.province_name, "Aceh");
        assert_eq!(first.station_name, "Stasiun Meteorologi Maimun Saleh");
        assert_eq!(first.tn, Some(21.4));
        assert_eq!(first.tx, Some(30.2));
        assert_eq!(first.tavg, Some(26.3));
        assert_eq!(first.rh_avg, Some(84.0));
        assert_eq!(first.rr, Some(0.0));
        assert_eq!(first.ss, Some(5.5));
    }

    #[test]
    fn test_missing_values_and_extra_columns() {
        let csv = "date,station_id,province_name,station_name,Tn,Tx,Tavg,RH_avg,RR,ss,ff_avg\n\
                   2010-01-01 00:00:00,96001,Aceh,Sabang,,31.0,NaN,NA,,7.0,3\n";

        let observations = read(csv).unwrap();
        let obs = &observations[0];
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2010, 1, 1).unwrap());
        assert_eq!(obs.tn, None);
        assert_eq!(obs.tx, Some(31.0));
        assert_eq!(obs.tavg, None);
        assert_eq!(obs.rh_avg, None);
        assert_eq!(obs.rr, None);
        assert_eq!(obs.ss, Some(7.0));
    }

    #[test]
    fn test_absent_measurement_column_loads_as_missing() {
        let csv = "date,province_name,station_name,Tavg\n2010-01-01,Aceh,Sabang,27.0\n";

        let observations = read(csv).unwrap();
        assert_eq!(observations[0].tavg, Some(27.0));
        assert_eq!(observations[0].rr, None);
    }

    #[test]
    fn test_malformed_number_reports_line() {
        let csv = format!(
            "{}\n\
             2010-01-01,Aceh,Sabang,21.4,30.2,26.3,84,0.0,5.5\n\
             2010-01-02,Aceh,Sabang,21.4,30.2,warm,84,0.0,5.5\n",
            HEADER
        );

        match read(&csv) {
            Err(DataLoadError::InvalidRecord { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("Tavg"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let csv = format!("{}\nnot-a-date,Aceh,Sabang,1,2,3,4,5,6\n", HEADER);
        assert!(matches!(
            read(&csv),
            Err(DataLoadError::InvalidRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let csv = format!("{}\n", HEADER);
        assert!(matches!(read(&csv), Err(DataLoadError::Empty { .. })));
    }

    #[test]
    fn test_strict_validation() {
        let csv = format!("{}\n2010-01-01,Aceh,Sabang,21.4,30.2,26.3,140,0.0,5.5\n", HEADER);

        assert!(read(&csv).is_ok());

        let strict = ObservationReader::new().with_strict_validation(true);
        assert!(matches!(
            strict.read_from_reader(csv.as_bytes(), "inline"),
            Err(DataLoadError::Validation { line: 2, .. })
        ));
    }

    #[test]
    fn test_read_path() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(temp_file, "2019-07-14,Bali,Ngurah Rai,24.0,31.0,27.5,78,0,8.2")?;

        let reader = ObservationReader::new();
        let source = DataSource::Path(temp_file.path().to_path_buf());
        let observations = reader.read_source(&source)?;

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].province_name, "Bali");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let reader = ObservationReader::new();
        let result = reader.read_path(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(DataLoadError::Io { .. })));
    }
}
