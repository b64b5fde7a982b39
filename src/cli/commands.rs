use crate::analyzers::{DashboardAnalyzer, DashboardViews};
use crate::cli::args::{Cli, Commands, FilterArgs, SourceArgs};
use crate::dataset::Dataset;
use crate::error::{DashboardError, Result};
use crate::logging::init_logging;
use crate::models::{DashboardFilter, DateRange};
use crate::readers::{DataSource, ObservationReader};
use crate::settings::DashboardSettings;
use crate::utils::dates::parse_date_arg;
use crate::utils::filename::generate_default_export_filename;
use crate::utils::progress::ProgressReporter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let settings = DashboardSettings::load(cli.config.as_deref())?;
    debug!(?settings, "Loaded settings");

    match cli.command {
        Commands::Summary { filter, brief } => {
            let views = build_views(&filter, &settings, cli.quiet)?;
            if brief {
                println!("{}", views.summary());
            } else {
                println!("{}", views.detailed_summary());
            }
        }

        Commands::Export {
            filter,
            output,
            pretty,
        } => {
            let views = build_views(&filter, &settings, cli.quiet)?;
            let output = output.unwrap_or_else(generate_default_export_filename);

            if output == Path::new("-") {
                let stdout = io::stdout();
                write_json(&views, stdout.lock(), pretty)?;
            } else {
                if let Some(parent) = output.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                write_json(&views, BufWriter::new(File::create(&output)?), pretty)?;
                info!(
                    path = %output.display(),
                    records = views.record_count,
                    "Wrote dashboard views"
                );
            }
        }

        Commands::Options { source } => {
            let dataset = load_dataset(&source, &settings, cli.quiet)?;
            println!("{}", options_summary(&dataset));
        }
    }

    Ok(())
}

/// Load the dataset and run the pipeline for one filter selection
pub fn build_views(
    args: &FilterArgs,
    settings: &DashboardSettings,
    quiet: bool,
) -> Result<DashboardViews> {
    let dataset = load_dataset(&args.source, settings, quiet)?;
    let filter = resolve_filter(args, &dataset)?;

    let analyzer =
        DashboardAnalyzer::new().with_ranking_size(args.top.unwrap_or(settings.ranking_size));
    Ok(analyzer.analyze(&dataset, &filter))
}

pub fn load_dataset(
    args: &SourceArgs,
    settings: &DashboardSettings,
    quiet: bool,
) -> Result<Dataset> {
    let source = DataSource::parse(args.source.as_deref().unwrap_or(&settings.source));
    let reader =
        ObservationReader::new().with_strict_validation(args.strict || settings.strict_validation);

    let progress = ProgressReporter::new_spinner(&format!("Loading {}...", source), quiet);
    match Dataset::load(&source, &reader) {
        Ok(dataset) => {
            progress.finish_with_message(&format!("Loaded {} observations", dataset.len()));
            Ok(dataset)
        }
        Err(e) => {
            progress.abandon();
            Err(e)
        }
    }
}

/// Turn the CLI selection into a filter, defaulting the date range to what
/// the dataset covers and tightening overlapping ranges to it.
pub fn resolve_filter(args: &FilterArgs, dataset: &Dataset) -> Result<DashboardFilter> {
    let bounds = dataset.date_bounds().ok_or_else(|| {
        DashboardError::InvalidArgument("dataset has no observations".to_string())
    })?;

    let start = match args.start.as_deref() {
        Some(raw) => parse_date_arg(raw)?,
        None => bounds.start,
    };
    let end = match args.end.as_deref() {
        Some(raw) => parse_date_arg(raw)?,
        None => bounds.end,
    };

    let date_range = dataset.clamp_range(DateRange::new(start, end));
    Ok(DashboardFilter::new(date_range)
        .with_province(args.province.clone())
        .with_station(args.station.clone()))
}

pub fn write_json<W: Write>(views: &DashboardViews, mut writer: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, views)?;
    } else {
        serde_json::to_writer(&mut writer, views)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn options_summary(dataset: &Dataset) -> String {
    let date_range = dataset
        .date_bounds()
        .map(|b| format!("{} to {}", b.start, b.end))
        .unwrap_or_else(|| "no observations".to_string());

    let provinces = dataset.provinces();
    let stations = dataset.stations();

    let mut out = format!(
        "Records: {}\nDate Range: {}\n\nProvinces ({}):",
        dataset.len(),
        date_range,
        provinces.len()
    );
    for province in &provinces {
        out.push_str("\n  ");
        out.push_str(province);
    }
    out.push_str(&format!("\n\nStations ({}):", stations.len()));
    for station in &stations {
        out.push_str("\n  ");
        out.push_str(station);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Observation::new(date(2010, 1, 1), "Aceh", "Sabang").with_temperatures(22.0, 27.0, 31.0),
            Observation::new(date(2020, 12, 31), "Bali", "Ngurah Rai")
                .with_temperatures(24.0, 28.0, 32.0),
        ])
    }

    #[test]
    fn test_resolve_filter_defaults_to_bounds() {
        let filter = resolve_filter(&FilterArgs::default(), &dataset()).unwrap();
        assert_eq!(filter.date_range, DateRange::new(date(2010, 1, 1), date(2020, 12, 31)));
        assert_eq!(filter.province, None);
        assert_eq!(filter.station, None);
    }

    #[test]
    fn test_resolve_filter_clamps_and_keeps_selection() {
        let args = FilterArgs {
            start: Some("1990-01-01".to_string()),
            end: Some("2015-06-30".to_string()),
            province: Some("Bali".to_string()),
            ..FilterArgs::default()
        };

        let filter = resolve_filter(&args, &dataset()).unwrap();
        assert_eq!(filter.date_range, DateRange::new(date(2010, 1, 1), date(2015, 6, 30)));
        assert_eq!(filter.province.as_deref(), Some("Bali"));
    }

    #[test]
    fn test_range_outside_data_matches_nothing() {
        let dataset = dataset();
        let args = FilterArgs {
            start: Some("2030-01-01".to_string()),
            end: Some("2030-12-31".to_string()),
            ..FilterArgs::default()
        };

        let filter = resolve_filter(&args, &dataset).unwrap();
        assert_eq!(filter.date_range, DateRange::new(date(2030, 1, 1), date(2030, 12, 31)));

        let views = DashboardAnalyzer::new().analyze(&dataset, &filter);
        assert_eq!(views.record_count, 0);
        assert!(!views.metrics.has_data());
        assert!(views.summary().contains("Average Temperature: no data"));
    }

    #[test]
    fn test_resolve_filter_rejects_bad_dates() {
        let args = FilterArgs {
            start: Some("June 1st".to_string()),
            ..FilterArgs::default()
        };
        assert!(matches!(
            resolve_filter(&args, &dataset()),
            Err(DashboardError::DateParse(_))
        ));
    }

    #[test]
    fn test_write_json() {
        let dataset = dataset();
        let filter = resolve_filter(&FilterArgs::default(), &dataset).unwrap();
        let views = DashboardAnalyzer::new().analyze(&dataset, &filter);

        let mut buffer = Vec::new();
        write_json(&views, &mut buffer, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["metrics"]["avg_temperature"], 27.5);
        assert_eq!(value["hottest_provinces"][0]["province"], "Bali");
        assert_eq!(value["daily_min_temperature"][0]["key"], "2010-01-01");
        assert_eq!(value["filter"]["province"], serde_json::Value::Null);
    }

    #[test]
    fn test_options_summary() {
        let summary = options_summary(&dataset());
        assert!(summary.contains("Date Range: 2010-01-01 to 2020-12-31"));
        assert!(summary.contains("Provinces (2):\n  Aceh\n  Bali"));
        assert!(summary.contains("Stations (2):\n  Ngurah Rai\n  Sabang"));
    }
}
