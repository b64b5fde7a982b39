use crate::error::Result;
use crate::models::{DashboardFilter, DateRange, Observation};
use crate::readers::{DataSource, ObservationReader};
use std::collections::BTreeSet;
use tracing::warn;

/// Immutable observation table, loaded once and shared by reference.
#[derive(Debug, Clone)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn load(source: &DataSource, reader: &ObservationReader) -> Result<Self> {
        Ok(Self::new(reader.read_source(source)?))
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Earliest and latest observation date
    pub fn date_bounds(&self) -> Option<DateRange> {
        let min = self.observations.iter().map(|o| o.date).min()?;
        let max = self.observations.iter().map(|o| o.date).max()?;
        Some(DateRange::new(min, max))
    }

    /// Distinct province names, sorted
    pub fn provinces(&self) -> Vec<&str> {
        Self::distinct(self.observations.iter().map(|o| o.province_name.as_str()))
    }

    /// Distinct station names, sorted
    pub fn stations(&self) -> Vec<&str> {
        Self::distinct(self.observations.iter().map(|o| o.station_name.as_str()))
    }

    /// Tighten a requested range to the dataset's bounds.
    ///
    /// Only ranges that overlap the data are tightened. Disjoint and
    /// reversed ranges are returned as given so they still match nothing.
    pub fn clamp_range(&self, range: DateRange) -> DateRange {
        let Some(bounds) = self.date_bounds() else {
            return range;
        };
        if range.is_empty() || range.end < bounds.start || range.start > bounds.end {
            return range;
        }

        let clamped = DateRange::new(
            range.start.clamp(bounds.start, bounds.end),
            range.end.clamp(bounds.start, bounds.end),
        );
        if clamped != range {
            warn!(
                requested_start = %range.start,
                requested_end = %range.end,
                start = %clamped.start,
                end = %clamped.end,
                "Date range clamped to dataset bounds"
            );
        }
        clamped
    }

    pub fn filter(&self, filter: &DashboardFilter) -> Vec<&Observation> {
        filter.apply(&self.observations)
    }

    fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        names.collect::<BTreeSet<_>>().into_iter().collect()
    }
}
