use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Observation;

/// Closed date interval. `start > end` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// User-selected narrowing of the dataset.
///
/// `None` on a categorical field means "do not filter on this dimension".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardFilter {
    pub date_range: DateRange,
    pub province: Option<String>,
    pub station: Option<String>,
}

impl DashboardFilter {
    pub fn new(date_range: DateRange) -> Self {
        Self {
            date_range,
            province: None,
            station: None,
        }
    }

    pub fn with_province(mut self, province: Option<String>) -> Self {
        self.province = province;
        self
    }

    pub fn with_station(mut self, station: Option<String>) -> Self {
        self.station = station;
        self
    }

    /// Conjunction of the date, province and station predicates.
    pub fn matches(&self, observation: &Observation) -> bool {
        self.date_range.contains(observation.date)
            && self
                .province
                .as_deref()
                .map_or(true, |p| observation.province_name == p)
            && self
                .station
                .as_deref()
                .map_or(true, |s| observation.station_name == s)
    }

    pub fn apply<'a, I>(&self, observations: I) -> Vec<&'a Observation>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        observations
            .into_iter()
            .filter(|obs| self.matches(obs))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Observation> {
        vec![
            Observation::new(date(2010, 1, 1), "Aceh", "Station A"),
            Observation::new(date(2010, 1, 2), "Aceh", "Station B"),
            Observation::new(date(2010, 1, 3), "Bali", "Station C"),
            Observation::new(date(2010, 1, 4), "Bali", "Station C"),
        ]
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = DateRange::new(date(2010, 1, 2), date(2010, 1, 3));
        assert!(!range.contains(date(2010, 1, 1)));
        assert!(range.contains(date(2010, 1, 2)));
        assert!(range.contains(date(2010, 1, 3)));
        assert!(!range.contains(date(2010, 1, 4)));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::single_day(date(2010, 1, 3));
        assert!(range.contains(date(2010, 1, 3)));
        assert!(!range.is_empty());
    }

    #[test]
    fn test_reversed_range_matches_nothing() {
        let records = sample();
        let filter = DashboardFilter::new(DateRange::new(date(2010, 1, 4), date(2010, 1, 1)));
        assert!(filter.date_range.is_empty());
        assert!(filter.apply(&records).is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let records = sample();
        let filter = DashboardFilter::new(DateRange::new(date(2010, 1, 1), date(2010, 1, 3)))
            .with_province(Some("Bali".to_string()))
            .with_station(Some("Station C".to_string()));

        let subset = filter.apply(&records);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].date, date(2010, 1, 3));
    }

    #[test]
    fn test_unknown_station_yields_empty_subset() {
        let records = sample();
        let filter = DashboardFilter::new(DateRange::new(date(2010, 1, 1), date(2010, 1, 4)))
            .with_station(Some("Nowhere".to_string()));
        assert!(filter.apply(&records).is_empty());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let records = sample();
        let filter = DashboardFilter::new(DateRange::new(date(2010, 1, 2), date(2010, 1, 4)))
            .with_province(Some("Bali".to_string()));

        let once = filter.apply(&records);
        let twice = filter.apply(once.iter().copied());
        assert_eq!(once, twice);
    }
}
