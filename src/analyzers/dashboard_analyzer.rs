use crate::analyzers::views::{DashboardViews, RankedProvince, ScalarMetrics, SeriesPoint};
use crate::dataset::Dataset;
use crate::models::{DashboardFilter, Observation};
use crate::utils::constants::DEFAULT_RANKING_SIZE;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Running sum/count that skips missing values
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

fn column_mean<'a, F>(records: &[&'a Observation], value: F) -> Option<f64>
where
    F: Fn(&'a Observation) -> Option<f64>,
{
    let mut acc = MeanAccumulator::default();
    for record in records {
        acc.push(value(*record));
    }
    acc.mean()
}

/// Mean of `value` per distinct `key`, ordered by key.
fn grouped_mean<'a, K, KF, VF>(
    records: &[&'a Observation],
    key: KF,
    value: VF,
) -> Vec<SeriesPoint<K>>
where
    K: Ord,
    KF: Fn(&'a Observation) -> K,
    VF: Fn(&'a Observation) -> Option<f64>,
{
    let mut groups: BTreeMap<K, MeanAccumulator> = BTreeMap::new();
    for record in records {
        groups.entry(key(*record)).or_default().push(value(*record));
    }

    groups
        .into_iter()
        .map(|(k, acc)| SeriesPoint::new(k, acc.mean()))
        .collect()
}

pub struct DashboardAnalyzer {
    ranking_size: usize,
}

impl DashboardAnalyzer {
    pub fn new() -> Self {
        Self {
            ranking_size: DEFAULT_RANKING_SIZE,
        }
    }

    pub fn with_ranking_size(mut self, ranking_size: usize) -> Self {
        self.ranking_size = ranking_size;
        self
    }

    /// Filter the dataset and compute every dashboard view
    pub fn analyze(&self, dataset: &Dataset, filter: &DashboardFilter) -> DashboardViews {
        let subset = dataset.filter(filter);
        debug!(
            total = dataset.len(),
            matched = subset.len(),
            "Applied dashboard filter"
        );
        self.analyze_subset(filter, &subset)
    }

    /// Compute the views over an already-filtered subset
    pub fn analyze_subset(
        &self,
        filter: &DashboardFilter,
        subset: &[&Observation],
    ) -> DashboardViews {
        let metrics = ScalarMetrics {
            avg_temperature: column_mean(subset, |o| o.tavg),
            avg_humidity: column_mean(subset, |o| o.rh_avg),
            avg_rainfall: column_mean(subset, |o| o.rr),
            avg_sunshine: column_mean(subset, |o| o.ss),
        };

        let province_means = grouped_mean(subset, |o| o.province_name.as_str(), |o| o.tavg);
        let (hottest_provinces, coolest_provinces) = self.rank_provinces(&province_means);

        DashboardViews {
            filter: filter.clone(),
            record_count: subset.len(),
            metrics,
            monthly_temperature: grouped_mean(subset, Observation::month, |o| o.tavg),
            annual_temperature: grouped_mean(subset, Observation::year, |o| o.tavg),
            hottest_provinces,
            coolest_provinces,
            monthly_rainfall: grouped_mean(subset, Observation::month, |o| o.rr),
            annual_rainfall: grouped_mean(subset, Observation::year, |o| o.rr),
            daily_min_temperature: grouped_mean(subset, |o| o.date, |o| o.tn),
            daily_max_temperature: grouped_mean(subset, |o| o.date, |o| o.tx),
        }
    }

    /// Hottest-first and coolest-first province lists.
    ///
    /// Provinces without any `Tavg` are left out. Equal means fall back to
    /// province name order in both lists.
    fn rank_provinces(
        &self,
        province_means: &[SeriesPoint<&str>],
    ) -> (Vec<RankedProvince>, Vec<RankedProvince>) {
        let mut ranked: Vec<RankedProvince> = province_means
            .iter()
            .filter_map(|point| {
                point.value.map(|mean_tavg| RankedProvince {
                    province: point.key.to_string(),
                    mean_tavg,
                })
            })
            .collect();

        ranked.sort_by(Self::by_mean_then_name);
        let coolest: Vec<RankedProvince> =
            ranked.iter().take(self.ranking_size).cloned().collect();

        ranked.sort_by(|a, b| {
            b.mean_tavg
                .total_cmp(&a.mean_tavg)
                .then_with(|| a.province.cmp(&b.province))
        });
        ranked.truncate(self.ranking_size);

        (ranked, coolest)
    }

    fn by_mean_then_name(a: &RankedProvince, b: &RankedProvince) -> Ordering {
        a.mean_tavg
            .total_cmp(&b.mean_tavg)
            .then_with(|| a.province.cmp(&b.province))
    }
}

impl Default for DashboardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
