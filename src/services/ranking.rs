use crate::cli::SortOrder;
use crate::domain::models::{HistoryRecord, RankingRow, ZoneRankingRow};
use crate::services::catalog::WardCatalog;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Sorted, derived rows. Recomputed per call, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<T> {
    rows: Vec<T>,
}

impl<T> Ranking<T> {
    pub fn top(&self, n: usize) -> &[T] {
        let rows = self.rows();
        &rows[..n.min(rows.len())]
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

fn by_average(a: f64, b: f64, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Desc => b.total_cmp(&a),
        SortOrder::Asc => a.total_cmp(&b),
    }
}

/// Ward averages over the full window. Wards missing from either the history
/// or the catalog are left out; equal averages fall back to `ward_no`.
pub fn rank_wards<'a>(
    records: impl IntoIterator<Item = &'a HistoryRecord>,
    catalog: &WardCatalog,
    order: SortOrder,
) -> Ranking<RankingRow> {
    let mut rows: Vec<RankingRow> = records
        .into_iter()
        .filter_map(|r| {
            let ward = catalog.get(r.ward_no)?;
            Some(RankingRow {
                ward_no: r.ward_no,
                ward_name: ward.ward_name.clone(),
                zone: ward.zone.clone(),
                avg_aqi: r.average(),
            })
        })
        .collect();
    rows.sort_by(|a, b| by_average(a.avg_aqi, b.avg_aqi, order).then_with(|| a.ward_no.cmp(&b.ward_no)));
    Ranking { rows }
}

/// Zone averages as the unweighted mean of ward averages; equal averages fall
/// back to the zone name.
pub fn rank_zones<'a>(
    records: impl IntoIterator<Item = &'a HistoryRecord>,
    catalog: &WardCatalog,
    order: SortOrder,
) -> Ranking<ZoneRankingRow> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in rank_wards(records, catalog, order).into_rows() {
        let entry = sums.entry(row.zone).or_insert((0.0, 0));
        entry.0 += row.avg_aqi;
        entry.1 += 1;
    }
    let mut rows: Vec<ZoneRankingRow> = sums
        .into_iter()
        .map(|(zone, (sum, count))| ZoneRankingRow {
            zone,
            avg_aqi: sum / count as f64,
            ward_count: count,
        })
        .collect();
    rows.sort_by(|a, b| by_average(a.avg_aqi, b.avg_aqi, order).then_with(|| a.zone.cmp(&b.zone)));
    Ranking { rows }
}
