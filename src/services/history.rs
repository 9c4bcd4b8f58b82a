use crate::domain::constants::{DEFAULT_SEED, WINDOW_LEN};
use crate::domain::models::HistoryRecord;
use crate::error::AqiError;
use crate::services::storage::HistoryStorage;
use std::collections::{BTreeMap, BTreeSet};

/// Per-ward rolling AQI windows backed by a [`HistoryStorage`].
///
/// The store owns every record. `append` is the only mutation and flushes the
/// whole store after each shift.
pub struct HistoryStore<S: HistoryStorage> {
    storage: S,
    records: BTreeMap<u32, HistoryRecord>,
    seeded: usize,
    rebuilt: bool,
}

impl<S: HistoryStorage> HistoryStore<S> {
    /// Loads persisted history and seeds every catalog ward that has none.
    ///
    /// A persisted source that fails validation is discarded and rebuilt once
    /// from the default seed for every ward. Runs under the storage lock.
    pub fn initialize(storage: S, wards: &BTreeSet<u32>) -> Result<Self, AqiError> {
        let (records, seeded, rebuilt) = storage.exclusive(|| load_and_seed(&storage, wards))??;
        Ok(Self {
            storage,
            records,
            seeded,
            rebuilt,
        })
    }

    pub fn get(&self, ward_no: u32) -> Result<&HistoryRecord, AqiError> {
        self.records
            .get(&ward_no)
            .ok_or_else(|| AqiError::NotFound(ward_no.to_string()))
    }

    /// Shifts the ward's window left by one day and stores `value` as day 5.
    ///
    /// Under the storage lock the window is re-read from storage first, so
    /// appends from other store handles on the same source are kept. On a
    /// write failure the in-memory window keeps the new value and the error is
    /// returned as `AqiError::Persistence`.
    pub fn append(&mut self, ward_no: u32, value: f64) -> Result<HistoryRecord, AqiError> {
        if !value.is_finite() || value < 0.0 {
            return Err(AqiError::InvalidReading(value.to_string()));
        }
        if !self.records.contains_key(&ward_no) {
            return Err(AqiError::NotFound(ward_no.to_string()));
        }

        let storage = &self.storage;
        let records = &mut self.records;
        let locked = storage.exclusive(|| {
            refresh_from(storage, records);
            let updated = shift_in(records, ward_no, value)?;
            let rows: Vec<HistoryRecord> = records.values().cloned().collect();
            storage.save(&rows).map(|()| updated)
        });
        let updated = match locked {
            Ok(saved) => saved?,
            Err(e) => {
                shift_in(records, ward_no, value)?;
                return Err(e);
            }
        };

        tracing::debug!(ward_no, value, "appended reading");
        Ok(updated)
    }

    /// Re-reads persisted state without writing. Keeps the current view when
    /// the source is missing, unreadable or invalid.
    pub fn reload(&mut self) {
        match self.storage.load() {
            Ok(Some(rows)) => {
                self.records = rows.into_iter().map(|r| (r.ward_no, r)).collect();
            }
            Ok(None) => {
                tracing::warn!(location = %self.storage.location(), "history source is empty; keeping last view");
            }
            Err(e) => {
                tracing::warn!(location = %self.storage.location(), error = %e, "history reload failed; keeping last view");
            }
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn seeded(&self) -> usize {
        self.seeded
    }

    pub fn was_rebuilt(&self) -> bool {
        self.rebuilt
    }

    pub fn location(&self) -> String {
        self.storage.location()
    }

}

type Seeded = (BTreeMap<u32, HistoryRecord>, usize, bool);

fn load_and_seed<S: HistoryStorage>(
    storage: &S,
    wards: &BTreeSet<u32>,
) -> Result<Seeded, AqiError> {
    let (mut records, rebuilt): (BTreeMap<u32, HistoryRecord>, bool) = match storage.load() {
        Ok(Some(rows)) => (rows.into_iter().map(|r| (r.ward_no, r)).collect(), false),
        Ok(None) => (BTreeMap::new(), false),
        Err(AqiError::StorageCorrupt(reason)) => {
            tracing::warn!(
                location = %storage.location(),
                %reason,
                "history store failed validation; rebuilding from seed"
            );
            (BTreeMap::new(), true)
        }
        Err(e) => return Err(e),
    };

    let mut seeded = 0;
    for ward_no in wards {
        records.entry(*ward_no).or_insert_with(|| {
            seeded += 1;
            HistoryRecord::new(*ward_no, DEFAULT_SEED)
        });
    }

    if seeded > 0 || rebuilt {
        tracing::info!(seeded, rebuilt, "writing seeded history store");
        let rows: Vec<HistoryRecord> = records.values().cloned().collect();
        storage.save(&rows)?;
    }
    Ok((records, seeded, rebuilt))
}

/// Overlays the persisted rows on `records`. Wards only known in memory are
/// kept; an unreadable source leaves `records` as is.
fn refresh_from<S: HistoryStorage>(storage: &S, records: &mut BTreeMap<u32, HistoryRecord>) {
    match storage.load() {
        Ok(Some(rows)) => {
            for row in rows {
                records.insert(row.ward_no, row);
            }
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(location = %storage.location(), error = %e, "history source unreadable before append; writing current view");
        }
    }
}

fn shift_in(
    records: &mut BTreeMap<u32, HistoryRecord>,
    ward_no: u32,
    value: f64,
) -> Result<HistoryRecord, AqiError> {
    let record = records
        .get_mut(&ward_no)
        .ok_or_else(|| AqiError::NotFound(ward_no.to_string()))?;
    record.slots.rotate_left(1);
    record.slots[WINDOW_LEN - 1] = value;
    Ok(record.clone())
}
