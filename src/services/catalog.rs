use crate::domain::models::{Ward, ZoneSummary};
use crate::error::AqiError;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// Ward reference data, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct WardCatalog {
    wards: Vec<Ward>,
}

impl WardCatalog {
    pub fn load(path: &Path) -> Result<Self, AqiError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| AqiError::Catalog(format!("{}: {}", path.display(), e)))?;
        let mut wards = Vec::new();
        for row in reader.deserialize::<Ward>() {
            let ward = row.map_err(|e| AqiError::Catalog(format!("{}: {}", path.display(), e)))?;
            wards.push(ward);
        }
        let catalog = Self::from_wards(wards)?;
        tracing::debug!(
            path = %path.display(),
            wards = catalog.wards.len(),
            "loaded ward catalog"
        );
        Ok(catalog)
    }

    /// Builds a catalog from rows. Zone names that differ only in ASCII case
    /// take the spelling of their first appearance.
    pub fn from_wards(mut wards: Vec<Ward>) -> Result<Self, AqiError> {
        let mut seen = HashSet::new();
        let mut spellings: Vec<String> = Vec::new();
        for w in &mut wards {
            if !seen.insert(w.ward_no) {
                return Err(AqiError::Catalog(format!("duplicate ward_no {}", w.ward_no)));
            }
            match spellings.iter().find(|z| z.eq_ignore_ascii_case(&w.zone)) {
                Some(zone) => w.zone.clone_from(zone),
                None => spellings.push(w.zone.clone()),
            }
        }
        Ok(Self { wards })
    }

    pub fn wards(&self) -> &[Ward] {
        &self.wards
    }

    pub fn ward_numbers(&self) -> BTreeSet<u32> {
        self.wards.iter().map(|w| w.ward_no).collect()
    }

    pub fn get(&self, ward_no: u32) -> Option<&Ward> {
        self.wards.iter().find(|w| w.ward_no == ward_no)
    }

    /// Zones in order of first appearance in the catalog.
    pub fn zones(&self) -> Vec<ZoneSummary> {
        let mut out: Vec<ZoneSummary> = Vec::new();
        for w in &self.wards {
            match out.iter_mut().find(|z| z.zone == w.zone) {
                Some(z) => z.ward_count += 1,
                None => out.push(ZoneSummary {
                    zone: w.zone.clone(),
                    ward_count: 1,
                }),
            }
        }
        out
    }

    pub fn wards_in_zone<'a>(&'a self, zone: &'a str) -> impl Iterator<Item = &'a Ward> + 'a {
        self.wards
            .iter()
            .filter(move |w| w.zone.eq_ignore_ascii_case(zone))
    }

    /// Resolves a ward from a number or a (case-insensitive) name, optionally
    /// restricted to one zone.
    pub fn resolve(&self, selector: &str, zone: Option<&str>) -> Result<&Ward, AqiError> {
        let selector = selector.trim();
        let in_scope = |w: &&Ward| zone.map(|z| w.zone.eq_ignore_ascii_case(z)).unwrap_or(true);

        if let Ok(no) = selector.parse::<u32>() {
            if let Some(w) = self.wards.iter().filter(in_scope).find(|w| w.ward_no == no) {
                return Ok(w);
            }
        }

        let matches: Vec<&Ward> = self
            .wards
            .iter()
            .filter(in_scope)
            .filter(|w| w.ward_name.eq_ignore_ascii_case(selector))
            .collect();
        match matches.as_slice() {
            [] => Err(AqiError::NotFound(match zone {
                Some(z) => format!("{} in zone {}", selector, z),
                None => selector.to_string(),
            })),
            [one] => Ok(*one),
            _ => Err(AqiError::AmbiguousWard(selector.to_string())),
        }
    }
}
