use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Drive;

/// Conventional upper bound of every drive score.
pub const DRIVE_CEILING: f64 = 5.0;

/// One scalar per drive. Always fully populated; absent data reads as 0.
///
/// Serializes as an object keyed by drive name. Deserializing is lenient:
/// missing drives, non-numeric values and unknown keys all read as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "BTreeMap<Drive, f64>")]
pub struct DriveVector {
    values: [f64; Drive::COUNT],
}

impl DriveVector {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn splat(value: f64) -> Self {
        Self {
            values: [value; Drive::COUNT],
        }
    }

    pub fn from_fn(mut f: impl FnMut(Drive) -> f64) -> Self {
        let mut out = Self::zero();
        for drive in Drive::ALL {
            out.values[drive.index()] = f(drive);
        }
        out
    }

    pub fn get(&self, drive: Drive) -> f64 {
        self.values[drive.index()]
    }

    pub fn set(&mut self, drive: Drive, value: f64) {
        self.values[drive.index()] = value;
    }

    pub fn with(mut self, drive: Drive, value: f64) -> Self {
        self.set(drive, value);
        self
    }

    pub fn values(&self) -> &[f64; Drive::COUNT] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Drive, f64)> + '_ {
        Drive::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    pub fn map(&self, mut f: impl FnMut(Drive, f64) -> f64) -> Self {
        Self::from_fn(|d| f(d, self.get(d)))
    }

    pub fn zip_map(&self, other: &Self, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Self::from_fn(|d| f(self.get(d), other.get(d)))
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Drive holding the largest value; the earliest drive wins ties.
    pub fn argmax(&self) -> Drive {
        let mut best = Drive::Exploration;
        for (drive, value) in self.iter() {
            if value > self.get(best) {
                best = drive;
            }
        }
        best
    }

    pub fn clamped(&self, lo: f64, hi: f64) -> Self {
        self.map(|_, v| clamp(v, lo, hi))
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

impl Index<Drive> for DriveVector {
    type Output = f64;

    fn index(&self, drive: Drive) -> &f64 {
        &self.values[drive.index()]
    }
}

impl IndexMut<Drive> for DriveVector {
    fn index_mut(&mut self, drive: Drive) -> &mut f64 {
        &mut self.values[drive.index()]
    }
}

impl From<BTreeMap<Drive, f64>> for DriveVector {
    fn from(map: BTreeMap<Drive, f64>) -> Self {
        Self::from_fn(|d| {
            let v = map.get(&d).copied().unwrap_or(0.0);
            if v.is_finite() { v } else { 0.0 }
        })
    }
}

impl From<Map<String, Value>> for DriveVector {
    fn from(record: Map<String, Value>) -> Self {
        let mut out = Self::zero();
        for (key, value) in &record {
            match key.parse::<Drive>() {
                Ok(drive) => out.set(drive, lenient_f64(value)),
                Err(_) => trace!("ignoring non-drive key {key:?}"),
            }
        }
        out
    }
}

impl From<DriveVector> for BTreeMap<Drive, f64> {
    fn from(vector: DriveVector) -> Self {
        vector.iter().collect()
    }
}

impl FromIterator<(Drive, f64)> for DriveVector {
    fn from_iter<I: IntoIterator<Item = (Drive, f64)>>(iter: I) -> Self {
        let mut out = Self::zero();
        for (drive, value) in iter {
            out.set(drive, value);
        }
        out
    }
}

/// Numbers and numeric strings parse; anything else, or a non-finite result, is 0.
pub(crate) fn lenient_f64(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if raw.is_finite() { raw } else { 0.0 }
}

/// NaN degrades to `lo`.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

pub fn clamp01(x: f64) -> f64 {
    clamp(x, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{Drive, DriveVector, clamp, clamp01};

    #[test]
    fn zero_is_fully_populated() {
        let v = DriveVector::zero();
        assert_eq!(v.iter().count(), Drive::COUNT);
        assert!(v.is_zero());
    }

    #[test]
    fn set_get_and_index_agree() {
        let mut v = DriveVector::zero();
        v.set(Drive::Care, 4.5);
        v[Drive::Value] = 2.0;
        assert_eq!(v.get(Drive::Care), 4.5);
        assert_eq!(v[Drive::Value], 2.0);
        assert_eq!(v.sum(), 6.5);
        assert_eq!(v.max_value(), 4.5);
        assert_eq!(v.argmax(), Drive::Care);
    }

    #[test]
    fn clamp_handles_nan_and_bounds() {
        assert_eq!(clamp(f64::NAN, 0.0, 5.0), 0.0);
        assert_eq!(clamp(7.0, 0.0, 5.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 5.0), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(3.0), 1.0);
    }

    #[test]
    fn partial_map_fills_missing_drives_with_zero() {
        let mut map = BTreeMap::new();
        map.insert(Drive::Dominance, 3.0);
        map.insert(Drive::Pleasure, f64::NAN);
        let v = DriveVector::from(map);
        assert_eq!(v[Drive::Dominance], 3.0);
        assert_eq!(v[Drive::Pleasure], 0.0);
        assert_eq!(v[Drive::Exploration], 0.0);
    }

    #[test]
    fn serializes_as_named_object() {
        let v = DriveVector::zero().with(Drive::Exploration, 4.0);
        let json = serde_json::to_value(v).expect("ser");
        assert_eq!(json["Exploration"], 4.0);
        assert_eq!(json["Value"], 0.0);

        let parsed: DriveVector =
            serde_json::from_str(r#"{"care": 3, "Achievement": 5}"#).expect("de");
        assert_eq!(parsed[Drive::Care], 3.0);
        assert_eq!(parsed[Drive::Achievement], 5.0);
        assert_eq!(parsed[Drive::Affiliation], 0.0);
    }

    #[test]
    fn non_numeric_demands_read_as_zero() {
        let parsed: DriveVector = serde_json::from_str(
            r#"{"Care": null, "Value": " 4 ", "Bogus": 2, "dominance": 3, "Pleasure": "high", "Exploration": [1]}"#,
        )
        .expect("lenient");
        assert_eq!(parsed[Drive::Care], 0.0);
        assert_eq!(parsed[Drive::Value], 4.0);
        assert_eq!(parsed[Drive::Dominance], 3.0);
        assert_eq!(parsed[Drive::Pleasure], 0.0);
        assert_eq!(parsed[Drive::Exploration], 0.0);
        assert_eq!(parsed.sum(), 7.0);
    }
}
