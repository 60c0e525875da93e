use anyhow::{Context, Result};

use crate::storage::reading::WeatherReading;

const BUILTIN_FIXTURE: &str = include_str!("../../fixtures/weather.json");

/// Which stored reading a request refers to.
///
/// Coordinates compare with plain `f64` equality; no rounding or tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordKey {
    Station(i64),
    Coordinate { lat: f64, lon: f64 },
}

impl RecordKey {
    pub fn matches(&self, reading: &WeatherReading) -> bool {
        match *self {
            RecordKey::Station(id) => reading.id == id,
            RecordKey::Coordinate { lat, lon } => reading.coord.lat == lat && reading.coord.lon == lon,
        }
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKey::Station(id) => write!(f, "station {}", id),
            RecordKey::Coordinate { lat, lon } => write!(f, "({}, {})", lat, lon),
        }
    }
}

/// Insertion-ordered readings. Every lookup is a linear scan that stops at
/// the first match; duplicate identities are allowed.
#[derive(Debug, Default)]
pub struct WeatherStore {
    readings: Vec<WeatherReading>,
}

impl WeatherStore {
    pub fn new() -> Self {
        Self { readings: Vec::new() }
    }

    /// Store seeded from the fixture compiled into the binary.
    pub fn seeded() -> Result<Self> {
        Self::from_fixture(BUILTIN_FIXTURE)
    }

    /// Build a store from fixture text: a JSON array of readings.
    pub fn from_fixture(json: &str) -> Result<Self> {
        let readings: Vec<WeatherReading> =
            serde_json::from_str(json).context("fixture must be a JSON array of weather readings")?;
        Ok(Self { readings })
    }

    pub fn append(&mut self, reading: WeatherReading) {
        self.readings.push(reading);
    }

    fn position(&self, key: &RecordKey) -> Option<usize> {
        self.readings.iter().position(|r| key.matches(r))
    }

    pub fn find(&self, key: &RecordKey) -> Option<&WeatherReading> {
        self.readings.iter().find(|r| key.matches(r))
    }

    pub fn find_by_id(&self, id: i64) -> Option<&WeatherReading> {
        self.find(&RecordKey::Station(id))
    }

    pub fn find_by_coordinate(&self, lat: f64, lon: f64) -> Option<&WeatherReading> {
        self.find(&RecordKey::Coordinate { lat, lon })
    }

    /// Swap the first match for `reading` wholesale. Returns false and leaves
    /// the store untouched when nothing matches.
    pub fn replace(&mut self, key: &RecordKey, reading: WeatherReading) -> bool {
        match self.position(key) {
            Some(idx) => {
                self.readings[idx] = reading;
                true
            }
            None => false,
        }
    }

    pub fn replace_by_id(&mut self, id: i64, reading: WeatherReading) -> bool {
        self.replace(&RecordKey::Station(id), reading)
    }

    pub fn replace_by_coordinate(&mut self, lat: f64, lon: f64, reading: WeatherReading) -> bool {
        self.replace(&RecordKey::Coordinate { lat, lon }, reading)
    }

    /// Drop the first match, keeping the order of everything else.
    pub fn remove(&mut self, key: &RecordKey) -> bool {
        match self.position(key) {
            Some(idx) => {
                self.readings.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn remove_by_id(&mut self, id: i64) -> bool {
        self.remove(&RecordKey::Station(id))
    }

    pub fn remove_by_coordinate(&mut self, lat: f64, lon: f64) -> bool {
        self.remove(&RecordKey::Coordinate { lat, lon })
    }

    /// Snapshot of every reading in insertion order.
    pub fn all(&self) -> Vec<WeatherReading> {
        self.readings.clone()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
