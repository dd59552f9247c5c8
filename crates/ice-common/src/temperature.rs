//! Daily regional temperature and ice records.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::region::RegionId;

/// Read a measurement cell. Empty, `NaN` and non-numeric cells are missing.
fn measurement<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCell {
        Number(f64),
        Text(String),
    }

    let value = match Option::<RawCell>::deserialize(deserializer)? {
        None => None,
        Some(RawCell::Number(v)) => Some(v),
        Some(RawCell::Text(s)) => s.trim().parse::<f64>().ok(),
    };
    Ok(value.filter(|v| v.is_finite()))
}

/// One observation (or projection) for one region on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    #[serde(rename = "RegionID")]
    pub region: RegionId,

    #[serde(rename = "Year")]
    pub year: i32,

    /// Day of year, 1..=366.
    #[serde(rename = "Yearday")]
    pub yearday: u16,

    /// Sea-surface temperature (°C).
    #[serde(rename = "SST", default, deserialize_with = "measurement")]
    pub sst: Option<f64>,

    /// Bottom temperature (°C).
    #[serde(rename = "BOT", default, deserialize_with = "measurement")]
    pub bot: Option<f64>,

    /// Ice concentration fraction.
    #[serde(rename = "ICE", default, deserialize_with = "measurement")]
    pub ice: Option<f64>,
}

impl TemperatureRecord {
    pub fn new(
        region: RegionId,
        year: i32,
        yearday: u16,
        sst: Option<f64>,
        bot: Option<f64>,
        ice: Option<f64>,
    ) -> Self {
        Self {
            region,
            year,
            yearday,
            sst,
            bot,
            ice,
        }
    }

    pub fn value(&self, variable: Variable) -> Option<f64> {
        match variable {
            Variable::SeaSurface => self.sst,
            Variable::Bottom => self.bot,
            Variable::Ice => self.ice,
        }
    }
}

/// Measured quantity of a temperature record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    SeaSurface,
    Bottom,
    Ice,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Variable::SeaSurface, Variable::Bottom, Variable::Ice];

    /// Column name in the input tables.
    pub fn column(&self) -> &'static str {
        match self {
            Variable::SeaSurface => "SST",
            Variable::Bottom => "BOT",
            Variable::Ice => "ICE",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// All records of one input file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureTable {
    pub records: Vec<TemperatureRecord>,
}

impl TemperatureTable {
    pub fn new(records: Vec<TemperatureRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose region matches `region`, in file order.
    pub fn for_region<'a>(
        &'a self,
        region: &'a RegionId,
    ) -> impl Iterator<Item = &'a TemperatureRecord> + 'a {
        self.records.iter().filter(move |r| &r.region == region)
    }
}
