use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One city row from the remote directory.
///
/// Field names follow the directory endpoint's JSON so records deserialize
/// straight out of a page body. Records are append-only: the loader never
/// mutates one after it has been received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    pub recordid: String,
    pub name: String,
    pub cou_name_en: String,
    pub timezone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Name,
    Country,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Country => "country",
        }
    }

    pub const fn all() -> &'static [SortColumn] {
        &[SortColumn::Name, SortColumn::Country]
    }

    /// The string value this column sorts a record by.
    pub fn key<'a>(&self, city: &'a CityRecord) -> &'a str {
        match self {
            SortColumn::Name => &city.name,
            SortColumn::Country => &city.cou_name_en,
        }
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SortColumn {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "name" | "city" => Ok(SortColumn::Name),
            "country" => Ok(SortColumn::Country),
            _ => Err(anyhow::anyhow!(
                "Unknown sort column '{value}'. Supported columns: name, country."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The single active sort order of the directory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self { column: SortColumn::Name, direction: SortDirection::Ascending }
    }
}

impl SortSpec {
    /// Activate a column: a second activation of the current ascending
    /// column flips to descending, anything else resets to ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        let direction = if self.column == column && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };

        *self = Self { column, direction };
    }
}

/// One time-stamped observation from the forecast series, at the fixed
/// 3-hour sampling interval of the remote endpoint.
///
/// Temperatures are kept in Kelvin as received; display conversion lives in
/// [`crate::units`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Raw `dt_txt` string as sent by the endpoint.
    pub dt_txt: String,
    pub timestamp: NaiveDateTime,
    pub temp_k: f64,
    pub feels_like_k: f64,
    pub temp_min_k: f64,
    pub temp_max_k: f64,
    pub pressure_hpa: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub description: String,
    pub icon: String,
}
