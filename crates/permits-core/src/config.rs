use crate::error::{PermitsError, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File picked up from the working directory when no config is named explicitly.
pub const CONFIG_FILE_NAME: &str = "permits.yaml";

pub const DEFAULT_ENCODING: &str = "windows-1256";
pub const DEFAULT_OUTPUT: &str = "Permissions.xlsx";

/// A shift never spans more than one day.
pub const MAX_SHIFT_MINUTES: i64 = 24 * 60;

// ---------------------------------------------------------------------------
// Workday
// ---------------------------------------------------------------------------

/// Expected attendance window for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workday {
    /// Arrivals after this time are late.
    #[serde(default = "default_start", with = "hh_mm")]
    pub start: NaiveTime,
    /// Hard ceiling for the expected exit.
    #[serde(default = "default_end", with = "hh_mm")]
    pub end: NaiveTime,
    /// Shift length counted from the actual arrival.
    #[serde(default = "default_shift_minutes")]
    pub shift_minutes: i64,
}

fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

fn default_end() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default()
}

fn default_shift_minutes() -> i64 {
    8 * 60
}

impl Default for Workday {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            shift_minutes: default_shift_minutes(),
        }
    }
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
            .map_err(|_| D::Error::custom(format!("expected HH:MM, got '{raw}'")))
    }
}

// ---------------------------------------------------------------------------
// ColumnMap
// ---------------------------------------------------------------------------

/// Header names of the three columns read from the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "default_date_column")]
    pub date: String,
    #[serde(default = "default_in_column")]
    pub actual_in: String,
    #[serde(default = "default_out_column")]
    pub actual_out: String,
}

fn default_date_column() -> String {
    "تاريخ الحركة ميلادي".to_string()
}

fn default_in_column() -> String {
    "وقت الدخول الفعلي".to_string()
}

fn default_out_column() -> String {
    "وقت الخروج الفعلي".to_string()
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            date: default_date_column(),
            actual_in: default_in_column(),
            actual_out: default_out_column(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workday: Workday,
    #[serde(default)]
    pub columns: ColumnMap,
    /// WHATWG encoding label of the input file.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Spreadsheet written when exporting.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workday: Workday::default(),
            columns: ColumnMap::default(),
            encoding: default_encoding(),
            output: default_output(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PermitsError::MissingFile(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `explicit` if given, else `dir/permits.yaml` when present, else defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let implicit = dir.join(CONFIG_FILE_NAME);
        if implicit.is_file() {
            tracing::debug!(path = %implicit.display(), "loading config");
            return Self::load(&implicit);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.workday;
        if w.start >= w.end {
            return Err(PermitsError::InvalidWorkday(format!(
                "start {} must be before end {}",
                w.start.format("%H:%M"),
                w.end.format("%H:%M")
            )));
        }
        if w.shift_minutes <= 0 || w.shift_minutes > MAX_SHIFT_MINUTES {
            return Err(PermitsError::InvalidWorkday(format!(
                "shift_minutes must be between 1 and {MAX_SHIFT_MINUTES}, got {}",
                w.shift_minutes
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
