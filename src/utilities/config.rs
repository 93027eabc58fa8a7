use std::fs;
use std::env;
use std::path::Path;
use std::collections::HashMap;

use log::info;

use super::errors::{AdmissionError, ConfigError};

pub const MIN_FLOORS: u8 = 5;
pub const MAX_FLOORS: u8 = 20;
pub const DOOR_DURATION_MS: u64 = 700;
/// Upper bound on a single end-to-end trip including the door cycle.
pub const MAX_TRIP_MS: u64 = 24 * 60 * 60 * 1000;
pub const DEFAULT_CONFIG_FILE: &str = "elevator.json";

const FLOORS_PARAM: &str = "floors";
const HEIGHT_PARAM: &str = "height";
const SPEED_PARAM: &str = "speed";
const ENTRANCE_PARAM: &str = "ent";
const CAPACITY_PARAM: &str = "capacity";
const CONFIG_PARAM: &str = "config";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default)]
pub struct ConfigFile {
    pub floors: Option<i64>,
    pub height: Option<f64>,
    pub speed: Option<f64>,
    pub ent: Option<i64>,
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorSettings {
    pub num_floors: u8,
    pub floor_height_m: f64,
    pub speed_mps: f64,
    pub entrance_s: u32,
    pub door_ms: u64,
    pub admission_capacity: Option<usize>,
}

impl Default for ElevatorSettings {
    fn default() -> Self {
        ElevatorSettings {
            num_floors: 10,
            floor_height_m: 3.0,
            speed_mps: 1.5,
            entrance_s: 3,
            door_ms: DOOR_DURATION_MS,
            admission_capacity: None,
        }
    }
}

impl ElevatorSettings {
    /// Whole milliseconds the car needs to pass one floor.
    pub fn floor_travel_ms(&self) -> u64 {
        (self.floor_height_m * 1000.0 / self.speed_mps) as u64
    }

    /// Top-to-bottom trip plus a full door cycle, `None` on overflow.
    pub fn longest_trip_ms(&self) -> Option<u64> {
        let floor_ms = self.floor_height_m * 1000.0 / self.speed_mps;
        if !floor_ms.is_finite() || floor_ms > MAX_TRIP_MS as f64 {
            return None;
        }
        (floor_ms as u64)
            .checked_mul(self.num_floors.saturating_sub(1) as u64)?
            .checked_add(self.door_ms.checked_mul(2)?)?
            .checked_add(self.entrance_ms())
    }

    pub fn entrance_ms(&self) -> u64 {
        self.entrance_s as u64 * 1000
    }

    pub fn validate_floor(&self, floor: i64) -> Result<u8, AdmissionError> {
        if floor > self.num_floors as i64 {
            Err(AdmissionError::FloorTooHigh(floor))
        } else if floor < 1 {
            Err(AdmissionError::FloorTooLow(floor))
        } else {
            Ok(floor as u8)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_floors < MIN_FLOORS || self.num_floors > MAX_FLOORS {
            return Err(ConfigError::FloorCountOutOfRange { min: MIN_FLOORS, max: MAX_FLOORS });
        }
        if !(self.floor_height_m > 0.0) {
            return Err(ConfigError::NotPositive("floor height"));
        }
        if !(self.speed_mps > 0.0) {
            return Err(ConfigError::NotPositive("elevator speed"));
        }
        if self.admission_capacity == Some(0) {
            return Err(ConfigError::ZeroCapacity);
        }
        match self.longest_trip_ms() {
            Some(ms) if ms <= MAX_TRIP_MS => Ok(()),
            _ => Err(ConfigError::TripTooLong { max_hours: MAX_TRIP_MS / 3_600_000 }),
        }
    }

    pub fn describe(&self) -> Vec<String> {
        let capacity = match self.admission_capacity {
            Some(n) => n.to_string(),
            None => String::from("unbounded"),
        };
        vec![
            format!("The number of floors: {}", self.num_floors),
            format!("The floor height : {} meters", self.floor_height_m),
            format!("The elevator speed: {} meters per second", self.speed_mps),
            format!("The open doors time period: {} seconds", self.entrance_s),
            format!("The command queue capacity: {}", capacity),
        ]
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        if let Some(floors) = file.floors {
            self.num_floors = floor_count(floors)?;
        }
        if let Some(height) = file.height {
            self.floor_height_m = height;
        }
        if let Some(speed) = file.speed {
            self.speed_mps = speed;
        }
        if let Some(ent) = file.ent {
            self.entrance_s = u32::try_from(ent).map_err(|_| ConfigError::InvalidFileValue {
                what: "open doors time period",
                value: ent.to_string(),
            })?;
        }
        if file.capacity.is_some() {
            self.admission_capacity = file.capacity;
        }
        Ok(())
    }
}

pub struct Config;

impl Config {
    /// Reads settings from the process arguments.
    pub fn get() -> Result<ElevatorSettings, ConfigError> {
        let args: Vec<String> = env::args().skip(1).collect();
        Self::from_args(&args)
    }

    pub fn from_args(args: &[String]) -> Result<ElevatorSettings, ConfigError> {
        let mut params = group_params(args)?;
        if params.contains_key("") {
            return Err(ConfigError::EmptyName);
        }

        let mut settings = ElevatorSettings::default();

        let explicit_file = take_single(&mut params, CONFIG_PARAM, "configuration file")?;
        match explicit_file {
            Some(path) => settings.apply_file(read_config_file(&path)?)?,
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    settings.apply_file(read_config_file(DEFAULT_CONFIG_FILE)?)?;
                }
            }
        }

        if let Some(value) = take_single(&mut params, FLOORS_PARAM, "floor numbers")? {
            settings.num_floors = floor_count(parse_number::<i64>(&value, "floor numbers")?)?;
        }
        if let Some(value) = take_single(&mut params, HEIGHT_PARAM, "floor height")? {
            settings.floor_height_m = parse_number(&value, "floor height")?;
        }
        if let Some(value) = take_single(&mut params, SPEED_PARAM, "elevator speed")? {
            settings.speed_mps = parse_number(&value, "elevator speed")?;
        }
        if let Some(value) = take_single(&mut params, ENTRANCE_PARAM, "open doors time period")? {
            settings.entrance_s = parse_number(&value, "open doors time period")?;
        }
        if let Some(value) = take_single(&mut params, CAPACITY_PARAM, "command queue capacity")? {
            settings.admission_capacity = Some(parse_number(&value, "command queue capacity")?);
        }

        let mut unknown: Vec<String> = params.into_keys().collect();
        unknown.sort();
        if let Some(name) = unknown.into_iter().next() {
            return Err(ConfigError::UnknownParameter(name));
        }

        settings.validate()?;
        info!("configuration accepted: {:?}", settings);
        Ok(settings)
    }
}

pub fn usage() -> Vec<String> {
    vec![
        String::from("Use the following paramters and values:"),
        format!("-floors n, where the n is the number of floors, greater or equals {} and not greater {}", MIN_FLOORS, MAX_FLOORS),
        String::from("-height h, where the h is the floor height in meters"),
        String::from("-speed s, where the s is the speed in meters pers second"),
        String::from("-ent time, where the time is the time of open doors time period in seconds"),
        String::from("-capacity n, where the n limits how many commands may wait in the queue (optional)"),
        format!("-config path, where the path is a JSON settings file (default {})", DEFAULT_CONFIG_FILE),
    ]
}

fn group_params(args: &[String]) -> Result<HashMap<String, Vec<String>>, ConfigError> {
    let mut params: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<String> = None;
    for arg in args {
        match arg.strip_prefix('-') {
            Some(name) => {
                params.insert(name.to_string(), Vec::new());
                current = Some(name.to_string());
            },
            None => match &current {
                Some(name) => params.entry(name.clone()).or_default().push(arg.clone()),
                None => return Err(ConfigError::ValueWithoutName(arg.clone())),
            },
        }
    }
    Ok(params)
}

fn take_single(
    params: &mut HashMap<String, Vec<String>>,
    key: &str,
    what: &'static str,
) -> Result<Option<String>, ConfigError> {
    match params.remove(key) {
        None => Ok(None),
        Some(values) => match values.len() {
            0 => Err(ConfigError::MissingValue(what)),
            1 => Ok(values.into_iter().next()),
            _ => Err(ConfigError::TooManyValues(what)),
        },
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &'static str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::NotANumber {
        what: what,
        value: value.to_string(),
    })
}

fn floor_count(floors: i64) -> Result<u8, ConfigError> {
    if floors < MIN_FLOORS as i64 || floors > MAX_FLOORS as i64 {
        return Err(ConfigError::FloorCountOutOfRange { min: MIN_FLOORS, max: MAX_FLOORS });
    }
    Ok(floors as u8)
}

fn read_config_file(path: &str) -> Result<ConfigFile, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::FileUnreadable {
        path: path.to_string(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::FileMalformed {
        path: path.to_string(),
        source: e,
    })
}
