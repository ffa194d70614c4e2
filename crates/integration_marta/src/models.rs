//! MARTA arrival models
//!
//! Typed representations of the rail and bus records published by the MARTA
//! real-time feeds. Timestamps are Atlanta wall-clock time as reported by the
//! feed; no offset is attached.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// A predicted train arrival at a rail station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainArrival {
    /// Terminus the train is heading to
    pub destination: String,
    /// Travel direction ("N", "S", "E", "W")
    pub direction: String,
    /// Time the prediction refers to
    pub event_time: NaiveDateTime,
    /// Rail line name (e.g. "RED", "GOLD")
    pub line: String,
    /// Time-of-day view of `event_time`
    pub next_arr: NaiveTime,
    /// Station name
    pub station: String,
    /// Train identifier
    pub train_id: String,
    /// Seconds until the train reaches the station
    pub waiting_seconds: i64,
    /// Human-readable wait ("Arriving", "3 min", ...)
    pub waiting_time: String,
}

impl TrainArrival {
    /// Time left until arrival
    #[must_use]
    pub fn waiting_duration(&self) -> TimeDelta {
        TimeDelta::seconds(self.waiting_seconds)
    }

    /// Whether the feed reports the train as arriving right now
    #[must_use]
    pub fn is_arriving(&self) -> bool {
        self.waiting_time.eq_ignore_ascii_case("arriving")
    }

    /// Classify the rail line
    #[must_use]
    pub fn rail_line(&self) -> RailLine {
        RailLine::from_name(&self.line)
    }
}

impl fmt::Display for TrainArrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} to {} at {}: {}",
            self.rail_line(),
            self.direction,
            self.destination,
            self.station,
            self.waiting_time
        )
    }
}

/// A real-time bus position report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusArrival {
    /// Schedule adherence in minutes
    pub adherence: i64,
    /// Block identifier
    pub block_id: String,
    /// Block abbreviation
    pub block_abbr: String,
    /// Travel direction ("Northbound", ...)
    pub direction: String,
    /// Latitude of the vehicle
    pub latitude: f64,
    /// Longitude of the vehicle
    pub longitude: f64,
    /// Time the vehicle reported its position
    pub msg_time: NaiveDateTime,
    /// Route number
    pub route: String,
    /// Stop identifier
    pub stop_id: String,
    /// Timepoint marker
    pub timepoint: String,
    /// Trip identifier
    pub trip_id: String,
    /// Vehicle number
    pub vehicle: String,
}

impl BusArrival {
    /// Vehicle position as `(latitude, longitude)`
    #[must_use]
    pub const fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl fmt::Display for BusArrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route {} {} vehicle {} at {:.5},{:.5} ({:+} min)",
            self.route, self.direction, self.vehicle, self.latitude, self.longitude, self.adherence
        )
    }
}

/// MARTA heavy rail lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RailLine {
    Red,
    Gold,
    Blue,
    Green,
    /// Line name not recognized
    Unknown,
}

impl RailLine {
    /// Map a feed line name to a rail line
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "RED" => Self::Red,
            "GOLD" => Self::Gold,
            "BLUE" => Self::Blue,
            "GREEN" => Self::Green,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red Line",
            Self::Gold => "Gold Line",
            Self::Blue => "Blue Line",
            Self::Green => "Green Line",
            Self::Unknown => "Rail",
        }
    }
}

impl fmt::Display for RailLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
