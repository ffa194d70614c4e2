//! Raw MARTA feed records and their mapping to typed models
//!
//! The feeds publish every field as a string under upper-case keys. Verbatim
//! fields are passed through; numeric and timestamp fields are coerced and
//! any coercion failure rejects the whole response.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use crate::error::MartaError;
use crate::models::{BusArrival, TrainArrival};

/// Timestamp layout used by both feeds, e.g. `11/2/2023 5:04:03 PM`
const FEED_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Parse a rail arrivals body into typed arrivals, preserving order
pub fn parse_train_arrivals(body: &str) -> Result<Vec<TrainArrival>, MartaError> {
    let raw: Vec<RawTrainArrival> = serde_json::from_str(body)?;
    raw.into_iter().map(TrainArrival::try_from).collect()
}

/// Parse a bus body (all buses or a single route) into typed arrivals
pub fn parse_bus_arrivals(body: &str) -> Result<Vec<BusArrival>, MartaError> {
    let raw: Vec<RawBusArrival> = serde_json::from_str(body)?;
    raw.into_iter().map(BusArrival::try_from).collect()
}

fn parse_number<T>(field: &'static str, value: &str) -> Result<T, MartaError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| MartaError::InvalidField {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, MartaError> {
    NaiveDateTime::parse_from_str(value.trim(), FEED_TIMESTAMP_FORMAT).map_err(|e| {
        MartaError::InvalidField {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Read a string field, treating an explicit `null` like a missing key
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Deserialize)]
struct RawTrainArrival {
    #[serde(rename = "DESTINATION", default, deserialize_with = "null_as_empty")]
    destination: String,
    #[serde(rename = "DIRECTION", default, deserialize_with = "null_as_empty")]
    direction: String,
    #[serde(rename = "EVENT_TIME", default, deserialize_with = "null_as_empty")]
    event_time: String,
    #[serde(rename = "LINE", default, deserialize_with = "null_as_empty")]
    line: String,
    #[serde(rename = "STATION", default, deserialize_with = "null_as_empty")]
    station: String,
    #[serde(rename = "TRAIN_ID", default, deserialize_with = "null_as_empty")]
    train_id: String,
    #[serde(rename = "WAITING_SECONDS", default, deserialize_with = "null_as_empty")]
    waiting_seconds: String,
    #[serde(rename = "WAITING_TIME", default, deserialize_with = "null_as_empty")]
    waiting_time: String,
}

impl TryFrom<RawTrainArrival> for TrainArrival {
    type Error = MartaError;

    fn try_from(raw: RawTrainArrival) -> Result<Self, Self::Error> {
        let event_time = parse_timestamp("EVENT_TIME", &raw.event_time)?;
        Ok(Self {
            destination: raw.destination,
            direction: raw.direction,
            event_time,
            line: raw.line,
            // same-day view of the event, not a second parse against today's date
            next_arr: event_time.time(),
            station: raw.station,
            train_id: raw.train_id,
            waiting_seconds: parse_number("WAITING_SECONDS", &raw.waiting_seconds)?,
            waiting_time: raw.waiting_time,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawBusArrival {
    #[serde(rename = "ADHERENCE", default, deserialize_with = "null_as_empty")]
    adherence: String,
    #[serde(rename = "BLOCKID", default, deserialize_with = "null_as_empty")]
    block_id: String,
    #[serde(rename = "BLOCK_ABBR", default, deserialize_with = "null_as_empty")]
    block_abbr: String,
    #[serde(rename = "DIRECTION", default, deserialize_with = "null_as_empty")]
    direction: String,
    #[serde(rename = "LATITUDE", default, deserialize_with = "null_as_empty")]
    latitude: String,
    #[serde(rename = "LONGITUDE", default, deserialize_with = "null_as_empty")]
    longitude: String,
    #[serde(rename = "MSGTIME", default, deserialize_with = "null_as_empty")]
    msg_time: String,
    #[serde(rename = "ROUTE", default, deserialize_with = "null_as_empty")]
    route: String,
    #[serde(rename = "STOPID", default, deserialize_with = "null_as_empty")]
    stop_id: String,
    #[serde(rename = "TIMEPOINT", default, deserialize_with = "null_as_empty")]
    timepoint: String,
    #[serde(rename = "TRIPID", default, deserialize_with = "null_as_empty")]
    trip_id: String,
    #[serde(rename = "VEHICLE", default, deserialize_with = "null_as_empty")]
    vehicle: String,
}

impl TryFrom<RawBusArrival> for BusArrival {
    type Error = MartaError;

    fn try_from(raw: RawBusArrival) -> Result<Self, Self::Error> {
        Ok(Self {
            adherence: parse_number("ADHERENCE", &raw.adherence)?,
            block_id: raw.block_id,
            block_abbr: raw.block_abbr,
            direction: raw.direction,
            latitude: parse_number("LATITUDE", &raw.latitude)?,
            longitude: parse_number("LONGITUDE", &raw.longitude)?,
            msg_time: parse_timestamp("MSGTIME", &raw.msg_time)?,
            route: raw.route,
            stop_id: raw.stop_id,
            timepoint: raw.timepoint,
            trip_id: raw.trip_id,
            vehicle: raw.vehicle,
        })
    }
}
