//! MARTA real-time arrivals integration
//!
//! Client for the real-time feeds published by MARTA (Metropolitan Atlanta
//! Rapid Transit Authority) on <http://developer.itsmarta.com>: rail arrivals,
//! all bus positions, and bus positions for a single route.
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern of the other integration crates.
//! [`MartaClient`] defines the three feed operations and is implemented by
//! [`MartaRealtimeClient`]. Upstream records carry every value as a string;
//! they are mapped into [`TrainArrival`] and [`BusArrival`] with typed
//! numbers and timestamps.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_marta::{MartaClient, MartaConfig, MartaRealtimeClient};
//!
//! let client = MartaRealtimeClient::new(&MartaConfig::default())?;
//!
//! let trains = client.fetch_train_arrivals("my-api-key").await?;
//! let route_12 = client.fetch_bus_arrivals_by_route("12").await?;
//! ```

mod client;
mod config;
mod error;
mod feed;
mod models;

pub use client::{MartaClient, MartaRealtimeClient};
pub use config::MartaConfig;
pub use error::MartaError;
pub use models::{BusArrival, RailLine, TrainArrival};
