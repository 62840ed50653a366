//! Math practice backend: problem generation, answer checking and scoring for
//! the angles, Pythagoras, real-number, scientific-notation and surface-area
//! practice apps, served over HTTP and WebSocket.

pub mod checker;
pub mod config;
pub mod domain;
pub mod error;
pub mod generators;
pub mod logic;
pub mod notation;
pub mod protocol;
pub mod relationships;
pub mod routes;
pub mod score;
pub mod seeds;
pub mod state;
pub mod telemetry;
pub mod util;
