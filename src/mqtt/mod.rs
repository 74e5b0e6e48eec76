//! # MQTT Listener Module
//!
//! Provides the complete MQTT client functionality for plantwatch: one broker
//! connection, one topic subscription, and line-per-message rendering of
//! inbound sensor readings.
//!
//! ## Why This Module Exists
//!
//! The plant sensors publish their soil readings over MQTT. This module is
//! the receiving end: it connects to the broker the sensors report to,
//! subscribes to their topic, and turns every publish event into a line on
//! stdout so readings can be watched live or piped into other tooling.
//!
//! ## Module Architecture
//!
//! The MQTT system is organized into four focused submodules:
//!
//! ```text
//! mqtt/
//! ├── config.rs         - Broker endpoint and subscription settings
//! ├── error.rs          - Listener error taxonomy
//! ├── message.rs        - Message representation and payload decoding
//! └── mqtt_listener.rs  - Connection state and event loop
//! ```
//!
//! ## Design Philosophy
//!
//! - **One subscription, ever**: the topic filter is fixed at startup and
//!   registered once per successful handshake. There is no subscription
//!   management beyond that.
//! - **Total decoding**: payload rendering never fails. Invalid UTF-8 is
//!   replaced, not raised, so a misbehaving sensor cannot kill the watch.
//! - **Fail fast on transport errors**: there is no reconnect or retry
//!   logic. If the broker goes away the process exits and the supervisor
//!   (or the user) restarts it.

pub mod config;
pub mod error;
pub mod message;
pub mod mqtt_listener;
