use serde::{Deserialize, Serialize};

/// Broker, credential and subscription settings for the listener.
///
/// Loaded from the `[mqtt]` section of the config file. Fixed for the
/// process lifetime; changing the broker or topic means restarting.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MqttConfig {
    pub server: MqttServer,
    pub subscription: Subscription,
}

impl Default for MqttConfig {
    fn default() -> Self {
        MqttConfig {
            server: MqttServer::default(),
            subscription: Subscription::default(),
        }
    }
}

/// Broker endpoint. Defaults match the plant-sensor setup: a Mosquitto
/// instance on the Raspberry Pi, standard port, 60s keepalive.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MqttServer {
    pub host: String,
    pub port: u16,
    /// Keepalive interval in seconds. The broker drops the session if no
    /// liveness signal arrives within 1.5x this interval.
    pub keepalive_secs: u64,
    /// Credentials are optional; the sensor broker runs unauthenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl Default for MqttServer {
    fn default() -> Self {
        MqttServer {
            host: "raspberrypi".to_string(),
            port: 1883,
            keepalive_secs: 60,
            credentials: None,
        }
    }
}

/// Username and password for brokers that require auth.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Credentials {
    pub user: String,
    pub pw: String,
}

/// The single topic filter this process watches. QoS is fixed at 0
/// (at-most-once), so it is not configurable here.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Subscription {
    pub topic: String,
}

impl Default for Subscription {
    fn default() -> Self {
        Subscription {
            topic: "plants/test".to_string(),
        }
    }
}
