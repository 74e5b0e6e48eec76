use std::time::Duration;

use rumqttc::{AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Packet, QoS};
use tracing::{debug, warn};

use super::config::MqttConfig;
use super::error::ListenerError;
use super::message::SensorMessage;

const CLIENT_ID: &str = "plantwatch";
const REQUEST_CHANNEL_CAPACITY: usize = 100;

/// Connection lifecycle of the listener. There is no re-entry into
/// `Disconnected` once the transport fails; a dropped connection ends the
/// run instead of reconnecting.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
    Subscribed,
}

#[derive(Clone, Debug, Default)]
pub struct ListenerStatus {
    pub connection_state: ConnectionState,
    pub messages_received: usize,
    pub last_activity: Option<chrono::DateTime<chrono::Local>>,
}

/// Owns the broker connection and the one subscription of this process.
///
/// Construction is offline; all network activity happens inside [`run`],
/// which drives the rumqttc event loop until the process is killed or the
/// transport fails.
///
/// [`run`]: MqttListener::run
pub struct MqttListener {
    status: ListenerStatus,
    client: AsyncClient,
    event_loop: EventLoop,
    config: MqttConfig,
}

impl MqttListener {
    pub fn new(config: MqttConfig) -> Self {
        let mut mqtt_options =
            MqttOptions::new(CLIENT_ID, config.server.host.clone(), config.server.port);
        mqtt_options.set_keep_alive(Duration::from_secs(config.server.keepalive_secs));

        if let Some(credentials) = &config.server.credentials {
            mqtt_options.set_credentials(credentials.user.clone(), credentials.pw.clone());
        }

        let (client, event_loop) = AsyncClient::new(mqtt_options, REQUEST_CHANNEL_CAPACITY);

        let status = ListenerStatus::default();

        MqttListener {
            status,
            client,
            event_loop,
            config,
        }
    }

    pub fn status(&self) -> &ListenerStatus {
        &self.status
    }

    /// Blocks on the event loop until the transport fails. The first poll
    /// error is returned as-is; there is no retry or backoff, so an
    /// unreachable broker surfaces here on the very first iteration.
    pub async fn run(&mut self) -> Result<(), ListenerError> {
        loop {
            let event = self
                .event_loop
                .poll()
                .await
                .map_err(|e| ListenerError::Connection(e.to_string()))?;

            self.handle_event(event).await?;
        }
    }

    async fn handle_event(&mut self, event: Event) -> Result<(), ListenerError> {
        match event {
            Event::Incoming(Packet::ConnAck(ack)) => {
                println!("Connected: {:?}", ack.code);
                self.on_connect(ack.code).await?;
            }
            Event::Incoming(Packet::Publish(publish)) => {
                let message =
                    SensorMessage::from_publish(publish.topic, publish.payload.to_vec());
                self.on_message(&message);
            }
            Event::Incoming(Packet::SubAck(suback)) => {
                debug!("Subscription acknowledged: {:?}", suback);
            }
            Event::Incoming(packet) => {
                debug!("Ignoring incoming packet: {:?}", packet);
            }
            Event::Outgoing(_) => {}
        }
        Ok(())
    }

    /// Issues the fixed subscription once the handshake succeeded. A refused
    /// session is logged but not subscribed to; rumqttc surfaces the refusal
    /// as the next poll error, which ends the run. A repeated ConnAck
    /// re-issues the same subscribe, which is idempotent at the broker.
    async fn on_connect(&mut self, code: ConnectReturnCode) -> Result<(), ListenerError> {
        if code != ConnectReturnCode::Success {
            warn!("Broker refused the session: {:?}", code);
            self.status.connection_state = ConnectionState::Disconnected;
            return Ok(());
        }

        self.status.connection_state = ConnectionState::Connected;

        self.client
            .subscribe(&self.config.subscription.topic, QoS::AtMostOnce)
            .await
            .map_err(|e| ListenerError::Subscribe(e.to_string()))?;

        debug!(
            "Subscribed to {} at QoS 0",
            self.config.subscription.topic
        );
        self.status.connection_state = ConnectionState::Subscribed;
        Ok(())
    }

    /// Prints one line per message. Decoding is total, so nothing in here
    /// can fail or escape past this handler.
    fn on_message(&mut self, message: &SensorMessage) {
        println!("{}", message.render());

        self.status.messages_received += 1;
        self.status.last_activity = Some(chrono::Local::now());
        debug!(
            "Message #{} on {} at {}",
            self.status.messages_received,
            message.topic(),
            message.timestamp()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mqtt::config::{MqttServer, Subscription};

    fn test_config() -> MqttConfig {
        MqttConfig {
            server: MqttServer {
                host: "127.0.0.1".to_string(),
                port: 1883,
                keepalive_secs: 60,
                credentials: None,
            },
            subscription: Subscription {
                topic: "plants/test".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn successful_connack_subscribes_exactly_once() {
        let mut listener = MqttListener::new(test_config());
        assert_eq!(
            listener.status().connection_state,
            ConnectionState::Disconnected
        );

        listener
            .on_connect(ConnectReturnCode::Success)
            .await
            .expect("subscribe request should be accepted");
        assert_eq!(
            listener.status().connection_state,
            ConnectionState::Subscribed
        );
    }

    #[tokio::test]
    async fn refused_connack_does_not_subscribe() {
        let mut listener = MqttListener::new(test_config());

        listener
            .on_connect(ConnectReturnCode::BadUserNamePassword)
            .await
            .expect("a refused session is not an error here");
        assert_eq!(
            listener.status().connection_state,
            ConnectionState::Disconnected
        );
    }

    #[tokio::test]
    async fn repeated_connack_is_idempotent() {
        let mut listener = MqttListener::new(test_config());

        listener
            .on_connect(ConnectReturnCode::Success)
            .await
            .expect("first subscribe should be accepted");
        listener
            .on_connect(ConnectReturnCode::Success)
            .await
            .expect("re-subscribe should be accepted");
        assert_eq!(
            listener.status().connection_state,
            ConnectionState::Subscribed
        );
    }

    #[tokio::test]
    async fn message_handling_updates_the_counters() {
        let mut listener = MqttListener::new(test_config());

        let first = SensorMessage::from_publish("plants/test".to_string(), b"22.5".to_vec());
        let second = SensorMessage::from_publish("plants/test".to_string(), vec![0xff, 0xfe]);
        listener.on_message(&first);
        listener.on_message(&second);

        assert_eq!(listener.status().messages_received, 2);
        assert!(listener.status().last_activity.is_some());
    }

    #[tokio::test]
    async fn unreachable_broker_ends_the_run_without_retry() {
        let mut config = test_config();
        // tcpmux port, nothing listens there
        config.server.port = 1;

        let mut listener = MqttListener::new(config);
        let result = listener.run().await;

        assert!(matches!(result, Err(ListenerError::Connection(_))));
    }
}
