use chrono::NaiveDateTime;
use std::fmt;

/// One received sensor reading. Exists only for the duration of a single
/// publish event; nothing here is retained after the line is printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SensorMessage {
    topic: String,
    payload: Vec<u8>,
    timestamp: NaiveDateTime,
}

impl fmt::Display for SensorMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}", self.topic, self.display_payload())
    }
}

impl SensorMessage {
    pub fn from_publish(topic: String, payload: Vec<u8>) -> Self {
        SensorMessage {
            topic,
            payload,
            timestamp: chrono::Local::now().naive_local(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Best-effort text form of the payload. Total over all byte inputs:
    /// invalid UTF-8 sequences come back as U+FFFD replacement characters
    /// instead of an error, so rendering a message can never fail.
    pub fn display_payload(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// The stdout line for this message: topic in brackets, decoded payload.
    pub fn render(&self) -> String {
        format!("[{}] {}", self.topic, self.display_payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_utf8_payload_is_decoded_exactly() {
        let message = SensorMessage::from_publish("plants/test".to_string(), b"22.5".to_vec());
        assert_eq!(message.display_payload(), "22.5");
        assert_eq!(message.render(), "[plants/test] 22.5");
    }

    #[test]
    fn invalid_utf8_payload_is_replaced_not_fatal() {
        let message = SensorMessage::from_publish("plants/test".to_string(), vec![0xff, 0xfe]);
        let text = message.display_payload();
        assert!(text.chars().all(|c| c == '\u{FFFD}'));
        assert!(message.render().starts_with("[plants/test] "));
    }

    #[test]
    fn mixed_payload_keeps_the_valid_parts() {
        let message =
            SensorMessage::from_publish("plants/test".to_string(), b"22.5\xff%".to_vec());
        assert_eq!(message.display_payload(), "22.5\u{FFFD}%");
    }

    #[test]
    fn empty_payload_renders_an_empty_line_body() {
        let message = SensorMessage::from_publish("plants/test".to_string(), Vec::new());
        assert_eq!(message.render(), "[plants/test] ");
    }

    #[test]
    fn display_matches_render() {
        let message = SensorMessage::from_publish("plants/moist".to_string(), b"41".to_vec());
        assert_eq!(format!("{}", message), message.render());
    }
}
