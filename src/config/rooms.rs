//! Room and session defaults configuration

use serde::Deserialize;

use crate::application::SessionDefaults;
use crate::domain::session::CardPreset;

use super::error::ValidationError;

/// Room configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfig {
    /// Outbound queue size per connection
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Inbound queue size of the session engine
    #[serde(default = "default_command_queue_capacity")]
    pub command_queue_capacity: usize,

    /// Name given to sessions created without one
    #[serde(default = "default_session_name")]
    pub default_session_name: String,

    /// Story name used when a round starts without one
    #[serde(default = "default_story_name")]
    pub default_story_name: String,

    /// Deck new sessions start with
    #[serde(default)]
    pub default_deck: CardPreset,
}

impl RoomConfig {
    /// Fallbacks handed to the command handlers
    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            session_name: self.default_session_name.trim().to_string(),
            story_name: self.default_story_name.trim().to_string(),
            deck: self.default_deck,
        }
    }

    /// Validate room configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidCapacity("rooms.channel_capacity"));
        }
        if self.command_queue_capacity == 0 {
            return Err(ValidationError::InvalidCapacity(
                "rooms.command_queue_capacity",
            ));
        }
        if self.default_session_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("rooms.default_session_name"));
        }
        if self.default_story_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("rooms.default_story_name"));
        }
        Ok(())
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            command_queue_capacity: default_command_queue_capacity(),
            default_session_name: default_session_name(),
            default_story_name: default_story_name(),
            default_deck: CardPreset::default(),
        }
    }
}

fn default_channel_capacity() -> usize {
    128
}

fn default_command_queue_capacity() -> usize {
    1024
}

fn default_session_name() -> String {
    "Planning Session".to_string()
}

fn default_story_name() -> String {
    "Untitled Story".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_config_defaults() {
        let config = RoomConfig::default();
        assert_eq!(config.channel_capacity, 128);
        assert_eq!(config.command_queue_capacity, 1024);
        assert_eq!(config.default_deck, CardPreset::Fibonacci);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_match_handler_defaults() {
        assert_eq!(
            RoomConfig::default().session_defaults(),
            SessionDefaults::default()
        );
    }

    #[test]
    fn test_validation_zero_capacity() {
        let config = RoomConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCapacity(_))
        ));
    }

    #[test]
    fn test_validation_blank_story_name() {
        let config = RoomConfig {
            default_story_name: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
