//! Room configuration.

use crate::error::{RoomError, RoomResult};
use serde::{Deserialize, Serialize};

/// Settings a room is opened with. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Identifier of the room.
    pub room_id: String,
    /// Connection id of the local user.
    pub connection_id: u32,
    /// Display name of the local user.
    pub user_name: String,
    /// Cap on the number of undo steps kept; `None` keeps all of them.
    pub max_undo_history: Option<usize>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            room_id: "room".to_string(),
            connection_id: 1,
            user_name: "You".to_string(),
            max_undo_history: None,
        }
    }
}

impl RoomConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> RoomResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RoomError::Config(e.to_string()))?;
        if config.max_undo_history == Some(0) {
            return Err(RoomError::Config(
                "max_undo_history must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Cap the undo stack. A cap below 1 is raised to 1.
    pub fn with_max_undo_history(mut self, max: usize) -> Self {
        self.max_undo_history = Some(max.max(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RoomConfig::default();
        assert_eq!(config.connection_id, 1);
        assert_eq!(config.user_name, "You");
        assert!(config.max_undo_history.is_none());
    }

    #[test]
    fn test_from_json_partial() {
        let config = RoomConfig::from_json(r#"{"room_id":"design-review","max_undo_history":20}"#)
            .unwrap();
        assert_eq!(config.room_id, "design-review");
        assert_eq!(config.max_undo_history, Some(20));
        assert_eq!(config.user_name, "You");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            RoomConfig::from_json("{not json"),
            Err(RoomError::Config(_))
        ));
        assert!(matches!(
            RoomConfig::from_json(r#"{"max_undo_history":0}"#),
            Err(RoomError::Config(_))
        ));
    }

    #[test]
    fn test_zero_undo_cap_raised_to_one() {
        let config = RoomConfig::default().with_max_undo_history(0);
        assert_eq!(config.max_undo_history, Some(1));
    }
}
