//! WebSocket protocol message definitions
//! These are the wire types for client-server communication

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Arrow state on the wire: position plus velocity in units per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowState {
    pub x: f32,
    pub y: f32,
    pub velocity: Velocity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    /// Enqueue this connection for pairing
    JoinQueue,

    /// Announce a launched arrow for relay to the opponent
    Shoot { room: String, arrow: ArrowState },

    /// Report that the opponent's apple was knocked off
    HitApple { room: String },

    /// Report a match-ending body hit
    HitPlayer { room: String },

    /// Generic input relay, reserved for future use
    PlayerInput {
        room: String,
        input: serde_json::Value,
    },
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    /// Connection accepted; `id` is how this client appears in winner
    /// announcements
    Welcome { id: Uuid, server_time: u64 },

    /// Pairing completed; the first player takes the first turn
    StartGame {
        room: String,
        #[serde(rename = "isFirstPlayer")]
        is_first_player: bool,
    },

    /// Forwarded opponent launch
    TurnUpdate { arrow: ArrowState },

    /// The opponent knocked this client's apple off
    AppleUpdate,

    /// Match result announcement
    AppleHit { winner: Uuid },

    /// Generic input relay, reserved for future use
    StateUpdate {
        id: Uuid,
        input: serde_json::Value,
    },

    /// Textual status message; no structured error codes cross the wire
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_queue_has_no_payload() {
        let msg: ClientMsg = serde_json::from_str(r#"{"type":"join_queue"}"#).unwrap();
        assert!(matches!(msg, ClientMsg::JoinQueue));
    }

    #[test]
    fn shoot_carries_nested_velocity() {
        let json = r#"{
            "type": "shoot",
            "room": "room_a_b",
            "arrow": {"x": 65.0, "y": 570.0, "velocity": {"x": 7.07, "y": -7.07}}
        }"#;
        let msg: ClientMsg = serde_json::from_str(json).unwrap();
        let ClientMsg::Shoot { room, arrow } = msg else {
            panic!("expected shoot");
        };
        assert_eq!(room, "room_a_b");
        assert_eq!(arrow.velocity.y, -7.07);
    }

    #[test]
    fn start_game_keeps_camel_case_flag() {
        let msg = ServerMsg::StartGame {
            room: "room_a_b".to_string(),
            is_first_player: true,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "start_game");
        assert_eq!(json["isFirstPlayer"], true);
    }

    #[test]
    fn event_names_are_snake_case() {
        let apple_hit = ServerMsg::AppleHit {
            winner: Uuid::nil(),
        };
        let json = serde_json::to_value(&apple_hit).unwrap();
        assert_eq!(json["type"], "apple_hit");

        let update = ServerMsg::AppleUpdate;
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["type"], "apple_update");

        let hit_player: ClientMsg =
            serde_json::from_str(r#"{"type":"hit_player","room":"r"}"#).unwrap();
        assert!(matches!(hit_player, ClientMsg::HitPlayer { .. }));
    }

    #[test]
    fn turn_update_roundtrip() {
        let msg = ServerMsg::TurnUpdate {
            arrow: ArrowState {
                x: 1.5,
                y: 2.5,
                velocity: Velocity { x: 3.0, y: -4.0 },
            },
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: ServerMsg = serde_json::from_str(&json).unwrap();
        let ServerMsg::TurnUpdate { arrow } = back else {
            panic!("expected turn_update");
        };
        assert_eq!(arrow.x, 1.5);
        assert_eq!(arrow.velocity.x, 3.0);
    }

    #[test]
    fn player_input_passes_opaque_payload() {
        let json = r#"{"type":"player_input","room":"r","input":{"key":"up"}}"#;
        let msg: ClientMsg = serde_json::from_str(json).unwrap();
        let ClientMsg::PlayerInput { input, .. } = msg else {
            panic!("expected player_input");
        };
        assert_eq!(input["key"], "up");
    }
}
