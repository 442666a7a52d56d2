//! Relay service - pairing, room table, verbatim event relay
//!
//! The service holds no physics state. It pairs waiting clients into
//! rooms and forwards turn events between the two members; clients report
//! outcomes and the service trusts them.

use dashmap::DashMap;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use crate::util::time::unix_millis;
use crate::ws::protocol::{ArrowState, ServerMsg};

use super::queue::{QueuedClient, WaitingQueue};

/// Outbound channel for one connected client
#[derive(Clone)]
pub struct ClientHandle {
    pub conn_id: Uuid,
    pub tx: mpsc::UnboundedSender<ServerMsg>,
}

/// Per-room bookkeeping, reserved for future match state
#[derive(Debug, Clone, Default)]
pub struct RoomState {
    /// Winner once a result was announced
    pub winner: Option<Uuid>,
}

/// A paired room of two connections
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    /// Still-connected members; starts with both
    pub members: Vec<Uuid>,
    pub created_at: u64,
    pub state: RoomState,
}

impl Room {
    fn new(id: String, first: Uuid, second: Uuid) -> Self {
        Self {
            id,
            members: vec![first, second],
            created_at: unix_millis(),
            state: RoomState::default(),
        }
    }

    /// The other member of the room, if still connected
    pub fn other_member(&self, conn_id: Uuid) -> Option<Uuid> {
        self.members.iter().copied().find(|m| *m != conn_id)
    }
}

/// Matchmaking and relay service
pub struct RelayService {
    queue: Mutex<WaitingQueue>,
    clients: DashMap<Uuid, ClientHandle>,
    rooms: DashMap<String, Room>,
    /// Connection -> current room index
    client_rooms: DashMap<Uuid, String>,
}

impl RelayService {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(WaitingQueue::new()),
            clients: DashMap::new(),
            rooms: DashMap::new(),
            client_rooms: DashMap::new(),
        }
    }

    /// Register a connection (called when the WebSocket opens)
    pub fn register(&self, conn_id: Uuid, tx: mpsc::UnboundedSender<ServerMsg>) {
        self.clients.insert(conn_id, ClientHandle { conn_id, tx });
    }

    /// Enqueue for pairing. Whenever two clients wait, the two oldest are
    /// paired immediately
    pub async fn join_queue(&self, conn_id: Uuid) {
        if self.client_rooms.contains_key(&conn_id) {
            self.send_to(
                conn_id,
                ServerMsg::Error {
                    message: "already in a room".to_string(),
                },
            );
            return;
        }

        let paired = {
            let mut queue = self.queue.lock().await;
            queue.enqueue(QueuedClient::new(conn_id));
            info!(conn_id = %conn_id, queue_size = queue.len(), "Client joined matchmaking queue");
            queue.try_pair()
        };

        if let Some((first, second)) = paired {
            self.create_room(first.conn_id, second.conn_id);
        }
    }

    /// Pair two clients into a room and announce the match start. The
    /// first dequeued takes the first turn
    fn create_room(&self, first: Uuid, second: Uuid) {
        let room_id = format!("room_{}_{}", first, second);
        self.rooms
            .insert(room_id.clone(), Room::new(room_id.clone(), first, second));
        self.client_rooms.insert(first, room_id.clone());
        self.client_rooms.insert(second, room_id.clone());

        info!(room = %room_id, first = %first, second = %second, "Room created");

        self.send_to(
            first,
            ServerMsg::StartGame {
                room: room_id.clone(),
                is_first_player: true,
            },
        );
        self.send_to(
            second,
            ServerMsg::StartGame {
                room: room_id,
                is_first_player: false,
            },
        );
    }

    /// Relay a launch event to the shooter's opponent
    pub fn relay_shot(&self, conn_id: Uuid, room: &str, arrow: ArrowState) {
        if let Some(other) = self.room_peer(conn_id, room) {
            self.send_to(other, ServerMsg::TurnUpdate { arrow });
        }
    }

    /// Relay a collectible hit to the victim's client
    pub fn relay_apple_hit(&self, conn_id: Uuid, room: &str) {
        if let Some(other) = self.room_peer(conn_id, room) {
            self.send_to(other, ServerMsg::AppleUpdate);
        }
    }

    /// A body hit ends the match: announce the reporter as winner to both
    /// members, then retire the room — nothing is relayed after a result
    pub fn report_body_hit(&self, conn_id: Uuid, room: &str) {
        let members = {
            let Some(mut entry) = self.rooms.get_mut(room) else {
                warn!(conn_id = %conn_id, room = %room, "Result reported for unknown room");
                return;
            };
            if !entry.members.contains(&conn_id) {
                warn!(conn_id = %conn_id, room = %room, "Result reported by non-member");
                return;
            }
            entry.state.winner = Some(conn_id);
            entry.members.clone()
        };

        for member in members {
            self.send_to(member, ServerMsg::AppleHit { winner: conn_id });
        }
        self.remove_room(room);

        info!(room = %room, winner = %conn_id, "Match over, room retired");
    }

    /// Reserved generic relay (player_input -> state_update)
    pub fn relay_input(&self, conn_id: Uuid, room: &str, input: serde_json::Value) {
        if let Some(other) = self.room_peer(conn_id, room) {
            self.send_to(other, ServerMsg::StateUpdate { id: conn_id, input });
        }
    }

    /// Remove a connection from the queue and from any room it belongs
    /// to; the last member leaving drops the room
    pub async fn disconnect(&self, conn_id: Uuid) {
        {
            let mut queue = self.queue.lock().await;
            queue.remove(conn_id);
        }
        self.clients.remove(&conn_id);

        if let Some((_, room_id)) = self.client_rooms.remove(&conn_id) {
            let emptied = match self.rooms.get_mut(&room_id) {
                Some(mut room) => {
                    room.members.retain(|m| *m != conn_id);
                    room.members.is_empty()
                }
                None => false,
            };
            if emptied {
                self.rooms.remove(&room_id);
                info!(room = %room_id, "Last member left, room dropped");
            }
        }

        info!(conn_id = %conn_id, "Client disconnected");
    }

    /// Resolve the other member of a room, refusing relays from
    /// non-members
    fn room_peer(&self, conn_id: Uuid, room: &str) -> Option<Uuid> {
        let entry = self.rooms.get(room)?;
        if !entry.members.contains(&conn_id) {
            warn!(conn_id = %conn_id, room = %room, "Relay attempt from non-member");
            return None;
        }
        entry.other_member(conn_id)
    }

    fn remove_room(&self, room_id: &str) {
        if let Some((_, room)) = self.rooms.remove(room_id) {
            for member in room.members {
                self.client_rooms.remove(&member);
            }
        }
    }

    fn send_to(&self, conn_id: Uuid, msg: ServerMsg) {
        if let Some(client) = self.clients.get(&conn_id) {
            if client.tx.send(msg).is_err() {
                warn!(conn_id = %conn_id, "Outbound channel closed");
            }
        }
    }

    /// Get current queue size
    pub async fn queue_size(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// Number of live rooms
    pub fn active_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Number of registered connections
    pub fn connected_clients(&self) -> usize {
        self.clients.len()
    }
}

impl Default for RelayService {
    fn default() -> Self {
        Self::new()
    }
}
