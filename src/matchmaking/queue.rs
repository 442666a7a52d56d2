//! Matchmaking queue implementation

use std::collections::VecDeque;
use std::time::Instant;
use uuid::Uuid;

/// Connection waiting to be paired
#[derive(Debug, Clone)]
pub struct QueuedClient {
    pub conn_id: Uuid,
    pub queued_at: Instant,
}

impl QueuedClient {
    pub fn new(conn_id: Uuid) -> Self {
        Self {
            conn_id,
            queued_at: Instant::now(),
        }
    }
}

/// FIFO queue of clients waiting for an opponent
pub struct WaitingQueue {
    queue: VecDeque<QueuedClient>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Add a client to the queue. Re-joining moves it to the back
    pub fn enqueue(&mut self, client: QueuedClient) {
        self.queue.retain(|c| c.conn_id != client.conn_id);
        self.queue.push_back(client);
    }

    /// Remove a client from the queue
    pub fn remove(&mut self, conn_id: Uuid) -> Option<QueuedClient> {
        if let Some(pos) = self.queue.iter().position(|c| c.conn_id == conn_id) {
            self.queue.remove(pos)
        } else {
            None
        }
    }

    /// Check if a client is in the queue
    pub fn contains(&self, conn_id: &Uuid) -> bool {
        self.queue.iter().any(|c| &c.conn_id == conn_id)
    }

    /// Get queue length
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take the two oldest waiting clients. The first of the pair is the
    /// first player by convention
    pub fn try_pair(&mut self) -> Option<(QueuedClient, QueuedClient)> {
        if self.queue.len() < 2 {
            return None;
        }
        match (self.queue.pop_front(), self.queue.pop_front()) {
            (Some(first), Some(second)) => Some((first, second)),
            _ => None,
        }
    }
}

impl Default for WaitingQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_in_fifo_order() {
        let mut queue = WaitingQueue::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        queue.enqueue(QueuedClient::new(a));
        assert!(queue.try_pair().is_none());

        queue.enqueue(QueuedClient::new(b));
        queue.enqueue(QueuedClient::new(c));

        let (first, second) = queue.try_pair().expect("two clients waiting");
        assert_eq!(first.conn_id, a);
        assert_eq!(second.conn_id, b);
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(&c));
    }

    #[test]
    fn rejoin_moves_to_the_back() {
        let mut queue = WaitingQueue::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        queue.enqueue(QueuedClient::new(a));
        queue.enqueue(QueuedClient::new(b));
        queue.enqueue(QueuedClient::new(a));

        let (first, second) = queue.try_pair().expect("two clients waiting");
        assert_eq!(first.conn_id, b);
        assert_eq!(second.conn_id, a);
    }

    #[test]
    fn remove_drops_a_waiting_client() {
        let mut queue = WaitingQueue::new();
        let a = Uuid::new_v4();

        queue.enqueue(QueuedClient::new(a));
        assert!(queue.remove(a).is_some());
        assert!(queue.is_empty());
        assert!(queue.remove(a).is_none());
    }
}
