//! Archery Duel - turn-based two-player archery game
//!
//! The crate splits into two halves:
//! - [`game`]: the deterministic client-side simulation — arrow physics,
//!   collision outcomes, the turn state machine, and the per-client match
//!   session. Pure and tick-driven; no I/O.
//! - [`matchmaking`], [`ws`], [`http`]: the server — it pairs queued
//!   clients into rooms and relays turn events verbatim between the two
//!   members. It holds no physics state and trusts client-reported
//!   outcomes.

pub mod app;
pub mod config;
pub mod game;
pub mod http;
pub mod matchmaking;
pub mod util;
pub mod ws;
