//! Core server implementation and request handling.
//!
//! This module contains the main game server structure, its router and
//! the handlers behind each route.

pub mod core;
pub mod handlers;

pub use core::GameServer;
