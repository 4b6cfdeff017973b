// src/lib.rs
// RootMate - plant status, personas and daily plant messages

pub mod clock;
pub mod config;
pub mod entitlement;
pub mod error;
pub mod http;
pub mod messages;
pub mod notify;
pub mod orchestrator;
pub mod persona;
pub mod plant;
pub mod proxy;
pub mod weather;
