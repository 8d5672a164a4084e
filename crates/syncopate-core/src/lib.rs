//! Core types and definitions for the SYNCOPATE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, configuration, commands, snapshots, events, constants and the
//! deterministic random source. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod rng;
pub mod state;
pub mod types;
