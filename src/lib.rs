//! # Kuba RL
//!
//! A rules engine for the board game Kuba (7×7 marble pushing) with
//! adversarial search and reinforcement learning strategies.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, rule engine, move enumeration
//! - [`ai`] — Strategy trait, heuristic evaluator, minimax, tabular Q-learning
//! - [`model`] — Persistence for learned value tables
//! - [`training`] — Self-play trainer, evaluation harness, metrics collection
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod model;
pub mod training;
