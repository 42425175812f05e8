//! Two-player alignment games with search, heuristic and learned agents
//!
//! This crate provides:
//! - A board contract implemented by a square grid game (tic-tac-toe) and a
//!   column-drop game (connect four), both of any size and win length
//! - Depth-limited minimax with optional alpha-beta pruning
//! - A greedy win/block/extend heuristic policy
//! - Tabular Q-learning with batched training and evaluation
//! - Sessions that seat any two player kinds and play series of games
//! - Persistence of learned tables behind a store port

pub mod adapters;
pub mod board;
pub mod cli;
pub mod error;
pub mod ports;
pub mod q_learning;
pub mod search;
pub mod session;
pub mod strategy;

pub use board::{Board, DropBoard, GameOutcome, GridBoard, Seat, Token};
pub use error::{Error, Result};
