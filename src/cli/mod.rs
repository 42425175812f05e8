//! Command line front end
//!
//! Commands parse their arguments, build the requested board and dispatch to
//! code that is generic over [`Board`](crate::board::Board).

pub mod commands;
pub mod config;
pub mod output;
