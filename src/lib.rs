#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod aggregate;
mod bitboard;
mod board;
mod common;
mod config;
mod conflict;
#[cfg(feature = "std")]
mod logging;
mod ocean;
mod placement;
mod player;
pub mod sampler;
mod ship;
mod solver;

pub use aggregate::*;
pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use conflict::ConflictIndex;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level, LOG_ENV};
pub use ocean::Ocean;
pub use placement::{enumerate, Placement, Placements};
pub use player::*;
pub use sampler::{sample, FrequencyTable, SampleOutcome};
#[cfg(feature = "std")]
pub use sampler::sample_parallel;
pub use ship::*;
pub use solver::*;
