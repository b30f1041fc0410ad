//! VANTAGE Test Harness - Pose scripting and end-to-end simulation
//!
//! This crate provides:
//! - A scripted pose actor (head turns, hand postures, tracking dropouts)
//! - A fixed-rate director harness with motion bookkeeping
//! - End-to-end scenario tests over the whole engine

pub mod simulator;

pub use simulator::*;
