//! Integration tests for dvr
//!
//! These tests drive whole interactions through capture, storage bytes and
//! replay.

#[path = "../common/mod.rs"]
pub mod common;

pub mod codec_properties;
pub mod replay_flow;
