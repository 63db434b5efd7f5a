//! Test utilities for EcomGraph integration tests
//!
//! - `FakeRunner`: records every command instead of spawning it
//! - `ScriptedProbe`: health probe answering from a fixed script
//! - `ProjectDir`: temporary project checkout
//! - `GremlinStub`: local HTTP server answering like Gremlin Server

#![allow(dead_code)]

pub mod fakes;
pub mod gremlin_stub;
pub mod project;
