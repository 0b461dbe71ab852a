//! Shared test utilities for cowdash integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Time-dependent helpers take an explicit `now` so
//! results never depend on the wall clock.

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fake_sheet;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
