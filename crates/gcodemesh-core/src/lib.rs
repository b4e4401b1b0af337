//! # GCodeMesh Core
//!
//! Core types and errors for GCodeMesh.
//! Provides the machine context, per-line axis values and move
//! classification shared by the parser, plus the importer error types.

pub mod data;
pub mod error;

pub use data::{Axis, AxisValues, MachineContext, MoveKind};

pub use error::{Error, ImportError, Result};
