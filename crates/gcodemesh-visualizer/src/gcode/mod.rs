//! G-code to stroke parsing
//!
//! This module provides:
//! - Line tokenizing (command code plus X/Y/Z/E words)
//! - The motion state machine (distance modes, origin resets)
//! - Stroke accumulation for runs of deposition moves
//! - The single-pass parser tying them together

pub mod motion;
pub mod parser;
pub mod stroke;
pub mod tokenizer;

pub use motion::{apply, Motion};
pub use parser::{parse_strokes, ParseStats, ParsedToolpath, StrokeParser};
pub use stroke::{Stroke, StrokeBuilder};
pub use tokenizer::{Instruction, LineTokenizer};
