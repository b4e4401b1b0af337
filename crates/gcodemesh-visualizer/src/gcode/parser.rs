//! G-code stroke parser
//!
//! Drives the tokenizer, the motion state machine and the stroke builder
//! over one buffer in a single pass.

use gcodemesh_core::{MachineContext, MoveKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::motion;
use super::stroke::{Stroke, StrokeBuilder};
use super::tokenizer::LineTokenizer;

/// Counters collected during a parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Commands read (lines starting with `G`)
    pub commands: usize,
    /// Non-empty lines without a command
    pub skipped_lines: usize,
    /// Commands classified as deposition
    pub depositions: usize,
    /// Commands classified as travel
    pub travels: usize,
    /// Commands with no geometric effect
    pub no_ops: usize,
    /// Strokes produced
    pub strokes: usize,
    /// Points across all strokes
    pub points: usize,
}

/// Strokes produced by a parse, with its counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedToolpath {
    /// Strokes in source order
    pub strokes: Vec<Stroke>,
    /// Parse counters
    pub stats: ParseStats,
}

/// Single-pass parser from G-code text to strokes
///
/// The parser owns the machine context. A fresh parser starts at the origin
/// in absolute mode; after a parse the context holds the final machine
/// state, so parsing more text continues from there.
#[derive(Debug, Clone, Default)]
pub struct StrokeParser {
    context: MachineContext,
}

impl StrokeParser {
    /// Create a parser at the origin in absolute mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser starting from an existing context
    pub fn with_context(context: MachineContext) -> Self {
        Self { context }
    }

    /// Current machine context
    pub fn context(&self) -> &MachineContext {
        &self.context
    }

    /// Parse G-code text
    pub fn parse(&mut self, source: &str) -> ParsedToolpath {
        self.parse_bytes(source.as_bytes())
    }

    /// Parse a raw G-code buffer
    pub fn parse_bytes(&mut self, source: &[u8]) -> ParsedToolpath {
        debug!("Starting G-code parse, input size: {} bytes", source.len());

        let mut tokenizer = LineTokenizer::new(source);
        let mut builder = StrokeBuilder::new();
        let mut stats = ParseStats::default();

        while let Some(instr) = tokenizer.next_instruction() {
            let motion = motion::apply(instr.code, &instr.values, &mut self.context);
            trace!(
                "Line {}: G{} {} -> {} ({:?} -> {:?})",
                instr.line,
                instr.code,
                instr.values,
                motion.kind,
                motion.from,
                motion.to
            );

            stats.commands += 1;
            match motion.kind {
                MoveKind::Deposition => stats.depositions += 1,
                MoveKind::Travel => stats.travels += 1,
                MoveKind::None => stats.no_ops += 1,
            }
            builder.push(&motion);
        }

        let strokes = builder.finish();
        stats.skipped_lines = tokenizer.skipped_lines();
        stats.strokes = strokes.len();
        stats.points = strokes.iter().map(Stroke::point_count).sum();

        debug!(
            "Parse complete: commands={}, depositions={}, travels={}, no-ops={}, skipped lines={}, strokes={}, points={}",
            stats.commands,
            stats.depositions,
            stats.travels,
            stats.no_ops,
            stats.skipped_lines,
            stats.strokes,
            stats.points
        );

        ParsedToolpath { strokes, stats }
    }
}

/// Parse G-code text with a fresh context and return its strokes
pub fn parse_strokes(source: &str) -> Vec<Stroke> {
    StrokeParser::new().parse(source).strokes
}
