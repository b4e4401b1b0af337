//! Line tokenizer
//!
//! Walks a byte buffer one physical line at a time. A line that starts with
//! the command letter `G` (either case) yields an [`Instruction`]: the
//! command code plus whatever X/Y/Z/E words follow it. Every other line is
//! skipped whole. Parsing is best effort and never fails: unknown words are
//! stepped over and a word without digits leaves its axis absent.

use gcodemesh_core::{Axis, AxisValues};
use tracing::trace;

const COMMAND_LETTER: u8 = b'G';
const LINE_COMMENT: u8 = b';';
const INLINE_COMMENT_OPEN: u8 = b'(';
const INLINE_COMMENT_CLOSE: u8 = b')';

/// One command read from the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    /// 1-based physical line the command was read from
    pub line: usize,
    /// Command code following the `G` letter
    pub code: u32,
    /// Axis words present on the line
    pub values: AxisValues,
}

/// Cursor-based tokenizer over a G-code buffer
///
/// The buffer ends at its length or at the first NUL byte, whichever comes
/// first. `\n`, `\r\n` and a lone `\r` all end a line.
#[derive(Debug, Clone)]
pub struct LineTokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    skipped_lines: usize,
}

impl<'a> LineTokenizer<'a> {
    /// Create a tokenizer positioned at the start of `input`
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            skipped_lines: 0,
        }
    }

    /// Current 1-based line number
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Number of non-empty lines skipped because they held no command
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Byte offset of the cursor
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read the next command, skipping lines that hold none
    pub fn next_instruction(&mut self) -> Option<Instruction> {
        while self.skip_spaces_and_line_ends() {
            let line = self.line;
            if self.peek().to_ascii_uppercase() == COMMAND_LETTER {
                self.pos += 1;
                let code = self.read_code();
                let values = self.read_values();
                self.skip_line();
                return Some(Instruction { line, code, values });
            }

            trace!("Line {}: no command, skipping", line);
            self.skipped_lines += 1;
            self.skip_line();
        }
        None
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len() || self.input[self.pos] == 0
    }

    /// Current byte, or NUL at the end of input
    fn peek(&self) -> u8 {
        if self.at_end() {
            0
        } else {
            self.input[self.pos]
        }
    }

    fn at_line_end(&self) -> bool {
        self.at_end() || is_line_end(self.peek())
    }

    /// Consume one line break sequence if the cursor sits on one
    fn consume_line_end(&mut self) {
        match self.peek() {
            b'\r' => {
                self.pos += 1;
                if self.peek() == b'\n' {
                    self.pos += 1;
                }
                self.line += 1;
            }
            b'\n' => {
                self.pos += 1;
                self.line += 1;
            }
            _ => {}
        }
    }

    /// Skip blanks and line breaks; false once the input is exhausted
    fn skip_spaces_and_line_ends(&mut self) -> bool {
        loop {
            match self.peek() {
                b' ' | b'\t' => self.pos += 1,
                b'\r' | b'\n' => self.consume_line_end(),
                _ => break,
            }
        }
        !self.at_end()
    }

    /// Skip blanks within the line; false at the line end
    fn skip_spaces(&mut self) -> bool {
        while matches!(self.peek(), b' ' | b'\t') {
            self.pos += 1;
        }
        !self.at_line_end()
    }

    /// Skip the rest of the line, including its line break
    fn skip_line(&mut self) {
        while !self.at_line_end() {
            self.pos += 1;
        }
        self.consume_line_end();
    }

    /// Skip an unrecognised word up to whitespace or a comment
    fn skip_token(&mut self) {
        while !self.at_line_end() {
            match self.peek() {
                b' ' | b'\t' | LINE_COMMENT | INLINE_COMMENT_OPEN => break,
                _ => self.pos += 1,
            }
        }
    }

    /// Skip a parenthesised comment; it also ends at the line break
    fn skip_inline_comment(&mut self) {
        self.pos += 1;
        while !self.at_line_end() {
            let c = self.peek();
            self.pos += 1;
            if c == INLINE_COMMENT_CLOSE {
                break;
            }
        }
    }

    /// Unsigned decimal command code; no digits reads as 0
    fn read_code(&mut self) -> u32 {
        let mut code: u32 = 0;
        while self.peek().is_ascii_digit() {
            let digit = u32::from(self.peek() - b'0');
            code = code.saturating_mul(10).saturating_add(digit);
            self.pos += 1;
        }
        code
    }

    /// Numeric literal `[+-]?digits*(.digits*)?` with at least one digit
    ///
    /// Without digits the cursor is left untouched and `None` is returned.
    fn read_number(&mut self) -> Option<f32> {
        let start = self.pos;
        let mut end = start;
        let mut digits = 0;

        let byte_at = |i: usize| -> u8 {
            if i < self.input.len() {
                self.input[i]
            } else {
                0
            }
        };

        if matches!(byte_at(end), b'+' | b'-') {
            end += 1;
        }
        while byte_at(end).is_ascii_digit() {
            end += 1;
            digits += 1;
        }
        if byte_at(end) == b'.' {
            end += 1;
            while byte_at(end).is_ascii_digit() {
                end += 1;
                digits += 1;
            }
        }

        if digits == 0 {
            return None;
        }

        self.pos = end;
        std::str::from_utf8(&self.input[start..end])
            .ok()
            .and_then(|literal| literal.parse::<f32>().ok())
            .filter(|value| value.is_finite())
    }

    /// Read the words following the command code up to a comment or line end
    fn read_values(&mut self) -> AxisValues {
        let mut values = AxisValues::new();

        while self.skip_spaces() {
            match self.peek() {
                LINE_COMMENT => break,
                INLINE_COMMENT_OPEN => self.skip_inline_comment(),
                letter => {
                    self.pos += 1;
                    match Axis::from_letter(letter) {
                        Some(axis) => {
                            if let Some(value) = self.read_number() {
                                values.set(axis, value);
                            }
                        }
                        None => self.skip_token(),
                    }
                }
            }
        }

        values
    }
}

impl Iterator for LineTokenizer<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_instruction()
    }
}

fn is_line_end(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n')
}
