//! Data models for machine state and per-line axis values
//!
//! This module provides:
//! - Axis letters understood by the parser (X, Y, Z, E)
//! - Partial axis values read from a single line, where an absent axis is
//!   distinct from zero
//! - Move classification (no-op, travel, deposition)
//! - The machine context: distance mode, logical position and the offset
//!   that maps logical coordinates to world coordinates

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis word recognised inside a command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X coordinate
    X,
    /// Y coordinate
    Y,
    /// Z coordinate
    Z,
    /// Deposition amount (extruder)
    E,
}

impl Axis {
    /// All axes in word order
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::E];

    /// Positional axes only
    pub const POSITIONAL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Map a word letter (either case) to an axis
    pub fn from_letter(letter: u8) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            b'X' => Some(Axis::X),
            b'Y' => Some(Axis::Y),
            b'Z' => Some(Axis::Z),
            b'E' => Some(Axis::E),
            _ => None,
        }
    }

    /// Upper-case word letter for this axis
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::E => 'E',
        }
    }

    /// Component index into a [`Vec3`], `None` for E
    pub fn component(self) -> Option<usize> {
        match self {
            Axis::X => Some(0),
            Axis::Y => Some(1),
            Axis::Z => Some(2),
            Axis::E => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Axis values read from one command line
///
/// Each axis is an `Option`: `None` means the word did not appear (or its
/// number could not be read), `Some(value)` holds a finite number. Absent
/// and zero are never interchangeable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisValues {
    /// X word
    pub x: Option<f32>,
    /// Y word
    pub y: Option<f32>,
    /// Z word
    pub z: Option<f32>,
    /// E word (deposition amount)
    pub e: Option<f32>,
}

impl AxisValues {
    /// Create an empty set (all axes absent)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, see [`AxisValues::set`]
    pub fn with(mut self, axis: Axis, value: f32) -> Self {
        self.set(axis, value);
        self
    }

    /// Get the value of an axis
    pub fn get(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::E => self.e,
        }
    }

    /// Set an axis; non-finite values leave the axis absent
    pub fn set(&mut self, axis: Axis, value: f32) {
        let value = value.is_finite().then_some(value);
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
            Axis::E => &mut self.e,
        };
        *slot = value;
    }

    /// True if any of X, Y or Z is present
    pub fn has_position(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.z.is_some()
    }

    /// True if no axis at all is present
    pub fn is_empty(&self) -> bool {
        !self.has_position() && self.e.is_none()
    }

    /// Count how many axes are present
    pub fn axis_count(&self) -> usize {
        Axis::ALL
            .iter()
            .filter(|axis| self.get(**axis).is_some())
            .count()
    }

    /// True if the line deposits material (`E` present and strictly positive)
    pub fn deposits(&self) -> bool {
        self.e.is_some_and(|e| e > 0.0)
    }

    /// Replace the present X/Y/Z of `pos`, keeping absent ones
    pub fn replace_in(&self, pos: Vec3) -> Vec3 {
        Vec3::new(
            self.x.unwrap_or(pos.x),
            self.y.unwrap_or(pos.y),
            self.z.unwrap_or(pos.z),
        )
    }

    /// Add the present X/Y/Z to `pos`; absent axes contribute zero
    pub fn add_to(&self, pos: Vec3) -> Vec3 {
        pos + Vec3::new(
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.z.unwrap_or(0.0),
        )
    }

    /// Classify a linear move carrying these values
    pub fn classify_move(&self) -> MoveKind {
        if self.deposits() {
            MoveKind::Deposition
        } else if self.has_position() {
            MoveKind::Travel
        } else {
            MoveKind::None
        }
    }
}

impl fmt::Display for AxisValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for axis in Axis::ALL {
            if let Some(value) = self.get(axis) {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}{}", axis, value)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Classification of a single command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// No geometric effect
    #[default]
    None,
    /// Head moves without depositing; breaks the current stroke
    Travel,
    /// Head moves while depositing; extends the current stroke
    Deposition,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Travel => write!(f, "Travel"),
            Self::Deposition => write!(f, "Deposition"),
        }
    }
}

/// Machine context threaded through one parse
///
/// The head position is kept in logical coordinates; `offset` maps them to
/// world coordinates (`world = offset + position`). Origin resets move the
/// logical frame while leaving the world position where it was.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineContext {
    /// G90 (true) or G91 (false)
    pub absolute_mode: bool,
    /// Logical head position
    pub position: Vec3,
    /// Logical-to-world offset
    pub offset: Vec3,
}

impl Default for MachineContext {
    fn default() -> Self {
        Self {
            absolute_mode: true,
            position: Vec3::ZERO,
            offset: Vec3::ZERO,
        }
    }
}

impl MachineContext {
    /// Create a context at the origin in absolute mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a logical position to world coordinates
    pub fn to_absolute(&self, pos: Vec3) -> Vec3 {
        self.offset + pos
    }

    /// Convert a world position to logical coordinates
    pub fn to_logical(&self, world: Vec3) -> Vec3 {
        world - self.offset
    }

    /// Current head position in world coordinates
    pub fn world_position(&self) -> Vec3 {
        self.to_absolute(self.position)
    }
}

impl fmt::Display for MachineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let world = self.world_position();
        write!(
            f,
            "{} X:{:.3} Y:{:.3} Z:{:.3} (world X:{:.3} Y:{:.3} Z:{:.3})",
            if self.absolute_mode { "G90" } else { "G91" },
            self.position.x,
            self.position.y,
            self.position.z,
            world.x,
            world.y,
            world.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_from_letter_is_case_insensitive() {
        assert_eq!(Axis::from_letter(b'x'), Some(Axis::X));
        assert_eq!(Axis::from_letter(b'E'), Some(Axis::E));
        assert_eq!(Axis::from_letter(b'F'), None);
        assert_eq!(Axis::Z.to_string(), "Z");
    }

    #[test]
    fn test_absent_is_not_zero() {
        let values = AxisValues::new().with(Axis::X, 0.0);
        assert_eq!(values.x, Some(0.0));
        assert_eq!(values.y, None);
        assert!(values.has_position());
        assert_eq!(values.axis_count(), 1);

        let pos = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(values.replace_in(pos), Vec3::new(0.0, 5.0, 6.0));
        assert_eq!(values.add_to(pos), pos);
    }

    #[test]
    fn test_non_finite_values_stay_absent() {
        let mut values = AxisValues::new();
        values.set(Axis::Y, f32::INFINITY);
        values.set(Axis::Z, f32::NAN);
        assert!(values.is_empty());
    }

    #[test]
    fn test_classify_move() {
        assert_eq!(AxisValues::new().classify_move(), MoveKind::None);
        assert_eq!(
            AxisValues::new().with(Axis::X, 1.0).classify_move(),
            MoveKind::Travel
        );
        assert_eq!(
            AxisValues::new()
                .with(Axis::X, 1.0)
                .with(Axis::E, 0.5)
                .classify_move(),
            MoveKind::Deposition
        );
        // Retractions and zero amounts never deposit
        assert_eq!(
            AxisValues::new()
                .with(Axis::X, 1.0)
                .with(Axis::E, -2.0)
                .classify_move(),
            MoveKind::Travel
        );
        assert_eq!(
            AxisValues::new().with(Axis::E, 0.0).classify_move(),
            MoveKind::None
        );
        // E alone still counts as a deposition
        assert_eq!(
            AxisValues::new().with(Axis::E, 1.0).classify_move(),
            MoveKind::Deposition
        );
    }

    #[test]
    fn test_axis_values_display() {
        let values = AxisValues::new().with(Axis::X, 1.5).with(Axis::E, 2.0);
        assert_eq!(values.to_string(), "X1.5 E2");
    }

    #[test]
    fn test_machine_context_conversions() {
        let ctx = MachineContext {
            absolute_mode: true,
            position: Vec3::new(1.0, 2.0, 3.0),
            offset: Vec3::new(10.0, 0.0, -1.0),
        };
        assert_eq!(ctx.world_position(), Vec3::new(11.0, 2.0, 2.0));
        assert_eq!(ctx.to_logical(ctx.world_position()), ctx.position);
    }

    #[test]
    fn test_machine_context_default() {
        let ctx = MachineContext::new();
        assert!(ctx.absolute_mode);
        assert_eq!(ctx.position, Vec3::ZERO);
        assert_eq!(ctx.offset, Vec3::ZERO);
        assert!(ctx.to_string().starts_with("G90"));
    }

    #[test]
    fn test_machine_context_serde() {
        let ctx = MachineContext::new();
        let json = serde_json::to_string(&ctx).unwrap();
        let back: MachineContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}
