//! Stroke accumulation
//!
//! A stroke is one continuous run of deposition moves. The builder extends
//! the open stroke on every deposition and closes it on a travel move or at
//! the end of input. Closed strokes are immutable.

use glam::Vec3;
use gcodemesh_core::MoveKind;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::motion::Motion;

/// A finished polyline in world coordinates
///
/// `indices` holds line-primitive pairs `(0,1), (1,2), …` so the points
/// form one simple connected path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Stroke {
    /// Ordered points of the polyline
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Index pairs for a line-primitive representation
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of points
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of line segments (`point_count - 1`)
    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Iterate the segments as `(start, end)` pairs
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.indices
            .chunks_exact(2)
            .map(|pair| (self.points[pair[0] as usize], self.points[pair[1] as usize]))
    }

    /// Total path length
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.points.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }

    /// Consume the stroke into its point and index buffers
    pub fn into_parts(self) -> (Vec<Vec3>, Vec<u32>) {
        (self.points, self.indices)
    }
}

/// Builds strokes from a stream of classified motions
#[derive(Debug, Default)]
pub struct StrokeBuilder {
    points: Vec<Vec3>,
    indices: Vec<u32>,
    strokes: Vec<Stroke>,
}

impl StrokeBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one classified motion
    pub fn push(&mut self, motion: &Motion) {
        match motion.kind {
            MoveKind::Deposition => self.deposit(motion.from, motion.to),
            MoveKind::Travel => self.break_stroke(),
            MoveKind::None => {}
        }
    }

    /// Extend the open stroke with the segment `from -> to`
    ///
    /// Consecutive segments share their joint point: while a stroke is open
    /// the segment continues from its last point, and `from` only seeds a
    /// new stroke. Only travel moves and [`finish`](Self::finish) close a
    /// stroke. A segment of zero length adds no point.
    pub fn deposit(&mut self, from: Vec3, to: Vec3) {
        if self.points.is_empty() {
            self.points.push(from);
        }

        if self.points.last() != Some(&to) {
            self.points.push(to);
            let end = (self.points.len() - 1) as u32;
            self.indices.push(end - 1);
            self.indices.push(end);
        }
    }

    /// Close the open stroke, if it has any segment
    ///
    /// An open stroke without segments (only zero-length depositions) is
    /// dropped.
    pub fn break_stroke(&mut self) {
        if self.indices.is_empty() {
            self.points.clear();
            return;
        }

        let stroke = Stroke {
            points: std::mem::take(&mut self.points),
            indices: std::mem::take(&mut self.indices),
        };
        trace!(
            "Stroke {} closed: {} points, {} segments",
            self.strokes.len(),
            stroke.point_count(),
            stroke.segment_count()
        );
        self.strokes.push(stroke);
    }

    /// True while a stroke is open
    pub fn is_open(&self) -> bool {
        !self.points.is_empty()
    }

    /// Number of strokes closed so far
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Close the open stroke and return all strokes in source order
    pub fn finish(mut self) -> Vec<Stroke> {
        self.break_stroke();
        self.strokes
    }
}
