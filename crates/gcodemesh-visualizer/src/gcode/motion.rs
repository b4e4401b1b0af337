//! Motion state machine
//!
//! Applies one command to the [`MachineContext`] and classifies it. All
//! inputs are accepted: codes that are not understood leave the context
//! untouched and classify as [`MoveKind::None`].

use gcodemesh_core::{Axis, AxisValues, MachineContext, MoveKind};
use glam::Vec3;

/// G0 rapid move
pub const RAPID_MOVE: u32 = 0;
/// G1 linear move
pub const LINEAR_MOVE: u32 = 1;
/// G7 explicit relative move
pub const RELATIVE_MOVE: u32 = 7;
/// G90 absolute distance mode
pub const ABSOLUTE_MODE: u32 = 90;
/// G91 relative distance mode
pub const RELATIVE_MODE: u32 = 91;
/// G92 set logical position
pub const SET_POSITION: u32 = 92;

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// World position before the command
    pub from: Vec3,
    /// World position after the command
    pub to: Vec3,
    /// Move classification
    pub kind: MoveKind,
}

/// Apply a command to the machine context
///
/// Returns the world position before and after the command together with
/// its classification. Only G0/G1/G7 can classify as travel or deposition.
pub fn apply(code: u32, values: &AxisValues, context: &mut MachineContext) -> Motion {
    let from = context.world_position();

    let kind = match code {
        RAPID_MOVE | LINEAR_MOVE if context.absolute_mode => {
            context.position = values.replace_in(context.position);
            values.classify_move()
        }
        RAPID_MOVE | LINEAR_MOVE | RELATIVE_MOVE => {
            context.position = values.add_to(context.position);
            values.classify_move()
        }
        ABSOLUTE_MODE => {
            context.absolute_mode = true;
            MoveKind::None
        }
        RELATIVE_MODE => {
            context.absolute_mode = false;
            MoveKind::None
        }
        SET_POSITION => {
            set_position(values, context);
            MoveKind::None
        }
        _ => MoveKind::None,
    };

    Motion {
        from,
        to: context.world_position(),
        kind,
    }
}

/// G92: move the logical frame while keeping the world position
///
/// With no words at all the current position becomes the logical origin.
/// Otherwise each present X/Y/Z takes the supplied logical value and its
/// offset absorbs the difference. A bare `E` word is accepted but moves
/// nothing.
fn set_position(values: &AxisValues, context: &mut MachineContext) {
    if values.is_empty() {
        context.offset += context.position;
        context.position = Vec3::ZERO;
        return;
    }

    let world = context.world_position();
    for axis in Axis::POSITIONAL {
        if let (Some(value), Some(i)) = (values.get(axis), axis.component()) {
            context.position[i] = value;
            context.offset[i] = world[i] - value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(x: Option<f32>, y: Option<f32>, z: Option<f32>, e: Option<f32>) -> AxisValues {
        AxisValues { x, y, z, e }
    }

    #[test]
    fn test_absolute_move_keeps_absent_axes() {
        let mut ctx = MachineContext::new();
        ctx.position = Vec3::new(1.0, 2.0, 3.0);
        let motion = apply(1, &values(Some(5.0), None, None, None), &mut ctx);
        assert_eq!(motion.from, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(motion.to, Vec3::new(5.0, 2.0, 3.0));
        assert_eq!(motion.kind, MoveKind::Travel);
    }

    #[test]
    fn test_relative_mode_adds() {
        let mut ctx = MachineContext::new();
        apply(91, &AxisValues::new(), &mut ctx);
        assert!(!ctx.absolute_mode);
        apply(1, &values(Some(1.0), Some(2.0), None, Some(1.0)), &mut ctx);
        let motion = apply(0, &values(Some(1.0), None, None, None), &mut ctx);
        assert_eq!(motion.to, Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn test_g7_is_relative_even_in_absolute_mode() {
        let mut ctx = MachineContext::new();
        ctx.position = Vec3::new(10.0, 10.0, 0.0);
        let motion = apply(7, &values(Some(-3.0), None, Some(1.0), Some(2.0)), &mut ctx);
        assert!(ctx.absolute_mode);
        assert_eq!(motion.to, Vec3::new(7.0, 10.0, 1.0));
        assert_eq!(motion.kind, MoveKind::Deposition);
    }

    #[test]
    fn test_mode_switches_are_no_ops() {
        let mut ctx = MachineContext::new();
        ctx.position = Vec3::new(1.0, 1.0, 1.0);
        let motion = apply(91, &values(Some(9.0), None, None, Some(1.0)), &mut ctx);
        assert_eq!(motion.kind, MoveKind::None);
        assert_eq!(motion.from, motion.to);
        let motion = apply(90, &AxisValues::new(), &mut ctx);
        assert_eq!(motion.kind, MoveKind::None);
        assert!(ctx.absolute_mode);
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        let mut ctx = MachineContext::new();
        let before = ctx;
        let motion = apply(28, &values(Some(1.0), None, None, Some(1.0)), &mut ctx);
        assert_eq!(motion.kind, MoveKind::None);
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_bare_g92_folds_position_into_offset() {
        let mut ctx = MachineContext::new();
        apply(1, &values(Some(2.0), None, None, None), &mut ctx);
        let motion = apply(92, &AxisValues::new(), &mut ctx);
        assert_eq!(motion.kind, MoveKind::None);
        assert_eq!(ctx.position, Vec3::ZERO);
        assert_eq!(ctx.offset, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(motion.to, Vec3::new(2.0, 0.0, 0.0));

        let motion = apply(1, &values(Some(5.0), None, None, Some(1.0)), &mut ctx);
        assert_eq!(motion.from, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(motion.to, Vec3::new(7.0, 0.0, 0.0));
        assert_eq!(motion.kind, MoveKind::Deposition);
    }

    #[test]
    fn test_g92_with_axes_keeps_world_position() {
        let mut ctx = MachineContext::new();
        apply(1, &values(Some(4.0), Some(5.0), Some(6.0), None), &mut ctx);
        let motion = apply(92, &values(Some(1.0), None, Some(0.0), Some(3.0)), &mut ctx);
        assert_eq!(motion.kind, MoveKind::None);
        assert_eq!(ctx.position, Vec3::new(1.0, 5.0, 0.0));
        assert_eq!(ctx.offset, Vec3::new(3.0, 0.0, 6.0));
        assert_eq!(motion.to, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_g92_z_offset_uses_z() {
        let mut ctx = MachineContext::new();
        apply(1, &values(Some(0.0), Some(7.0), Some(2.0), None), &mut ctx);
        apply(92, &values(None, None, Some(0.5), None), &mut ctx);
        assert_eq!(ctx.offset.z, 1.5);
        assert_eq!(ctx.world_position(), Vec3::new(0.0, 7.0, 2.0));
    }

    #[test]
    fn test_g92_with_only_e_moves_nothing() {
        let mut ctx = MachineContext::new();
        apply(1, &values(Some(3.0), None, None, None), &mut ctx);
        let before = ctx;
        apply(92, &values(None, None, None, Some(0.0)), &mut ctx);
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_classification_of_moves() {
        let mut ctx = MachineContext::new();
        let kind = apply(1, &values(None, None, None, Some(1.0)), &mut ctx).kind;
        assert_eq!(kind, MoveKind::Deposition);
        let kind = apply(1, &values(Some(1.0), None, None, Some(0.0)), &mut ctx).kind;
        assert_eq!(kind, MoveKind::Travel);
        let kind = apply(1, &values(None, None, None, Some(-1.0)), &mut ctx).kind;
        assert_eq!(kind, MoveKind::None);
        let kind = apply(0, &AxisValues::new(), &mut ctx).kind;
        assert_eq!(kind, MoveKind::None);
    }
}
