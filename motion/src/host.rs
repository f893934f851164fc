//! Seam between the state machine and whatever draws it.

use crate::machine::{AnimationStateMachine, TickResult};

/// Receives the visual consequences of a tick.
#[cfg_attr(test, mockall::automock)]
pub trait TrailHost {
    /// Translates the mover to `pixel_offset` from the container's left edge.
    fn move_mover(&mut self, pixel_offset: f64);

    /// Creates a fading marker at `pixel_offset`, spawned at `now_millis`.
    fn spawn_marker(&mut self, pixel_offset: f64, now_millis: f64);
}

/// Ticks `machine` at `now_millis` and forwards the outcome to `host`.
///
/// Throttled and inactive ticks reach the host as nothing at all.
pub fn drive<H>(machine: &mut AnimationStateMachine, host: &mut H, now_millis: f64) -> TickResult
where
    H: TrailHost + ?Sized,
{
    let result = machine.tick(now_millis);
    if result.is_moving() {
        host.move_mover(result.pixel_offset);
    }
    if let Some(offset) = result.marker_pixel_offset {
        host.spawn_marker(offset, now_millis);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimatorConfig;
    use mockall::predicate::{always, eq};

    fn machine() -> AnimationStateMachine {
        AnimationStateMachine::new(AnimatorConfig::new(200.0, 20.0))
    }

    #[test]
    fn moving_tick_moves_the_mover_only() {
        let mut host = MockTrailHost::new();
        host.expect_move_mover().times(1).return_const(());
        host.expect_spawn_marker().never();

        let result = drive(&mut machine(), &mut host, 40.0);
        assert!(result.is_moving());
    }

    #[test]
    fn throttled_tick_reaches_no_one() {
        let mut host = MockTrailHost::new();
        host.expect_move_mover().never();
        host.expect_spawn_marker().never();

        drive(&mut machine(), &mut host, 10.0);
    }

    #[test]
    fn inactive_tick_reaches_no_one() {
        let mut host = MockTrailHost::new();
        host.expect_move_mover().never();
        host.expect_spawn_marker().never();

        let mut machine = AnimationStateMachine::new(AnimatorConfig::default());
        drive(&mut machine, &mut host, 1000.0);
    }

    #[test]
    fn eligible_tick_spawns_marker_with_tick_time() {
        let mut host = MockTrailHost::new();
        host.expect_move_mover().times(1).return_const(());
        host.expect_spawn_marker()
            .with(always(), eq(720.0))
            .times(1)
            .return_const(());

        let result = drive(&mut machine(), &mut host, 720.0);
        assert!(result.marker_spawned());
    }
}
