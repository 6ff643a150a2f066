// crates/vidshelf-core/src/gesture.rs
//
// Double-tap-to-seek. Taps carry a caller-supplied millisecond clock so the
// detector is deterministic under test.

/// Which half of the video surface a tap landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapSide {
    Left,
    Right,
}

impl TapSide {
    pub fn from_position(x: f32, width: f32) -> Self {
        if x < width / 2.0 { TapSide::Left } else { TapSide::Right }
    }

    fn index(self) -> usize {
        match self {
            TapSide::Left  => 0,
            TapSide::Right => 1,
        }
    }

    /// Relative seek for a double-tap on this side.
    pub fn seek_delta_ms(self, step_ms: u64) -> i64 {
        match self {
            TapSide::Left  => -(step_ms as i64),
            TapSide::Right => step_ms as i64,
        }
    }
}

pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 300;
pub const DEFAULT_INDICATOR_MS: u64         = 600;

#[derive(Debug)]
pub struct DoubleTapDetector {
    window_ms:    u64,
    indicator_ms: u64,
    /// Time of the previous tap on each half, indexed by `TapSide::index`.
    last_tap:     [Option<u64>; 2],
    /// Side + start time of the acknowledgment currently on screen.
    indicator:    Option<(TapSide, u64)>,
}

impl Default for DoubleTapDetector {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_WINDOW_MS, DEFAULT_INDICATOR_MS)
    }
}

impl DoubleTapDetector {
    pub fn new(window_ms: u64, indicator_ms: u64) -> Self {
        Self { window_ms, indicator_ms, last_tap: [None; 2], indicator: None }
    }

    /// Register a tap. Returns the side when it completes a double-tap.
    ///
    /// Each half keeps its own reference point: a tap on the other half in
    /// between does not break a double-tap, and a third quick tap on the same
    /// half counts as another one.
    pub fn tap(&mut self, side: TapSide, now_ms: u64) -> Option<TapSide> {
        let window = self.window_ms;
        let slot = &mut self.last_tap[side.index()];
        let is_double = slot.is_some_and(|at| now_ms.saturating_sub(at) < window);
        *slot = Some(now_ms);
        if is_double {
            self.indicator = Some((side, now_ms));
            Some(side)
        } else {
            None
        }
    }

    /// The acknowledgment to draw at `now_ms`, as (side, opacity).
    ///
    /// Fades in over the first third, holds, then fades out over the last third.
    pub fn indicator(&self, now_ms: u64) -> Option<(TapSide, f32)> {
        let (side, start) = self.indicator?;
        let elapsed = now_ms.saturating_sub(start);
        if elapsed >= self.indicator_ms || self.indicator_ms == 0 {
            return None;
        }
        let third = (self.indicator_ms / 3).max(1) as f32;
        let t = elapsed as f32;
        let remaining = (self.indicator_ms - elapsed) as f32;
        let opacity = (t / third).min(1.0).min(remaining / third);
        Some((side, opacity.clamp(0.0, 1.0)))
    }

    pub fn reset(&mut self) {
        self.last_tap  = [None; 2];
        self.indicator = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_from_position() {
        assert_eq!(TapSide::from_position(10.0, 400.0), TapSide::Left);
        assert_eq!(TapSide::from_position(200.0, 400.0), TapSide::Right);
        assert_eq!(TapSide::Left.seek_delta_ms(10_000), -10_000);
        assert_eq!(TapSide::Right.seek_delta_ms(10_000), 10_000);
    }

    #[test]
    fn single_tap_is_noop() {
        let mut d = DoubleTapDetector::default();
        assert_eq!(d.tap(TapSide::Left, 1_000), None);
        assert!(d.indicator(1_000).is_none());
    }

    #[test]
    fn two_taps_inside_window_fire_once() {
        let mut d = DoubleTapDetector::default();
        d.tap(TapSide::Right, 1_000);
        assert_eq!(d.tap(TapSide::Right, 1_250), Some(TapSide::Right));
        assert!(d.indicator(1_250).is_some());
    }

    #[test]
    fn slow_taps_do_not_fire() {
        let mut d = DoubleTapDetector::default();
        d.tap(TapSide::Left, 1_000);
        assert_eq!(d.tap(TapSide::Left, 1_300), None);
    }

    #[test]
    fn taps_on_different_halves_do_not_fire() {
        let mut d = DoubleTapDetector::default();
        d.tap(TapSide::Left, 1_000);
        assert_eq!(d.tap(TapSide::Right, 1_100), None);
    }

    #[test]
    fn tap_on_other_half_keeps_pending_tap() {
        let mut d = DoubleTapDetector::default();
        assert_eq!(d.tap(TapSide::Left, 0), None);
        assert_eq!(d.tap(TapSide::Right, 100), None);
        assert_eq!(d.tap(TapSide::Left, 200), Some(TapSide::Left));
        assert_eq!(d.tap(TapSide::Right, 250), Some(TapSide::Right));
    }

    #[test]
    fn third_quick_tap_fires_again() {
        let mut d = DoubleTapDetector::default();
        d.tap(TapSide::Right, 0);
        assert_eq!(d.tap(TapSide::Right, 200), Some(TapSide::Right));
        assert_eq!(d.tap(TapSide::Right, 400), Some(TapSide::Right));
    }

    #[test]
    fn indicator_fades_and_expires() {
        let mut d = DoubleTapDetector::default();
        d.tap(TapSide::Left, 0);
        d.tap(TapSide::Left, 100);
        let (_, at_start) = d.indicator(100).unwrap();
        let (_, mid)      = d.indicator(400).unwrap();
        assert!(at_start < mid);
        assert_eq!(mid, 1.0);
        assert!(d.indicator(700).is_none());
    }

    #[test]
    fn reset_forgets_previous_tap() {
        let mut d = DoubleTapDetector::default();
        d.tap(TapSide::Left, 0);
        d.reset();
        assert_eq!(d.tap(TapSide::Left, 50), None);
    }
}
