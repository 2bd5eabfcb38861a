//! Frame cursor for tick-driven sprite strip animation.
//!
//! Frames advance once every `delay` ticks. Looping animations wrap; one-shot
//! animations hold on their last frame until the state changes.

/// Per-character animation position within the current sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCursor {
    /// Current frame index into the sheet.
    pub frame: usize,
    /// Ticks accumulated on the current frame.
    pub tick: u32,
    /// Ticks per frame, fixed per character.
    pub delay: u32,
}

impl FrameCursor {
    pub fn new(delay: u32) -> Self {
        Self {
            frame: 0,
            tick: 0,
            delay: delay.max(1),
        }
    }

    /// Start the cursor mid-cycle so a crowd does not animate in lockstep.
    pub fn with_phase(mut self, frame: usize, tick: u32) -> Self {
        self.frame = frame;
        self.tick = tick;
        self
    }

    /// Restart from frame 0.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.tick = 0;
    }

    /// Advance by one tick against a sheet of `frame_count` frames.
    ///
    /// Returns true if the frame changed. A missing sheet (`None`) or an
    /// empty one leaves the cursor untouched.
    pub fn step(&mut self, frame_count: Option<usize>, looping: bool) -> bool {
        let Some(count) = frame_count.filter(|&n| n > 0) else {
            return false;
        };
        self.tick += 1;
        if self.tick < self.delay {
            return false;
        }
        self.tick = 0;
        if looping {
            self.frame = (self.frame + 1) % count;
            true
        } else if self.frame + 1 < count {
            self.frame += 1;
            true
        } else {
            self.frame = count - 1;
            false
        }
    }

    /// Frame to display for a sheet of `frame_count` frames; always in range.
    pub fn display_frame(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            0
        } else {
            self.frame % frame_count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_every_delay_ticks() {
        let mut cursor = FrameCursor::new(3);
        assert!(!cursor.step(Some(4), true));
        assert!(!cursor.step(Some(4), true));
        assert!(cursor.step(Some(4), true));
        assert_eq!(cursor.frame, 1);
        assert_eq!(cursor.tick, 0);
    }

    #[test]
    fn looping_wraps() {
        let mut cursor = FrameCursor::new(1);
        for _ in 0..4 {
            cursor.step(Some(4), true);
        }
        assert_eq!(cursor.frame, 0);
    }

    #[test]
    fn one_shot_holds_last_frame() {
        let mut cursor = FrameCursor::new(1);
        for _ in 0..10 {
            cursor.step(Some(3), false);
        }
        assert_eq!(cursor.frame, 2);
    }

    #[test]
    fn missing_sheet_is_a_no_op() {
        let mut cursor = FrameCursor::new(1).with_phase(2, 0);
        assert!(!cursor.step(None, true));
        assert!(!cursor.step(Some(0), true));
        assert_eq!(cursor.frame, 2);
        assert_eq!(cursor.tick, 0);
    }

    #[test]
    fn out_of_range_phase_recovers() {
        // A phase picked before the sheet loaded may exceed its length
        let mut cursor = FrameCursor::new(1).with_phase(11, 0);
        assert_eq!(cursor.display_frame(8), 3);
        cursor.step(Some(8), true);
        assert!(cursor.frame < 8);
    }

    #[test]
    fn zero_delay_is_clamped() {
        let cursor = FrameCursor::new(0);
        assert_eq!(cursor.delay, 1);
    }
}
