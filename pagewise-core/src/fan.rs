//! Fan animation frame selection for the status header

/// Picks the header bitmap frame that shows the fan
///
/// With more than two frames the animation steps once per blink edge while
/// the fan runs, and rests on frame 0 when it stops. With two frames the
/// spinning frame simply follows the blink signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FanAnimation {
    frames: u8,
    frame: u8,
    last_blink: bool,
}

impl FanAnimation {
    /// Animation over `frames` header bitmaps
    pub const fn new(frames: u8) -> Self {
        Self {
            frames,
            frame: 0,
            last_blink: false,
        }
    }

    /// Advance on a blink edge; call once per redraw pass
    pub fn update(&mut self, blink: bool, fan_speed: u8) {
        if self.frames <= 2 || blink == self.last_blink {
            return;
        }
        self.last_blink = blink;
        self.frame += 1;
        if fan_speed == 0 || self.frame >= self.frames {
            self.frame = 0;
        }
    }

    /// Header frame to draw on this pass
    pub const fn frame(&self, blink: bool, fan_speed: u8) -> u8 {
        if self.frames > 2 {
            self.frame
        } else if self.frames == 2 && blink && fan_speed != 0 {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_frames_follow_blink() {
        let mut fan = FanAnimation::new(2);
        fan.update(true, 200);
        assert_eq!(fan.frame(true, 200), 1);
        assert_eq!(fan.frame(false, 200), 0);
        assert_eq!(fan.frame(true, 0), 0);
    }

    #[test]
    fn test_multi_frame_steps_per_edge() {
        let mut fan = FanAnimation::new(4);
        let mut seen: heapless::Vec<u8, 8> = heapless::Vec::new();
        let mut blink = false;
        for _ in 0..6 {
            blink = !blink;
            fan.update(blink, 255);
            // Extra passes within the same blink period change nothing
            fan.update(blink, 255);
            let _ = seen.push(fan.frame(blink, 255));
        }
        assert_eq!(seen.as_slice(), &[1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn test_multi_frame_rests_when_fan_stops() {
        let mut fan = FanAnimation::new(3);
        fan.update(true, 255);
        assert_eq!(fan.frame(true, 255), 1);
        fan.update(false, 0);
        assert_eq!(fan.frame(false, 0), 0);
    }

    #[test]
    fn test_single_frame_is_static() {
        let mut fan = FanAnimation::new(1);
        fan.update(true, 255);
        assert_eq!(fan.frame(true, 255), 0);
    }
}
