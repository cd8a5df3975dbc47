//! Frame clock
//!
//! Turns host refresh timestamps into elapsed milliseconds. The first frame
//! has nothing to diff against and yields no tick.

/// Clamp a raw frame delta to `[0, max]`; non-finite deltas become 0
#[inline]
pub fn clamp_delta(delta_ms: f32, max_ms: f32) -> f32 {
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        0.0
    } else {
        delta_ms.min(max_ms)
    }
}

/// Supplies elapsed time between host refreshes
#[derive(Debug, Clone)]
pub struct SimulationClock {
    last_timestamp: Option<f64>,
    max_delta: f32,
}

impl SimulationClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_timestamp: None,
            max_delta,
        }
    }

    /// Feed a refresh timestamp (ms); returns the clamped delta, or `None`
    /// on the first frame
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<f32> {
        let previous = self.last_timestamp.replace(timestamp_ms)?;
        let raw = (timestamp_ms - previous) as f32;
        let delta = clamp_delta(raw, self.max_delta);
        if delta != raw {
            log::debug!("Clamped frame delta {raw:.1}ms -> {delta:.1}ms");
        }
        Some(delta)
    }

    /// Forget the previous frame (teardown or restart)
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}
