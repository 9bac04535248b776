use std::time::{Duration, Instant};

/// Frame-rate summary over one reporting window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub frames: u32,
    pub elapsed: Duration,
}

impl FrameReport {
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { self.frames as f64 / secs } else { 0.0 }
    }

    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() * 1000.0 / self.frames as f64
    }
}

/// Counts presented frames and produces a report once per `interval`.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    window_start: Option<Instant>,
    frames: u32,
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_start: None,
            frames: 0,
        }
    }

    /// Records one frame at `now`; returns a report when the interval elapsed.
    pub fn record(&mut self, now: Instant) -> Option<FrameReport> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.interval {
            return None;
        }

        let report = FrameReport {
            frames: self.frames,
            elapsed,
        };
        self.window_start = Some(now);
        self.frames = 0;
        Some(report)
    }

    /// Records a frame and logs the report at debug level.
    pub fn record_and_log(&mut self, now: Instant) {
        if let Some(r) = self.record(now) {
            log::debug!("{:.1} fps ({:.2} ms/frame)", r.fps(), r.avg_frame_ms());
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_interval() {
        let t0 = Instant::now();
        let mut stats = FrameStats::default();

        for i in 0..60u64 {
            assert!(stats.record(t0 + Duration::from_millis(i * 10)).is_none());
        }

        let report = stats.record(t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(report.frames, 61);
        assert_eq!(report.elapsed, Duration::from_secs(1));
        assert!((report.fps() - 61.0).abs() < 1e-9);

        // The next window starts at the report time.
        assert!(stats.record(t0 + Duration::from_millis(1500)).is_none());
    }

    #[test]
    fn empty_report_has_zero_rates() {
        let r = FrameReport {
            frames: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(r.fps(), 0.0);
        assert_eq!(r.avg_frame_ms(), 0.0);
    }
}
