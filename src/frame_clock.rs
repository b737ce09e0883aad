use log::debug;

// Measures the wall-clock time between frames and reports frames that blew
// through their budget.
#[derive(Debug)]
pub struct FrameClock {
    frame_start: std::time::Instant,
    pub frame_budget: std::time::Duration,
    overruns: u64,
}

impl FrameClock {
    pub fn new(frame_budget: std::time::Duration) -> FrameClock {
        FrameClock {
            frame_start: std::time::Instant::now(),
            frame_budget,
            overruns: 0,
        }
    }

    // Returns the time since the previous tick and starts a new frame.
    pub fn tick(&mut self) -> std::time::Duration {
        self.tick_at(std::time::Instant::now())
    }

    pub fn tick_at(&mut self, now: std::time::Instant) -> std::time::Duration {
        let delta_t = now
            .checked_duration_since(self.frame_start)
            .unwrap_or_default();
        if delta_t > self.frame_budget * 2 {
            self.overruns += 1;
            debug!(
                "Frame over time budget by: {:?}",
                delta_t - self.frame_budget
            );
        }
        self.frame_start = now;
        delta_t
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}
