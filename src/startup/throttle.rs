pub const MIN_REDRAW_INTERVAL_MS: u64 = 32;

// Rate-limits UI refreshes driven by the transfer layer's progress callback.
// One instance per transfer; the first check after construction always fires.
#[derive(Debug, Default)]
pub struct ProgressThrottle {
    last_trigger_ms: Option<u64>,
}

impl ProgressThrottle {
    pub fn new() -> ProgressThrottle {
        ProgressThrottle::default()
    }

    pub fn should_emit(&mut self, now_ms: u64, downloaded: f64, total: f64) -> bool {
        let total = if total == 0.0 { 1.0 } else { total };
        let fraction = downloaded / total;

        let interval_elapsed = match self.last_trigger_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= MIN_REDRAW_INTERVAL_MS,
        };

        // Don't refresh the GUI on every transfer tick, it slows down
        // downloading (but never suppress the final 100% notification)
        if !interval_elapsed && fraction != 1.0 {
            return false;
        }

        self.last_trigger_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_check_always_emits() {
        let mut throttle = ProgressThrottle::new();
        assert!(throttle.should_emit(0, 0.0, 100.0));
    }

    #[test]
    fn suppresses_within_the_interval() {
        let mut throttle = ProgressThrottle::new();
        assert!(throttle.should_emit(100, 10.0, 100.0));
        assert!(!throttle.should_emit(110, 20.0, 100.0));
        assert!(!throttle.should_emit(131, 30.0, 100.0));
    }

    #[test]
    fn emits_once_the_interval_has_elapsed() {
        let mut throttle = ProgressThrottle::new();
        assert!(throttle.should_emit(100, 10.0, 100.0));
        assert!(throttle.should_emit(132, 20.0, 100.0));
    }

    #[test]
    fn completion_emits_regardless_of_elapsed_time() {
        let mut throttle = ProgressThrottle::new();
        assert!(throttle.should_emit(100, 10.0, 100.0));
        assert!(throttle.should_emit(101, 100.0, 100.0));
    }

    #[test]
    fn emitting_updates_the_timestamp() {
        let mut throttle = ProgressThrottle::new();
        assert!(throttle.should_emit(100, 100.0, 100.0));
        // 100% emitted at t=101 moves the window forward too
        assert!(throttle.should_emit(101, 100.0, 100.0));
        assert!(!throttle.should_emit(110, 50.0, 100.0));
        assert!(throttle.should_emit(133, 60.0, 100.0));
    }

    #[test]
    fn zero_total_is_treated_as_one() {
        let mut throttle = ProgressThrottle::new();
        assert!(throttle.should_emit(100, 1.0, 0.0));
        // fraction is the raw byte count now, 0.5 != 1.0, so time gates it
        assert!(!throttle.should_emit(110, 0.5, 0.0));
    }
}
