// Timing pieces of the animation loop: the host's callback scheduler, the frame-rate
// gate and the pointer spawn throttle.

/// Handle returned by `requestAnimationFrame` / `setTimeout`.
pub type CallbackHandle = i32;

/// The host's "call me back later" primitives.
///
/// Returning `None` means the host refused the request; the caller treats that as
/// nothing pending.
pub trait Scheduler {
    /// Request a callback before the next paint.
    fn request_frame(&mut self) -> Option<CallbackHandle>;
    fn cancel_frame(&mut self, handle: CallbackHandle);
    /// One-shot timer.
    fn start_timer(&mut self, delay_ms: u32) -> Option<CallbackHandle>;
    fn cancel_timer(&mut self, handle: CallbackHandle);
}

/// Lets frames through at most every `interval_ms`, carrying the remainder forward so
/// the effective rate doesn't drift below target on a faster display.
#[derive(Clone, Debug)]
pub struct FrameLimiter {
    interval_ms: f64,
    last_frame: f64,
}

impl FrameLimiter {
    pub fn new(interval_ms: f64) -> FrameLimiter {
        FrameLimiter {
            interval_ms,
            last_frame: 0.0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn last_frame(&self) -> f64 {
        self.last_frame
    }

    pub fn ready(&mut self, now: f64) -> bool {
        let elapsed = now - self.last_frame;
        if elapsed < self.interval_ms {
            return false;
        }
        self.last_frame = now - (elapsed % self.interval_ms);
        true
    }
}

/// Drops events that arrive within `min_interval_ms` of the last accepted one.
#[derive(Clone, Debug)]
pub struct Throttle {
    min_interval_ms: f64,
    last_accepted: Option<f64>,
}

impl Throttle {
    pub fn new(min_interval_ms: f64) -> Throttle {
        Throttle {
            min_interval_ms,
            last_accepted: None,
        }
    }

    pub fn try_accept(&mut self, now: f64) -> bool {
        let accept = match self.last_accepted {
            None => true,
            Some(last) => now - last > self.min_interval_ms,
        };
        if accept {
            self.last_accepted = Some(now);
        }
        accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_gates_until_interval_elapses() {
        let mut limiter = FrameLimiter::new(1000.0 / 30.0);
        assert!(!limiter.ready(0.0));
        assert!(!limiter.ready(20.0));
        assert!(limiter.ready(40.0));
        assert!(!limiter.ready(50.0));
        assert!(limiter.ready(80.0));
    }

    #[test]
    fn limiter_carries_remainder() {
        let mut limiter = FrameLimiter::new(10.0);
        assert!(limiter.ready(13.0));
        assert_eq!(limiter.last_frame(), 10.0);
        // 20 - 10 = 10, exactly one interval
        assert!(limiter.ready(20.0));
        assert_eq!(limiter.last_frame(), 20.0);
    }

    #[test]
    fn limiter_ignores_clock_going_backwards() {
        let mut limiter = FrameLimiter::new(10.0);
        assert!(limiter.ready(100.0));
        assert!(!limiter.ready(50.0));
        assert!(limiter.ready(110.0));
    }

    #[test]
    fn throttle_accepts_first_then_spaces_out() {
        let mut throttle = Throttle::new(50.0);
        assert!(throttle.try_accept(0.0));
        assert!(!throttle.try_accept(10.0));
        assert!(!throttle.try_accept(50.0));
        assert!(throttle.try_accept(51.0));
        // rejected requests don't move the window
        assert!(!throttle.try_accept(100.0));
        assert!(throttle.try_accept(101.5));
    }
}
