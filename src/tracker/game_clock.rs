use std::time::{Duration, Instant};

use log::debug;

use crate::error::TrackerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Stopped,
    Running { started_at: Instant },
}

/// Elapsed match time, independent of the role cooldowns.
///
/// While stopped the elapsed value is frozen and may be edited. Starting
/// resumes counting from whatever value is held.
#[derive(Debug, Clone)]
pub struct GameClock {
    state: State,
    /// Elapsed time accumulated before the current run.
    base_elapsed: Duration,
}

impl GameClock {
    /// Create a stopped clock at 00:00.
    pub fn new() -> Self {
        Self {
            state: State::Stopped,
            base_elapsed: Duration::ZERO,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Start counting from the held elapsed value.
    ///
    /// Starting a clock that is already running does nothing and returns
    /// false.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            debug!("Game clock already running");
            return false;
        }

        self.state = State::Running { started_at: now };
        debug!("Game clock started at {}s", self.base_elapsed.as_secs());
        true
    }

    /// Freeze the clock at its current elapsed value.
    ///
    /// Stopping a clock that is already stopped does nothing and returns
    /// false.
    pub fn stop(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            debug!("Game clock already stopped");
            return false;
        }

        self.base_elapsed = self.elapsed(now);
        self.state = State::Stopped;
        debug!("Game clock stopped at {}s", self.base_elapsed.as_secs());
        true
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.state {
            State::Stopped => self.base_elapsed,
            State::Running { started_at } => {
                self.base_elapsed + now.saturating_duration_since(started_at)
            }
        }
    }

    /// Re-seed the elapsed value.
    ///
    /// Only allowed while stopped. An out-of-range value resets the clock to
    /// 00:00 before the error is returned.
    ///
    /// # Arguments
    ///
    /// * `minutes` - Whole minutes, 0-59.
    /// * `seconds` - Whole seconds, 0-59.
    pub fn set_elapsed(&mut self, minutes: i64, seconds: i64) -> Result<(), TrackerError> {
        self.ensure_stopped()?;
        self.seed(minutes, seconds)
    }

    /// Re-seed the elapsed value from `MM:SS` text.
    ///
    /// Only allowed while stopped. Text that does not parse, or is out of
    /// range, resets the clock to 00:00 before the error is returned.
    pub fn set_elapsed_text(&mut self, text: &str) -> Result<(), TrackerError> {
        self.ensure_stopped()?;

        match parse_game_time(text) {
            Ok((minutes, seconds)) => self.seed(minutes, seconds),
            Err(err) => {
                debug!("{err}, resetting game clock to 00:00");
                self.base_elapsed = Duration::ZERO;
                Err(err)
            }
        }
    }

    fn ensure_stopped(&self) -> Result<(), TrackerError> {
        if self.is_running() {
            return Err(TrackerError::InvalidState {
                action: "set the game time",
            });
        }
        Ok(())
    }

    fn seed(&mut self, minutes: i64, seconds: i64) -> Result<(), TrackerError> {
        if !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
            debug!("Game time {minutes}:{seconds} out of range, resetting game clock to 00:00");
            self.base_elapsed = Duration::ZERO;
            return Err(TrackerError::InvalidRange { minutes, seconds });
        }

        // Both values are within 0..60 here
        self.base_elapsed = Duration::from_secs((minutes * 60 + seconds) as u64);
        debug!("Game clock set to {minutes:02}:{seconds:02}");
        Ok(())
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `MM:SS` text into minutes and seconds.
///
/// Each side may carry surrounding whitespace. Values are not range checked.
pub fn parse_game_time(text: &str) -> Result<(i64, i64), TrackerError> {
    let invalid = || TrackerError::InvalidFormat {
        input: text.to_string(),
    };

    let (minutes, seconds) = text.split_once(':').ok_or_else(invalid)?;
    let minutes = minutes.trim().parse().map_err(|_| invalid())?;
    let seconds = seconds.trim().parse().map_err(|_| invalid())?;
    Ok((minutes, seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{ManualTime, TimeSource};

    #[test]
    fn starts_stopped_at_zero() {
        let time = ManualTime::new();
        let clock = GameClock::new();

        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(time.now()), Duration::ZERO);
    }

    #[test]
    fn counts_while_running() {
        let time = ManualTime::new();
        let mut clock = GameClock::new();

        assert!(clock.start(time.now()));
        time.advance(Duration::from_secs(75));
        assert_eq!(clock.elapsed(time.now()), Duration::from_secs(75));
    }

    #[test]
    fn stop_freezes_and_start_resumes() {
        let time = ManualTime::new();
        let mut clock = GameClock::new();

        clock.start(time.now());
        time.advance(Duration::from_secs(75));
        assert!(clock.stop(time.now()));

        time.advance(Duration::from_secs(30));
        assert_eq!(clock.elapsed(time.now()), Duration::from_secs(75));

        clock.start(time.now());
        time.advance(Duration::from_secs(5));
        assert_eq!(clock.elapsed(time.now()), Duration::from_secs(80));
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let time = ManualTime::new();
        let mut clock = GameClock::new();

        assert!(!clock.stop(time.now()));

        clock.start(time.now());
        time.advance(Duration::from_secs(10));
        assert!(!clock.start(time.now()));
        time.advance(Duration::from_secs(10));
        assert_eq!(clock.elapsed(time.now()), Duration::from_secs(20));

        clock.stop(time.now());
        assert!(!clock.stop(time.now()));
        assert_eq!(clock.elapsed(time.now()), Duration::from_secs(20));
    }

    #[test]
    fn elapsed_never_decreases_while_running() {
        let time = ManualTime::new();
        let mut clock = GameClock::new();
        clock.start(time.now());

        let mut last = Duration::ZERO;
        for _ in 0..100 {
            time.advance(Duration::from_millis(rand::random::<u8>() as u64));
            let elapsed = clock.elapsed(time.now());
            assert!(elapsed >= last);
            last = elapsed;
        }
    }

    #[test]
    fn set_from_text_while_stopped() {
        let time = ManualTime::new();
        let mut clock = GameClock::new();

        clock.set_elapsed_text("12:34").unwrap();
        assert_eq!(clock.elapsed(time.now()), Duration::from_secs(754));

        clock.start(time.now());
        time.advance(Duration::from_secs(6));
        assert_eq!(clock.elapsed(time.now()), Duration::from_secs(760));
    }

    #[test]
    fn set_from_numbers() {
        let time = ManualTime::new();
        let mut clock = GameClock::new();

        clock.set_elapsed(59, 59).unwrap();
        assert_eq!(clock.elapsed(time.now()), Duration::from_secs(3599));
        clock.set_elapsed(0, 0).unwrap();
        assert_eq!(clock.elapsed(time.now()), Duration::ZERO);
    }

    #[test]
    fn out_of_range_resets_to_zero() {
        let time = ManualTime::new();
        let mut clock = GameClock::new();

        clock.set_elapsed_text("10:00").unwrap();
        assert_eq!(
            clock.set_elapsed_text("99:99"),
            Err(TrackerError::InvalidRange {
                minutes: 99,
                seconds: 99
            })
        );
        assert_eq!(clock.elapsed(time.now()), Duration::ZERO);

        clock.set_elapsed(5, 0).unwrap();
        assert!(clock.set_elapsed(-1, 0).is_err());
        assert_eq!(clock.elapsed(time.now()), Duration::ZERO);
    }

    #[test]
    fn malformed_text_resets_to_zero() {
        let time = ManualTime::new();
        let mut clock = GameClock::new();

        for input in ["", "1234", "ab:cd", "1:2:3", ":30", "12:"] {
            clock.set_elapsed(1, 1).unwrap();
            assert_eq!(
                clock.set_elapsed_text(input),
                Err(TrackerError::InvalidFormat {
                    input: input.to_string()
                })
            );
            assert_eq!(clock.elapsed(time.now()), Duration::ZERO);
        }
    }

    #[test]
    fn rejected_while_running() {
        let time = ManualTime::new();
        let mut clock = GameClock::new();

        clock.set_elapsed_text("01:00").unwrap();
        clock.start(time.now());
        time.advance(Duration::from_secs(15));

        let err = TrackerError::InvalidState {
            action: "set the game time",
        };
        assert_eq!(clock.set_elapsed_text("12:34"), Err(err.clone()));
        assert_eq!(clock.set_elapsed_text("garbage"), Err(err.clone()));
        assert_eq!(clock.set_elapsed(2, 0), Err(err));
        assert_eq!(clock.elapsed(time.now()), Duration::from_secs(75));
        assert!(clock.is_running());
    }

    #[test]
    fn parses_game_time() {
        assert_eq!(parse_game_time("00:00").unwrap(), (0, 0));
        assert_eq!(parse_game_time(" 7 : 05 ").unwrap(), (7, 5));
        assert_eq!(parse_game_time("-1:30").unwrap(), (-1, 30));
        assert!(parse_game_time("7").is_err());
        assert!(parse_game_time("7.5:00").is_err());
    }
}
