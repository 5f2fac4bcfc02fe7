//! Playback state machine.
//!
//! ```text
//! Stopped --load--> Paused <--pause/step/scrub-- Playing
//!                   Paused --play--> Playing
//!   any   --unload--> Stopped
//! ```
//!
//! The position always lies in `[0, turn_count - 1]` while a replay is
//! loaded. Reaching the final turn while playing pauses; there is no
//! wraparound.

use std::num::NonZeroU64;
use std::time::Duration;

/// Speed multipliers offered as 1x / 2x / 3x.
pub const SPEED_MULTIPLIERS: [u32; 3] = [3, 6, 9];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

/// User-driven playback actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
    Toggle,
    /// Relative move; negative steps go back.
    Step(i64),
    /// Absolute move to a turn index.
    Scrub(i64),
    First,
    Last,
    Faster,
    Slower,
    ToggleFollow,
}

#[derive(Clone, Debug)]
pub struct Playback {
    state: PlaybackState,
    position: u64,
    turn_count: u64,
    speed_level: usize,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Playback {
    pub fn new(speed_level: usize) -> Self {
        Self {
            state: PlaybackState::Stopped,
            position: 0,
            turn_count: 0,
            speed_level: speed_level.min(SPEED_MULTIPLIERS.len() - 1),
        }
    }

    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    pub const fn position(&self) -> u64 {
        self.position
    }

    pub const fn turn_count(&self) -> u64 {
        self.turn_count
    }

    pub const fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing)
    }

    /// Highest valid position, or `None` when stopped.
    pub fn last_turn(&self) -> Option<u64> {
        self.turn_count.checked_sub(1)
    }

    /// Any state to `Paused` at turn 0.
    pub fn load(&mut self, turn_count: NonZeroU64) {
        self.state = PlaybackState::Paused;
        self.turn_count = turn_count.get();
        self.position = 0;
    }

    /// Any state to `Stopped`.
    pub fn unload(&mut self) {
        self.state = PlaybackState::Stopped;
        self.turn_count = 0;
        self.position = 0;
    }

    /// Raises the turn count when the store has grown. Never shrinks it.
    pub fn extend(&mut self, turn_count: u64) -> bool {
        if self.state == PlaybackState::Stopped || turn_count <= self.turn_count {
            return false;
        }
        self.turn_count = turn_count;
        true
    }

    /// `Paused` to `Playing`. Returns whether the state changed.
    pub fn play(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.state = PlaybackState::Playing;
        true
    }

    /// `Playing` to `Paused`. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.state = PlaybackState::Paused;
        true
    }

    pub fn toggle(&mut self) -> bool {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
            PlaybackState::Stopped => false,
        }
    }

    /// Moves by `delta`, clamped, and pauses. Returns whether the position moved.
    pub fn step(&mut self, delta: i64) -> bool {
        let target = (self.position as i64).saturating_add(delta);
        self.scrub(target)
    }

    /// Jumps to `turn`, clamped, and pauses. Returns whether the position moved.
    pub fn scrub(&mut self, turn: i64) -> bool {
        let Some(last) = self.last_turn() else {
            return false;
        };
        self.state = PlaybackState::Paused;
        let target = turn.clamp(0, last as i64) as u64;
        let moved = target != self.position;
        self.position = target;
        moved
    }

    pub fn first(&mut self) -> bool {
        self.scrub(0)
    }

    pub fn last(&mut self) -> bool {
        self.scrub(i64::MAX)
    }

    /// One playback tick.
    ///
    /// While `Playing`, advances one turn and returns the new position; the
    /// move that lands on the final turn also pauses. Idle otherwise.
    pub fn tick(&mut self) -> Option<u64> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        let last = self.last_turn()?;
        if self.position >= last {
            self.state = PlaybackState::Paused;
            return None;
        }
        self.position += 1;
        if self.position == last {
            self.state = PlaybackState::Paused;
        }
        Some(self.position)
    }

    pub const fn speed_level(&self) -> usize {
        self.speed_level
    }

    pub const fn speed_multiplier(&self) -> u32 {
        SPEED_MULTIPLIERS[self.speed_level]
    }

    pub fn faster(&mut self) -> bool {
        if self.speed_level + 1 >= SPEED_MULTIPLIERS.len() {
            return false;
        }
        self.speed_level += 1;
        true
    }

    pub fn slower(&mut self) -> bool {
        if self.speed_level == 0 {
            return false;
        }
        self.speed_level -= 1;
        true
    }

    /// Delay between ticks at the current speed.
    pub fn tick_delay(&self, base_interval: Duration) -> Duration {
        base_interval / self.speed_multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(turns: u64) -> Playback {
        let mut playback = Playback::default();
        playback.load(NonZeroU64::new(turns).unwrap());
        playback
    }

    #[test]
    fn starts_stopped_and_ignores_commands() {
        let mut playback = Playback::default();
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert!(!playback.play());
        assert!(!playback.step(1));
        assert!(!playback.scrub(3));
        assert_eq!(playback.tick(), None);
        assert_eq!(playback.state(), PlaybackState::Stopped);
    }

    #[test]
    fn load_pauses_at_first_turn() {
        let playback = loaded(12);
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.position(), 0);
        assert_eq!(playback.last_turn(), Some(11));
    }

    #[test]
    fn ten_ticks_advance_ten_turns() {
        let mut playback = loaded(50);
        assert!(playback.play());
        for _ in 0..10 {
            playback.tick();
        }
        playback.pause();
        assert_eq!(playback.position(), 10);
        assert_eq!(playback.state(), PlaybackState::Paused);
    }

    #[test]
    fn short_replay_stops_at_final_turn() {
        let mut playback = loaded(4);
        playback.play();
        let moves: Vec<_> = (0..10).filter_map(|_| playback.tick()).collect();
        assert_eq!(moves, [1, 2, 3]);
        assert_eq!(playback.state(), PlaybackState::Paused);
        playback.pause();
        assert_eq!(playback.position(), 3);
        assert_eq!(playback.state(), PlaybackState::Paused);
    }

    #[test]
    fn playing_from_final_turn_pauses_without_moving() {
        let mut playback = loaded(1);
        assert!(playback.play());
        assert_eq!(playback.tick(), None);
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.position(), 0);
    }

    #[test]
    fn scrub_then_step_back() {
        let mut playback = loaded(20);
        playback.scrub(5);
        playback.step(-1);
        assert_eq!(playback.position(), 4);
        assert_eq!(playback.state(), PlaybackState::Paused);
    }

    #[test]
    fn steps_clamp_to_bounds() {
        let mut playback = loaded(8);
        assert!(!playback.step(-1));
        assert_eq!(playback.position(), 0);
        playback.step(i64::MIN);
        assert_eq!(playback.position(), 0);
        playback.step(100);
        assert_eq!(playback.position(), 7);
        playback.scrub(-3);
        assert_eq!(playback.position(), 0);
        playback.last();
        assert_eq!(playback.position(), 7);
        playback.first();
        assert_eq!(playback.position(), 0);
    }

    #[test]
    fn step_while_playing_pauses() {
        let mut playback = loaded(8);
        playback.play();
        playback.step(1);
        assert_eq!(playback.state(), PlaybackState::Paused);
        assert_eq!(playback.position(), 1);
    }

    #[test]
    fn unload_returns_to_stopped() {
        let mut playback = loaded(8);
        playback.play();
        playback.unload();
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.turn_count(), 0);
        assert_eq!(playback.last_turn(), None);
    }

    #[test]
    fn extend_only_grows() {
        let mut playback = loaded(3);
        assert!(playback.extend(5));
        assert_eq!(playback.turn_count(), 5);
        assert!(!playback.extend(4));
        assert_eq!(playback.turn_count(), 5);

        playback.unload();
        assert!(!playback.extend(9));
    }

    #[test]
    fn toggle_flips_between_playing_and_paused() {
        let mut playback = loaded(3);
        assert!(playback.toggle());
        assert!(playback.is_playing());
        assert!(playback.toggle());
        assert_eq!(playback.state(), PlaybackState::Paused);
    }

    #[test]
    fn speed_levels_divide_interval() {
        let mut playback = Playback::default();
        let base = Duration::from_millis(1800);
        assert_eq!(playback.speed_multiplier(), 6);
        assert_eq!(playback.tick_delay(base), Duration::from_millis(300));

        assert!(playback.faster());
        assert!(!playback.faster());
        assert_eq!(playback.tick_delay(base), Duration::from_millis(200));

        playback.slower();
        playback.slower();
        assert!(!playback.slower());
        assert_eq!(playback.tick_delay(base), Duration::from_millis(600));
    }
}
