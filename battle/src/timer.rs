//! Countdown for the battle currently in view

use arena_protocol::{BattleId, TimeSpent};

/// Result of one pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Timer was not running; nothing changed
    Idle,
    Running { remaining: u32 },
    /// Reached zero on this pulse
    Expired,
}

/// Copy of the timer state for readers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerSnapshot {
    pub battle_id: Option<BattleId>,
    pub remaining: u32,
    pub elapsed: u32,
    pub running: bool,
}

/// Single countdown, one observed battle at a time
///
/// Expiry only stops the clock. Completing the round or the battle is left
/// to whoever observes the timer.
#[derive(Debug, Clone, Default)]
pub struct TimerService {
    battle_id: Option<BattleId>,
    duration: u32,
    remaining: u32,
    running: bool,
}

impl TimerService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, seconds: u32) {
        self.duration = seconds;
        self.remaining = seconds;
        self.running = true;
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Tick::Expired
        } else {
            Tick::Running {
                remaining: self.remaining,
            }
        }
    }

    pub fn stop(&mut self) {
        self.battle_id = None;
        self.duration = 0;
        self.remaining = 0;
        self.running = false;
    }

    /// Switch the observed battle
    ///
    /// The previous countdown is always stopped first so it can never keep
    /// ticking against a battle that is no longer in view.
    pub fn watch(&mut self, battle_id: BattleId, seconds: u32) {
        self.stop();
        self.battle_id = Some(battle_id);
        self.start(seconds);
    }

    pub fn battle_id(&self) -> Option<BattleId> {
        self.battle_id
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn elapsed(&self) -> u32 {
        self.duration - self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            battle_id: self.battle_id,
            remaining: self.remaining,
            elapsed: self.elapsed(),
            running: self.running,
        }
    }
}

/// Format seconds as `m:ss`, the same rendering as [`TimeSpent`]
pub fn format_clock(seconds: u32) -> String {
    TimeSpent(seconds).to_string()
}
