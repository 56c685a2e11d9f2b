use std::time::Duration;

/// Time between automatic one-row descents at level 1.
const INITIAL_DROP_INTERVAL: Duration = Duration::from_millis(1000);

/// Computes the drop interval for a level: 100ms faster per level above 1,
/// floored at 100ms.
fn drop_interval_for(level: usize) -> Duration {
    let steps = (level as u64).saturating_sub(1) * 100;
    Duration::from_millis(100 + 900u64.saturating_sub(steps))
}

/// Session counters: score, level, cleared lines, and drop pacing.
///
/// Each lock event that clears `n > 0` rows awards `n * 100 * level` points
/// (using the level in effect before the update), then re-derives the level
/// from the line total (one level per 10 lines, starting at 1) and the drop
/// interval from the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    total_cleared_lines: usize,
    completed_pieces: usize,
    drop_interval: Duration,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates counters at their game-start values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            total_cleared_lines: 0,
            completed_pieces: 0,
            drop_interval: INITIAL_DROP_INTERVAL,
        }
    }

    /// Points earned from line clears.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Current level, starting at 1 and rising with every 10 cleared lines.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Total number of lines cleared this session.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Total number of pieces locked into place this session.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Time between automatic one-row descents at the current level.
    #[must_use]
    pub const fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Updates the counters after a piece lock that cleared `cleared_lines`
    /// rows (possibly zero).
    pub fn record_lock(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        if cleared_lines == 0 {
            return;
        }
        self.total_cleared_lines += cleared_lines;
        self.score += cleared_lines * 100 * self.level;
        self.level = self.total_cleared_lines / 10 + 1;
        self.drop_interval = drop_interval_for(self.level);
    }
}
