use std::time::{Duration, Instant};

use crate::player::{PREMIER_LEAGUE_TEAMS, PlayerFilters, Position};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

#[derive(Debug, Clone)]
struct Armed<T> {
    value: T,
    due: Instant,
}

/// Single-slot timer: arming replaces whatever was armed before.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    armed: Option<Armed<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, armed: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn arm(&mut self, value: T, now: Instant) {
        self.armed = Some(Armed {
            value,
            due: now + self.delay,
        });
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.armed.take().map(|armed| armed.value)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.armed.as_ref().map(|armed| &armed.value)
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed
            .as_ref()
            .map(|armed| armed.due.saturating_duration_since(now))
    }

    /// Fires at most once per arm, once `now` has reached the deadline.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.armed {
            Some(armed) if armed.due <= now => self.cancel(),
            _ => None,
        }
    }
}

/// Committed filters plus the debounced name draft.
///
/// Every method that can commit returns whether the committed filters changed; `revision`
/// counts those commits so the caller refetches exactly once per change.
#[derive(Debug, Clone)]
pub struct FilterState {
    committed: PlayerFilters,
    name_draft: String,
    name_timer: Debouncer<String>,
    nation_draft: String,
    revision: u64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl FilterState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            committed: PlayerFilters::default(),
            name_draft: String::new(),
            name_timer: Debouncer::new(debounce),
            nation_draft: String::new(),
            revision: 0,
        }
    }

    pub fn filters(&self) -> &PlayerFilters {
        &self.committed
    }

    pub fn name_draft(&self) -> &str {
        &self.name_draft
    }

    /// Nation text as typed; the committed value is trimmed.
    pub fn nation_draft(&self) -> &str {
        &self.nation_draft
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn search_pending(&self) -> bool {
        self.name_timer.is_armed()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn set_name_draft(&mut self, text: impl Into<String>, now: Instant) {
        self.name_draft = text.into();
        self.name_timer.arm(self.name_draft.clone(), now);
    }

    pub fn push_name_char(&mut self, ch: char, now: Instant) {
        let mut text = self.name_draft.clone();
        text.push(ch);
        self.set_name_draft(text, now);
    }

    pub fn pop_name_char(&mut self, now: Instant) {
        let mut text = self.name_draft.clone();
        if text.pop().is_some() {
            self.set_name_draft(text, now);
        }
    }

    /// Commits the name draft once the debounce delay has passed without new keystrokes.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(name) = self.name_timer.poll(now) else {
            return false;
        };
        let next = PlayerFilters {
            name: Some(name),
            ..self.committed.clone()
        };
        self.commit(next)
    }

    pub fn set_team(&mut self, team: Option<String>) -> bool {
        let next = PlayerFilters {
            team,
            ..self.committed.clone()
        };
        self.commit(next)
    }

    pub fn set_position(&mut self, position: Option<String>) -> bool {
        let next = PlayerFilters {
            position,
            ..self.committed.clone()
        };
        self.commit(next)
    }

    pub fn set_nation(&mut self, nation: Option<String>) -> bool {
        self.nation_draft = nation.clone().unwrap_or_default();
        let next = PlayerFilters {
            nation,
            ..self.committed.clone()
        };
        self.commit(next)
    }

    /// Resets every dimension in one commit and drops any pending search.
    pub fn clear(&mut self) -> bool {
        self.name_draft.clear();
        self.name_timer.cancel();
        self.nation_draft.clear();
        self.commit(PlayerFilters::default())
    }

    fn commit(&mut self, next: PlayerFilters) -> bool {
        let next = next.normalized();
        if next == self.committed {
            return false;
        }
        self.committed = next;
        self.revision += 1;
        true
    }
}

/// All teams -> Arsenal -> ... -> Wolverhampton -> all teams.
pub fn cycle_team(current: Option<&str>) -> Option<String> {
    let next_idx = match current.and_then(|t| PREMIER_LEAGUE_TEAMS.iter().position(|c| *c == t)) {
        Some(idx) => idx + 1,
        None => 0,
    };
    PREMIER_LEAGUE_TEAMS.get(next_idx).map(|t| t.to_string())
}

pub fn cycle_position(current: Option<&str>) -> Option<String> {
    let next_idx = match current.and_then(Position::parse) {
        Some(pos) => Position::ALL.iter().position(|p| *p == pos).unwrap_or_default() + 1,
        None => 0,
    };
    Position::ALL.get(next_idx).map(|p| p.code().to_string())
}
