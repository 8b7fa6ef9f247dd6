//! Activity Log System
//!
//! Keeps the most recent crime events and running counters so a run can be
//! inspected without replaying snapshots.

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::simulation::crime::{CrimeKind, CrimeOutcome, CrimeResolution};
use crate::simulation::types::{PersonId, SimTick};

/// Maximum number of entries to keep in the activity log
const MAX_ACTIVITY_ENTRIES: usize = 200;

/// Category of activity event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityCategory {
    /// Crime attempt that ended in a capture
    Arrest,
    /// Crime that paid off
    Crime,
    /// Violent encounter ending in a death
    Murder,
    /// Offender climbed a status rank
    Promotion,
    /// Released prisoner left crime
    Desistance,
}

impl ActivityCategory {
    /// Get short label for display
    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::Arrest => "ARR",
            ActivityCategory::Crime => "CRM",
            ActivityCategory::Murder => "!!",
            ActivityCategory::Promotion => "UP",
            ActivityCategory::Desistance => "OUT",
        }
    }
}

/// An activity log entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub tick: SimTick,
    pub category: ActivityCategory,
    /// Person the event is about
    pub person: PersonId,
    pub crime: Option<CrimeKind>,
    pub message: String,
    /// Importance (higher = more important, shown first)
    pub importance: u8,
}

/// The activity log store
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    /// Counters for stats
    pub stats: ActivityStats,
}

/// Statistics about activities
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityStats {
    pub total_events: u64,
    pub arrests: u64,
    pub crimes: u64,
    pub murders: u64,
    pub promotions: u64,
    pub desistances: u64,
}

impl ActivityLog {
    pub fn new() -> Self {
        ActivityLog {
            entries: VecDeque::with_capacity(MAX_ACTIVITY_ENTRIES),
            stats: ActivityStats::default(),
        }
    }

    /// Add a new activity entry
    pub fn log(&mut self, entry: ActivityEntry) {
        self.stats.total_events += 1;
        match entry.category {
            ActivityCategory::Arrest => self.stats.arrests += 1,
            ActivityCategory::Crime => self.stats.crimes += 1,
            ActivityCategory::Murder => self.stats.murders += 1,
            ActivityCategory::Promotion => self.stats.promotions += 1,
            ActivityCategory::Desistance => self.stats.desistances += 1,
        }

        self.entries.push_back(entry);

        while self.entries.len() > MAX_ACTIVITY_ENTRIES {
            self.entries.pop_front();
        }
    }

    /// Record a resolved crime and any promotion it caused
    pub fn log_crime(&mut self, tick: SimTick, outcome: &CrimeOutcome) {
        let (category, message, importance) = match outcome.resolution {
            CrimeResolution::Caught { sentence_months } => (
                ActivityCategory::Arrest,
                format!("{} caught for {}, {} months", outcome.offender, outcome.kind, sentence_months),
                3,
            ),
            resolution if resolution.is_murder() => (
                ActivityCategory::Murder,
                format!("{} killed {} during {}", outcome.offender, outcome.victim, outcome.kind),
                10,
            ),
            resolution => (
                ActivityCategory::Crime,
                format!(
                    "{} committed {} against {} for {:.2}",
                    outcome.offender,
                    outcome.kind,
                    outcome.victim,
                    resolution.gain()
                ),
                1,
            ),
        };
        self.log(ActivityEntry {
            tick,
            category,
            person: outcome.offender,
            crime: Some(outcome.kind),
            message,
            importance,
        });

        if outcome.status.promoted() {
            self.log(ActivityEntry {
                tick,
                category: ActivityCategory::Promotion,
                person: outcome.offender,
                crime: Some(outcome.kind),
                message: format!("{} rose to {}", outcome.offender, outcome.status.to),
                importance: 5,
            });
        }
    }

    pub fn log_desistance(&mut self, tick: SimTick, person: PersonId, immune: bool) {
        let message = if immune {
            format!("{} left the underworld with protection", person)
        } else {
            format!("{} left crime after release", person)
        };
        self.log(ActivityEntry {
            tick,
            category: ActivityCategory::Desistance,
            person,
            crime: None,
            message,
            importance: 4,
        });
    }

    /// Get recent entries (newest first)
    pub fn recent_entries(&self, count: usize) -> Vec<&ActivityEntry> {
        self.entries.iter().rev().take(count).collect()
    }

    /// Entries about one person, newest first
    pub fn entries_for(&self, person: PersonId, count: usize) -> Vec<&ActivityEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.person == person)
            .take(count)
            .collect()
    }

    /// Get high-importance entries (murders, promotions)
    pub fn important_entries(&self, count: usize) -> Vec<&ActivityEntry> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.importance.cmp(&a.importance));
        entries.into_iter().take(count).collect()
    }

    /// Get total entry count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::progression::StatusChange;
    use crate::simulation::types::CriminalStatus;

    fn outcome(resolution: CrimeResolution, promoted: bool) -> CrimeOutcome {
        CrimeOutcome {
            offender: PersonId(1),
            victim: PersonId(2),
            kind: CrimeKind::Theft,
            resolution,
            status: StatusChange {
                from: CriminalStatus::NonCriminal,
                to: if promoted { CriminalStatus::Petty } else { CriminalStatus::NonCriminal },
                score: 33.0,
            },
        }
    }

    #[test]
    fn test_log_crime_categories() {
        let mut log = ActivityLog::new();
        log.log_crime(SimTick(1), &outcome(CrimeResolution::Caught { sentence_months: 24 }, true));
        log.log_crime(SimTick(1), &outcome(CrimeResolution::Gain { amount: 12.5 }, false));
        log.log_crime(SimTick(2), &outcome(CrimeResolution::Murder, false));

        assert_eq!(log.stats.arrests, 1);
        assert_eq!(log.stats.promotions, 1);
        assert_eq!(log.stats.crimes, 1);
        assert_eq!(log.stats.murders, 1);
        assert_eq!(log.len(), 4);
        assert_eq!(log.important_entries(1)[0].category, ActivityCategory::Murder);
        assert_eq!(log.recent_entries(1)[0].tick, SimTick(2));
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = ActivityLog::new();
        for i in 0..(MAX_ACTIVITY_ENTRIES as u32 + 20) {
            log.log_desistance(SimTick(i as u64), PersonId(i), false);
        }
        assert_eq!(log.len(), MAX_ACTIVITY_ENTRIES);
        assert_eq!(log.stats.desistances, MAX_ACTIVITY_ENTRIES as u64 + 20);
        assert!(log.entries_for(PersonId(0), 5).is_empty());
        assert_eq!(log.entries_for(PersonId(30), 5).len(), 1);
    }
}
