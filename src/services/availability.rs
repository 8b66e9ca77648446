use crate::services::slug::{increment_slug, validate_slug, SlugError};
use crate::store::{SlugLookup, StoreError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a conflict is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Derived slugs: bump the numeric suffix until a free slug turns up.
    Auto,
    /// Hand-typed slugs: report the conflict and leave the value alone.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Accepted(String),
    Rejected(SlugError),
    /// A later check started before this one finished; its result is void.
    Superseded,
}

#[derive(Debug, Clone, Copy)]
pub struct CheckerSettings {
    pub max_auto_attempts: usize,
    pub lookup_timeout: Duration,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            max_auto_attempts: 100,
            lookup_timeout: Duration::from_secs(5),
        }
    }
}

/// Snapshot of the checker's view of the slug field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityState {
    pub candidate: String,
    pub checking: bool,
    /// `Some(true)` after the last finished check hit an existing document.
    pub conflict: Option<bool>,
    pub generation: u64,
}

/// Coordinates slug uniqueness checks for a single form session.
///
/// Every call to [`check`](Self::check) takes a new generation number. When a
/// lookup resolves after a newer check has started, the older check returns
/// [`CheckOutcome::Superseded`] and leaves the state alone.
pub struct SlugAvailabilityChecker<L: ?Sized + SlugLookup = dyn SlugLookup> {
    lookup: Arc<L>,
    settings: CheckerSettings,
    /// Holds the generation too; tickets are only handed out under this lock.
    state: Mutex<AvailabilityState>,
}

impl<L: ?Sized + SlugLookup> SlugAvailabilityChecker<L> {
    pub fn new(lookup: Arc<L>, settings: CheckerSettings) -> Self {
        Self {
            lookup,
            settings,
            state: Mutex::new(AvailabilityState::default()),
        }
    }

    pub fn state(&self) -> AvailabilityState {
        self.lock_state().clone()
    }

    pub fn is_checking(&self) -> bool {
        self.lock_state().checking
    }

    /// Void whatever check is in flight without starting another.
    pub fn cancel(&self) {
        let mut state = self.lock_state();
        state.generation += 1;
        state.checking = false;
    }

    pub async fn check(&self, candidate: &str, mode: CheckMode) -> CheckOutcome {
        let ticket = {
            let mut state = self.lock_state();
            state.generation += 1;
            state.candidate = candidate.to_string();
            state.checking = true;
            state.generation
        };

        let mut candidate = candidate.to_string();
        let mut attempts = 0;
        loop {
            // Incremented candidates can break the rules too (`/blog/` -> `/blog/-2`).
            if let Err(err) = validate_slug(&candidate) {
                return self.finish(ticket, CheckOutcome::Rejected(err), None);
            }

            attempts += 1;
            let exists = match self.lookup_once(&candidate).await {
                Ok(exists) => exists,
                Err(e) => {
                    tracing::warn!("Slug lookup for {} failed: {}", candidate, e);
                    let err = SlugError::LookupFailed(e.to_string());
                    return self.finish(ticket, CheckOutcome::Rejected(err), None);
                }
            };

            if !self.is_current(ticket) {
                tracing::debug!("Dropping stale lookup result for {}", candidate);
                return CheckOutcome::Superseded;
            }

            match (exists, mode) {
                (false, _) => {
                    return self.finish(ticket, CheckOutcome::Accepted(candidate), Some(false));
                }
                (true, CheckMode::Manual) => {
                    let outcome = CheckOutcome::Rejected(SlugError::SlugConflict);
                    return self.finish(ticket, outcome, Some(true));
                }
                (true, CheckMode::Auto) if attempts >= self.settings.max_auto_attempts => {
                    let outcome = CheckOutcome::Rejected(SlugError::TooManyCollisions { attempts });
                    return self.finish(ticket, outcome, Some(true));
                }
                (true, CheckMode::Auto) => {
                    candidate = increment_slug(&candidate);
                    let mut state = self.lock_state();
                    if state.generation != ticket {
                        return CheckOutcome::Superseded;
                    }
                    state.candidate = candidate.clone();
                }
            }
        }
    }

    async fn lookup_once(&self, candidate: &str) -> Result<bool, StoreError> {
        tracing::debug!("Looking up slug {}", candidate);
        match tokio::time::timeout(self.settings.lookup_timeout, self.lookup.exists(candidate)).await
        {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout),
        }
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.lock_state().generation == ticket
    }

    fn finish(&self, ticket: u64, outcome: CheckOutcome, conflict: Option<bool>) -> CheckOutcome {
        let mut state = self.lock_state();
        if state.generation != ticket {
            return CheckOutcome::Superseded;
        }
        state.checking = false;
        state.conflict = conflict;
        if let CheckOutcome::Accepted(slug) = &outcome {
            state.candidate = slug.clone();
        }
        outcome
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AvailabilityState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
