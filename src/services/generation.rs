// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-client archive generation tracking.
//!
//! Each client has one [`GenerationState`]. A request must acquire a
//! [`GenerationTicket`] before packaging; acquisition fails while the same
//! client already has a generation in flight. Requests are rejected rather
//! than queued.
//!
//! Only in-flight generations and recent failures are kept. A successful
//! generation releases the client entirely, and failures expire after
//! [`FAILURE_TTL`] or are evicted oldest-first beyond [`MAX_RETAINED_FAILURES`].

use crate::models::generation::GenerationState;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a failure stays visible to the status endpoint.
pub const FAILURE_TTL: Duration = Duration::from_secs(10 * 60);
/// Upper bound on retained failure entries.
pub const MAX_RETAINED_FAILURES: usize = 1024;

/// Errors from generation tracking.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("An archive is already being generated for this client")]
    Busy,
}

#[derive(Debug, Clone)]
struct ClientEntry {
    state: GenerationState,
    updated: Instant,
}

impl ClientEntry {
    fn new(state: GenerationState) -> Self {
        Self {
            state,
            updated: Instant::now(),
        }
    }

    fn is_live(&self, ttl: Duration) -> bool {
        self.state.is_generating() || self.updated.elapsed() < ttl
    }
}

/// Tracks the generation state of every client.
#[derive(Debug, Clone)]
pub struct GenerationTracker {
    states: Arc<DashMap<String, ClientEntry>>,
    failure_ttl: Duration,
    max_failures: usize,
}

impl Default for GenerationTracker {
    fn default() -> Self {
        Self::with_limits(FAILURE_TTL, MAX_RETAINED_FAILURES)
    }
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker with custom failure retention.
    pub fn with_limits(failure_ttl: Duration, max_failures: usize) -> Self {
        Self {
            states: Arc::new(DashMap::new()),
            failure_ttl,
            max_failures,
        }
    }

    /// Current state for a client (`Idle` if unknown, succeeded or expired).
    pub fn state(&self, client_id: &str) -> GenerationState {
        self.states
            .get(client_id)
            .filter(|e| e.is_live(self.failure_ttl))
            .map(|e| e.state.clone())
            .unwrap_or_default()
    }

    /// Number of clients currently held in memory.
    pub fn tracked_clients(&self) -> usize {
        self.states.len()
    }

    /// Move the client into `Generating`.
    ///
    /// The check and the transition happen under the same map shard lock.
    pub fn begin(&self, client_id: &str) -> Result<GenerationTicket, GenerationError> {
        let mut entry = self
            .states
            .entry(client_id.to_string())
            .or_insert_with(|| ClientEntry::new(GenerationState::Idle));
        let next = entry.state.begin().ok_or(GenerationError::Busy)?;
        *entry = ClientEntry::new(next);
        drop(entry);

        tracing::debug!(client_id, "Generation started");
        Ok(GenerationTicket {
            tracker: self.clone(),
            client_id: client_id.to_string(),
            finished: false,
        })
    }

    fn set(&self, client_id: &str, state: GenerationState) {
        tracing::debug!(client_id, state = ?state, "Generation state changed");
        match state {
            GenerationState::Failed(_) => {
                self.states
                    .insert(client_id.to_string(), ClientEntry::new(state));
                self.prune_failures();
            }
            _ => {
                self.states.remove(client_id);
            }
        }
    }

    /// Drop expired failures, then the oldest ones beyond the cap.
    fn prune_failures(&self) {
        let ttl = self.failure_ttl;
        self.states.retain(|_, e| e.is_live(ttl));

        let mut failures: Vec<(String, Instant)> = self
            .states
            .iter()
            .filter(|e| !e.state.is_generating())
            .map(|e| (e.key().clone(), e.updated))
            .collect();
        if failures.len() <= self.max_failures {
            return;
        }

        failures.sort_by_key(|(_, updated)| *updated);
        let excess = failures.len() - self.max_failures;
        for (client_id, _) in failures.into_iter().take(excess) {
            self.states
                .remove_if(&client_id, |_, e| !e.state.is_generating());
        }
    }
}

/// Exclusive right to generate for one client.
///
/// Dropping an unfinished ticket (e.g. a panicked task) marks the attempt as
/// failed so the client can retry.
#[derive(Debug)]
pub struct GenerationTicket {
    tracker: GenerationTracker,
    client_id: String,
    finished: bool,
}

impl GenerationTicket {
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Record the outcome of the attempt and release the client.
    pub fn finish<T, E: ToString>(mut self, result: &Result<T, E>) {
        self.finished = true;
        self.tracker
            .set(&self.client_id, GenerationState::finish(result));
    }
}

impl Drop for GenerationTicket {
    fn drop(&mut self) {
        if !self.finished {
            self.tracker.set(
                &self.client_id,
                GenerationState::Failed("Generation was interrupted".to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_client_is_idle() {
        let tracker = GenerationTracker::new();
        assert_eq!(tracker.state("nobody"), GenerationState::Idle);
        assert_eq!(tracker.tracked_clients(), 0);
    }

    #[test]
    fn test_second_begin_is_busy() {
        let tracker = GenerationTracker::new();
        let ticket = tracker.begin("alice").unwrap();
        assert!(tracker.state("alice").is_generating());
        assert!(matches!(tracker.begin("alice"), Err(GenerationError::Busy)));

        // Other clients are unaffected
        let other = tracker.begin("bob").unwrap();
        other.finish::<(), &str>(&Ok(()));

        ticket.finish::<(), _>(&Err("Missing required files"));
        assert_eq!(
            tracker.state("alice"),
            GenerationState::Failed("Missing required files".to_string())
        );
        assert_eq!(tracker.state("bob"), GenerationState::Idle);
    }

    #[test]
    fn test_success_releases_entry() {
        let tracker = GenerationTracker::new();
        for i in 0..500 {
            tracker
                .begin(&format!("client-{i}"))
                .unwrap()
                .finish::<(), &str>(&Ok(()));
        }
        assert_eq!(tracker.tracked_clients(), 0);
    }

    #[test]
    fn test_failures_are_capped() {
        let tracker = GenerationTracker::with_limits(FAILURE_TTL, 16);
        let in_flight = tracker.begin("in-flight").unwrap();

        for i in 0..500 {
            tracker
                .begin(&format!("client-{i}"))
                .unwrap()
                .finish::<(), _>(&Err("boom"));
        }

        // 16 failures plus the running generation
        assert_eq!(tracker.tracked_clients(), 17);
        assert!(tracker.state("in-flight").is_generating());
        assert_eq!(
            tracker.state("client-499"),
            GenerationState::Failed("boom".to_string())
        );
        assert_eq!(tracker.state("client-0"), GenerationState::Idle);

        in_flight.finish::<(), &str>(&Ok(()));
        assert_eq!(tracker.tracked_clients(), 16);
    }

    #[test]
    fn test_failures_expire() {
        let tracker = GenerationTracker::with_limits(Duration::ZERO, MAX_RETAINED_FAILURES);
        tracker.begin("alice").unwrap().finish::<(), _>(&Err("boom"));

        assert_eq!(tracker.state("alice"), GenerationState::Idle);
        tracker.begin("bob").unwrap().finish::<(), _>(&Err("boom"));
        assert_eq!(tracker.tracked_clients(), 0);
    }

    #[test]
    fn test_retry_after_finish() {
        let tracker = GenerationTracker::new();
        tracker.begin("alice").unwrap().finish::<(), &str>(&Ok(()));
        assert!(tracker.begin("alice").is_ok());
    }

    #[test]
    fn test_dropped_ticket_releases_client() {
        let tracker = GenerationTracker::new();
        {
            let _ticket = tracker.begin("alice").unwrap();
        }
        assert_eq!(
            tracker.state("alice"),
            GenerationState::Failed("Generation was interrupted".to_string())
        );
        assert!(tracker.begin("alice").is_ok());
    }
}
