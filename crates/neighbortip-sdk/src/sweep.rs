//! Neighbor sweep: sequential lookups around a center FID.
//!
//! The controller owns the presentation-facing [`SweepState`] and publishes
//! a snapshot on a `watch` channel after every change, so a renderer can
//! follow progress while the sweep runs.
//!
//! Lookups are awaited one at a time in ascending FID order. Both the
//! progress counter and the order of the result list depend on that.

use crate::client::DirectoryLookup;
use crate::error::SdkError;
use neighbortip_domain::{DomainError, Fid, Neighbor, SweepWindow};
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Shown when a sweep resolves nothing
pub const NO_NEIGHBORS_MESSAGE: &str = "No neighbors found. Try a different FID range.";

/// Shown when the sweep itself fails
pub const SWEEP_FAILED_MESSAGE: &str = "Failed to fetch neighboring addresses";

/// Message for a center FID that has no proofs
pub fn center_not_found_message(center: Fid) -> String {
    format!(
        "No data found for FID {}. Please check if this FID exists.",
        center
    )
}

/// Snapshot of a sweep as seen by the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepState {
    /// Center of the most recently started sweep
    pub center: Option<Fid>,
    /// A sweep is in flight
    pub busy: bool,
    /// Lookups completed in the current sweep
    pub progress: usize,
    /// Lookups the current sweep will perform
    pub total: usize,
    /// The single user-visible message; a later message replaces an earlier one
    pub error: Option<String>,
    /// Neighbors from the last sweep that found any
    pub neighbors: Vec<Neighbor>,
}

impl SweepState {
    /// Neighbors that can be tipped (everyone except the center itself)
    pub fn tippable(&self) -> impl Iterator<Item = &Neighbor> {
        let center = self.center;
        self.neighbors.iter().filter(move |n| Some(n.fid) != center)
    }

    /// Look up a displayed neighbor by FID
    pub fn neighbor(&self, fid: Fid) -> Option<&Neighbor> {
        self.neighbors.iter().find(|n| n.fid == fid)
    }
}

/// Clears the busy flag when dropped, whichever way the sweep ends
struct BusyGuard<'a> {
    state: &'a watch::Sender<SweepState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.busy = false);
    }
}

/// Runs sweeps against a directory and tracks their state
pub struct SweepController<D> {
    directory: D,
    state: watch::Sender<SweepState>,
}

impl<D: DirectoryLookup> SweepController<D> {
    /// Create a controller with an empty state
    pub fn new(directory: D) -> Self {
        let (state, _) = watch::channel(SweepState::default());
        Self { directory, state }
    }

    /// The directory this controller queries
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<SweepState> {
        self.state.subscribe()
    }

    /// Current state
    pub fn state(&self) -> SweepState {
        self.state.borrow().clone()
    }

    /// Validate raw input and sweep around it
    ///
    /// Invalid input sets the error message and returns without starting a
    /// sweep.
    pub async fn submit(&mut self, raw: &str) -> Result<SweepState, DomainError> {
        match Fid::parse(raw) {
            Ok(center) => {
                info!("FID submitted: {}", center);
                Ok(self.sweep(center).await)
            }
            Err(e) => {
                self.state.send_modify(|s| s.error = Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Sweep the window around `center` and return the final state
    ///
    /// The displayed neighbor list is only replaced when at least one
    /// neighbor was found.
    pub async fn sweep(&mut self, center: Fid) -> SweepState {
        let window = SweepWindow::new(center);

        self.state.send_modify(|s| {
            s.center = Some(center);
            s.busy = true;
            s.progress = 0;
            s.total = window.len();
            s.error = None;
        });
        let busy_guard = BusyGuard { state: &self.state };

        info!("Starting to fetch neighboring addresses for FID {}", center);

        match self.run(&window).await {
            Ok(found) if found.is_empty() => {
                info!("No neighbors found around FID {}", center);
                self.state
                    .send_modify(|s| s.error = Some(NO_NEIGHBORS_MESSAGE.to_string()));
            }
            Ok(found) => {
                info!("Total neighbors found: {}", found.len());
                self.state.send_modify(|s| s.neighbors = found);
            }
            Err(e) => {
                error!("Error fetching neighboring addresses: {}", e);
                self.state
                    .send_modify(|s| s.error = Some(SWEEP_FAILED_MESSAGE.to_string()));
            }
        }

        drop(busy_guard);
        self.state()
    }

    async fn run(&self, window: &SweepWindow) -> Result<Vec<Neighbor>, SdkError> {
        let center = window.center();
        let mut found = Vec::new();

        for fid in window.below() {
            self.step(fid, &mut found).await?;
        }

        if !self.step(center, &mut found).await? {
            debug!("No data found for center FID {}", center);
            self.state
                .send_modify(|s| s.error = Some(center_not_found_message(center)));
        }

        for fid in window.above() {
            self.step(fid, &mut found).await?;
        }

        Ok(found)
    }

    /// Resolve one candidate, count it, and keep it if found
    async fn step(&self, fid: Fid, found: &mut Vec<Neighbor>) -> Result<bool, SdkError> {
        let resolved = self.directory.resolve(fid).await;
        self.state.send_modify(|s| s.progress += 1);

        match resolved? {
            Some(neighbor) => {
                debug!("Found neighbor FID {}: {}", fid, neighbor.owner);
                found.push(neighbor);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use neighbortip_domain::{ProofResponse, UserProof};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory directory that records the order of lookups
    #[derive(Default)]
    struct FakeDirectory {
        proofs: HashMap<u64, Vec<UserProof>>,
        failing: Vec<u64>,
        fatal: bool,
        /// Yield before answering so watchers see each intermediate state
        yielding: bool,
        calls: Mutex<Vec<u64>>,
    }

    impl FakeDirectory {
        fn with_fids(fids: &[u64]) -> Self {
            let mut directory = Self::default();
            for fid in fids {
                directory.proofs.insert(*fid, vec![proof(*fid, &format!("user{}", fid))]);
            }
            directory
        }

        fn calls(&self) -> Vec<u64> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn proof(fid: u64, name: &str) -> UserProof {
        UserProof {
            timestamp: 1700000000,
            name: name.to_string(),
            owner: format!("0x{:040x}", fid),
            signature: String::new(),
            fid: Fid::from_value(fid),
            proof_type: "USERNAME_TYPE_FNAME".to_string(),
        }
    }

    #[async_trait]
    impl DirectoryLookup for FakeDirectory {
        async fn lookup(&self, fid: Fid) -> Result<ProofResponse, SdkError> {
            if self.yielding {
                tokio::task::yield_now().await;
            }
            self.calls.lock().unwrap().push(fid.value());
            if self.fatal {
                return Err(SdkError::InvalidEndpoint("relative URL without a base".into()));
            }
            if self.failing.contains(&fid.value()) {
                return Err(SdkError::ProxyError {
                    status: 502,
                    message: "Failed to fetch data from directory: Bad Gateway".into(),
                });
            }
            Ok(ProofResponse {
                proofs: self.proofs.get(&fid.value()).cloned().unwrap_or_default(),
            })
        }
    }

    fn fid(value: u64) -> Fid {
        Fid::new(value).unwrap()
    }

    fn fids(neighbors: &[Neighbor]) -> Vec<u64> {
        neighbors.iter().map(|n| n.fid.value()).collect()
    }

    #[tokio::test]
    async fn test_full_window_order() {
        let mut controller = SweepController::new(FakeDirectory::default());
        controller.sweep(fid(100)).await;

        assert_eq!(
            controller.directory().calls(),
            vec![95, 96, 97, 98, 99, 100, 101, 102, 103, 104, 105]
        );
    }

    #[tokio::test]
    async fn test_center_ten_scenario() {
        let mut controller = SweepController::new(FakeDirectory::with_fids(&[8, 10, 12]));
        let state = controller.sweep(fid(10)).await;

        assert_eq!(fids(&state.neighbors), vec![8, 10, 12]);
        assert_eq!(state.progress, 11);
        assert_eq!(state.total, 11);
        assert!(state.error.is_none());
        assert!(!state.busy);
    }

    #[tokio::test]
    async fn test_small_center_skips_non_positive() {
        let mut controller = SweepController::new(FakeDirectory::default());
        let state = controller.sweep(fid(2)).await;

        assert_eq!(controller.directory().calls(), vec![1, 2, 3, 4, 5, 6, 7]);
        // Total matches the lookups actually attempted
        assert_eq!(state.progress, 7);
        assert_eq!(state.total, 7);
    }

    #[tokio::test]
    async fn test_center_two_nothing_found_shows_one_message() {
        let mut controller = SweepController::new(FakeDirectory::default());
        let state = controller.sweep(fid(2)).await;

        // The center-specific message is replaced by the sweep-level one
        assert_eq!(state.error.as_deref(), Some(NO_NEIGHBORS_MESSAGE));
        assert!(state.neighbors.is_empty());
    }

    #[tokio::test]
    async fn test_center_two_message_is_shown_then_replaced() {
        let directory = FakeDirectory {
            yielding: true,
            ..FakeDirectory::default()
        };
        let mut controller = SweepController::new(directory);
        let mut rx = controller.subscribe();

        let watcher = tokio::spawn(async move {
            let mut messages: Vec<Option<String>> = Vec::new();
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                if messages.last() != Some(&state.error) {
                    messages.push(state.error.clone());
                }
                if !state.busy && state.progress > 0 {
                    break;
                }
            }
            messages
        });

        let state = controller.sweep(fid(2)).await;
        let messages = watcher.await.unwrap();

        assert!(messages.contains(&Some(center_not_found_message(fid(2)))));
        assert_eq!(
            messages.last(),
            Some(&Some(NO_NEIGHBORS_MESSAGE.to_string()))
        );
        assert_eq!(state.error.as_deref(), Some(NO_NEIGHBORS_MESSAGE));
    }

    #[tokio::test]
    async fn test_small_center_missing_keeps_center_message() {
        let mut controller = SweepController::new(FakeDirectory::with_fids(&[1, 5]));
        let state = controller.sweep(fid(3)).await;

        assert_eq!(controller.directory().calls(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(fids(&state.neighbors), vec![1, 5]);
        assert_eq!(state.error, Some(center_not_found_message(fid(3))));
    }

    #[tokio::test]
    async fn test_center_missing_but_neighbors_found() {
        let mut controller = SweepController::new(FakeDirectory::with_fids(&[9, 11]));
        let state = controller.sweep(fid(10)).await;

        assert_eq!(fids(&state.neighbors), vec![9, 11]);
        assert_eq!(state.error, Some(center_not_found_message(fid(10))));
    }

    #[tokio::test]
    async fn test_failed_lookups_are_not_found() {
        let mut directory = FakeDirectory::with_fids(&[8, 12]);
        directory.failing = vec![8, 9, 10];
        let mut controller = SweepController::new(directory);

        let state = controller.sweep(fid(10)).await;

        assert_eq!(fids(&state.neighbors), vec![12]);
        assert_eq!(state.progress, 11);
        assert_eq!(state.error, Some(center_not_found_message(fid(10))));
    }

    #[tokio::test]
    async fn test_empty_sweep_keeps_previous_results() {
        let mut controller = SweepController::new(FakeDirectory::with_fids(&[50]));
        let first = controller.sweep(fid(50)).await;
        assert_eq!(fids(&first.neighbors), vec![50]);

        let second = controller.sweep(fid(500)).await;
        assert_eq!(second.error.as_deref(), Some(NO_NEIGHBORS_MESSAGE));
        assert_eq!(fids(&second.neighbors), vec![50]);
        assert_eq!(second.center, Some(fid(500)));
    }

    #[tokio::test]
    async fn test_new_results_replace_old() {
        let mut controller = SweepController::new(FakeDirectory::with_fids(&[20, 40]));
        controller.sweep(fid(20)).await;
        let state = controller.sweep(fid(40)).await;

        assert_eq!(fids(&state.neighbors), vec![40]);
    }

    #[tokio::test]
    async fn test_first_proof_only() {
        let mut directory = FakeDirectory::default();
        directory
            .proofs
            .insert(10, vec![proof(10, "first"), proof(99, "second")]);
        let mut controller = SweepController::new(directory);

        let state = controller.sweep(fid(10)).await;

        assert_eq!(state.neighbors.len(), 1);
        assert_eq!(state.neighbors[0].name.as_deref(), Some("first"));
        assert_eq!(state.neighbors[0].fid.value(), 10);
    }

    #[tokio::test]
    async fn test_fatal_error_stops_sweep() {
        let directory = FakeDirectory {
            fatal: true,
            ..FakeDirectory::default()
        };
        let mut controller = SweepController::new(directory);

        let state = controller.sweep(fid(10)).await;

        assert_eq!(controller.directory().calls(), vec![5]);
        assert_eq!(state.error.as_deref(), Some(SWEEP_FAILED_MESSAGE));
        assert_eq!(state.progress, 1);
        assert!(!state.busy);
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_input() {
        let mut controller = SweepController::new(FakeDirectory::default());

        assert_eq!(controller.submit("  ").await, Err(DomainError::EmptyFid));
        assert_eq!(controller.state().error.as_deref(), Some("Please enter a FID"));

        assert!(controller.submit("-4").await.is_err());
        let state = controller.state();
        assert_eq!(
            state.error.as_deref(),
            Some("Please enter a valid FID (positive number)")
        );
        assert!(!state.busy);
        assert!(controller.directory().calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_runs_sweep() {
        let mut controller = SweepController::new(FakeDirectory::with_fids(&[7]));
        let state = controller.submit("7").await.unwrap();
        assert_eq!(fids(&state.neighbors), vec![7]);
    }

    #[tokio::test]
    async fn test_progress_published_per_lookup() {
        let mut controller = SweepController::new(FakeDirectory::default());
        let mut rx = controller.subscribe();

        let watcher = tokio::spawn(async move {
            let mut seen = Vec::new();
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                seen.push(state.progress);
                if !state.busy && state.progress > 0 {
                    break;
                }
            }
            seen
        });

        controller.sweep(fid(3)).await;
        drop(controller);

        let seen = watcher.await.unwrap();
        // Progress never goes backwards and ends at the window size
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last().copied(), Some(8));
    }

    #[test]
    fn test_tippable_excludes_center() {
        let state = SweepState {
            center: Some(fid(10)),
            neighbors: vec![
                Neighbor::from(&proof(9, "a")),
                Neighbor::from(&proof(10, "b")),
                Neighbor::from(&proof(11, "c")),
            ],
            ..SweepState::default()
        };

        let tippable: Vec<u64> = state.tippable().map(|n| n.fid.value()).collect();
        assert_eq!(tippable, vec![9, 11]);
        assert!(state.neighbor(fid(10)).is_some());
        assert!(state.neighbor(fid(12)).is_none());
    }
}
