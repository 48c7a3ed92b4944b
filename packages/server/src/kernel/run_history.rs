//! In-process store of recent pipeline runs.
//!
//! Bounded, newest first. Runs are kept for inspection through the HTTP
//! surface only; nothing is persisted across restarts.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domains::pipeline::RunRecord;

/// Thread-safe, cloneable ring of finished run records.
#[derive(Clone)]
pub struct RunHistory {
    runs: Arc<RwLock<VecDeque<RunRecord>>>,
    capacity: usize,
}

impl RunHistory {
    /// Create a new RunHistory keeping the last 50 runs.
    pub fn new() -> Self {
        Self::with_capacity(50)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Store a run, evicting the oldest one when full.
    pub async fn push(&self, record: RunRecord) {
        let mut runs = self.runs.write().await;
        if runs.len() == self.capacity {
            runs.pop_back();
        }
        runs.push_front(record);
    }

    /// Up to `limit` runs, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<RunRecord> {
        let runs = self.runs.read().await;
        runs.iter().take(limit).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.runs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.runs.read().await.is_empty()
    }
}

impl Default for RunHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn run(id: &str) -> RunRecord {
        RunRecord::new(id, None, Utc::now())
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() {
        let history = RunHistory::new();
        history.push(run("a")).await;
        history.push(run("b")).await;

        let ids: Vec<String> = history.recent(10).await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_evicts_oldest_when_full() {
        let history = RunHistory::with_capacity(2);
        history.push(run("a")).await;
        history.push(run("b")).await;
        history.push(run("c")).await;

        assert_eq!(history.len().await, 2);
        let ids: Vec<String> = history.recent(10).await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_recent_respects_limit() {
        let history = RunHistory::new();
        assert!(history.is_empty().await);
        for id in ["a", "b", "c"] {
            history.push(run(id)).await;
        }

        assert_eq!(history.recent(1).await.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let history = RunHistory::new();
        let handle = history.clone();
        handle.push(run("a")).await;

        assert_eq!(history.len().await, 1);
    }
}
