use crate::error::ServiceError;
use crate::lifecycle::{self, ScheduleUpdate};
use crate::logs;
use chrono::{DateTime, Utc};
use core_types::{LogEntry, Strategy};
use database::{DbError, StrategyRepository};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// The single owner of the strategy collection.
///
/// Share it between request handlers behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct StrategyService {
    repository: StrategyRepository,
    strategies: Arc<Mutex<Vec<Strategy>>>,
}

impl StrategyService {
    /// Loads (or seeds) the collection from `repository` and takes ownership of it.
    pub async fn open(repository: StrategyRepository) -> Result<Self, ServiceError> {
        let strategies = repository.load().await?;
        tracing::info!(
            path = %repository.path().display(),
            count = strategies.len(),
            "Strategy service ready."
        );
        Ok(Self {
            repository,
            strategies: Arc::new(Mutex::new(strategies)),
        })
    }

    /// Every strategy, in creation order.
    pub async fn list(&self) -> Vec<Strategy> {
        self.strategies.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.strategies.lock().await.len()
    }

    pub async fn get(&self, id: &str) -> Result<Strategy, ServiceError> {
        let strategies = self.strategies.lock().await;
        find(&strategies, id).cloned()
    }

    /// Creates a strategy from an uploaded file. The bytes must be valid UTF-8;
    /// anything else is rejected without touching the collection.
    pub async fn ingest_from_content(
        &self,
        name: String,
        description: String,
        raw: Vec<u8>,
    ) -> Result<Strategy, ServiceError> {
        self.ingest_from_content_at(name, description, raw, Utc::now()).await
    }

    pub async fn ingest_from_content_at(
        &self,
        name: String,
        description: String,
        raw: Vec<u8>,
        now: DateTime<Utc>,
    ) -> Result<Strategy, ServiceError> {
        let script = String::from_utf8(raw).map_err(|e| {
            tracing::warn!(name = %name, error = %e, "Rejected non UTF-8 strategy upload.");
            ServiceError::Validation("策略文件必须为 UTF-8 编码".to_string())
        })?;
        self.insert(name, description, script, now).await
    }

    /// Creates a strategy from script text produced elsewhere (e.g. an AI assistant).
    pub async fn ingest_from_payload(
        &self,
        name: String,
        description: String,
        code: String,
    ) -> Result<Strategy, ServiceError> {
        self.insert(name, description, code, Utc::now()).await
    }

    /// Starts a non-running strategy or stops a running one.
    pub async fn toggle(&self, id: &str) -> Result<Strategy, ServiceError> {
        self.toggle_at(id, Utc::now()).await
    }

    pub async fn toggle_at(&self, id: &str, now: DateTime<Utc>) -> Result<Strategy, ServiceError> {
        let strategy = self
            .commit(|staged| {
                let strategy = find_mut(staged, id)?;
                lifecycle::toggle(strategy, now);
                Ok(strategy.clone())
            })
            .await?;
        tracing::info!(strategy_id = %id, status = %strategy.status, "Toggled strategy.");
        Ok(strategy)
    }

    /// Replaces the schedule window and moves between STOPPED and SCHEDULED as needed.
    pub async fn update_schedule(
        &self,
        id: &str,
        update: ScheduleUpdate,
    ) -> Result<Strategy, ServiceError> {
        let strategy = self
            .commit(|staged| {
                let strategy = find_mut(staged, id)?;
                lifecycle::apply_schedule(strategy, update);
                Ok(strategy.clone())
            })
            .await?;
        tracing::info!(
            strategy_id = %id,
            status = %strategy.status,
            enabled = strategy.schedule_enabled,
            "Updated strategy schedule."
        );
        Ok(strategy)
    }

    /// Synthetic activity log for an existing strategy. Nothing is persisted.
    pub async fn logs(&self, id: &str) -> Result<Vec<LogEntry>, ServiceError> {
        self.logs_at(id, Utc::now()).await
    }

    pub async fn logs_at(&self, id: &str, now: DateTime<Utc>) -> Result<Vec<LogEntry>, ServiceError> {
        let strategies = self.strategies.lock().await;
        let strategy = find(&strategies, id)?;
        Ok(logs::synthetic_logs(&strategy.id, now))
    }

    async fn insert(
        &self,
        name: String,
        description: String,
        script_content: String,
        now: DateTime<Utc>,
    ) -> Result<Strategy, ServiceError> {
        let strategy = self
            .commit(|staged| {
                let strategy = Strategy::new(fresh_id(staged), name, description, script_content, now);
                staged.push(strategy.clone());
                Ok(strategy)
            })
            .await?;
        tracing::info!(strategy_id = %strategy.id, name = %strategy.name, "Created strategy.");
        Ok(strategy)
    }

    /// Runs `mutate` against a copy of the collection, persists the copy, and
    /// only then makes it the live collection. The lock is held throughout.
    ///
    /// Once `mutate` has succeeded, the save and the swap run on their own task
    /// that owns the lock guard, so dropping the caller's future (e.g. a client
    /// disconnect) cannot leave the disk ahead of memory.
    async fn commit<T, F>(&self, mutate: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Vec<Strategy>) -> Result<T, ServiceError>,
    {
        let mut live = Arc::clone(&self.strategies).lock_owned().await;
        let mut staged = (*live).clone();
        let output = mutate(&mut staged)?;

        let repository = self.repository.clone();
        let persist = tokio::spawn(async move {
            repository.save(&staged).await?;
            *live = staged;
            Ok::<(), DbError>(())
        });

        match persist.await? {
            Ok(()) => Ok(output),
            Err(e) => {
                tracing::error!(error = %e, "Persisting strategies failed; change discarded.");
                Err(e.into())
            }
        }
    }
}

fn find<'a>(strategies: &'a [Strategy], id: &str) -> Result<&'a Strategy, ServiceError> {
    strategies
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| not_found(id))
}

fn find_mut<'a>(strategies: &'a mut [Strategy], id: &str) -> Result<&'a mut Strategy, ServiceError> {
    strategies
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> ServiceError {
    tracing::warn!(strategy_id = %id, "Strategy not found.");
    ServiceError::NotFound(id.to_string())
}

fn fresh_id(existing: &[Strategy]) -> String {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if !existing.iter().any(|s| s.id == id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{LogLevel, StrategyStatus};
    use rust_decimal::Decimal;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn open_service(dir: &TempDir) -> StrategyService {
        StrategyService::open(StrategyRepository::new(store_path(dir)))
            .await
            .unwrap()
    }

    fn store_path(dir: &TempDir) -> PathBuf {
        dir.path().join("strategies.json")
    }

    async fn reload(dir: &TempDir) -> Vec<Strategy> {
        StrategyRepository::new(store_path(dir)).load().await.unwrap()
    }

    /// Makes every subsequent save fail by occupying the temporary file path.
    fn break_persistence(dir: &TempDir) {
        std::fs::create_dir(dir.path().join("strategies.json.tmp")).unwrap();
    }

    #[tokio::test]
    async fn open_seeds_empty_store() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        let ids: Vec<_> = service.list().await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(service.count().await, 2);
    }

    #[tokio::test]
    async fn payload_ingestion_creates_stopped_strategy_and_persists() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;

        let created = service
            .ingest_from_payload("AI grid".to_string(), "generated".to_string(), "print(1)".to_string())
            .await
            .unwrap();

        assert_eq!(created.status, StrategyStatus::Stopped);
        assert_eq!(created.pnl, Decimal::ZERO);
        assert!(!created.schedule_enabled);
        assert_eq!(created.script_content, "print(1)");
        assert!(created.id != "1" && created.id != "2");

        let listed = service.list().await;
        assert_eq!(listed.last(), Some(&created));
        assert_eq!(reload(&dir).await, listed);
    }

    #[tokio::test]
    async fn content_ingestion_decodes_utf8() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        let now = Utc::now();

        let created = service
            .ingest_from_content_at(
                "均线".to_string(),
                String::new(),
                "def run(data):\n    return '买入'\n".as_bytes().to_vec(),
                now,
            )
            .await
            .unwrap();

        assert_eq!(created.script_content, "def run(data):\n    return '买入'\n");
        assert_eq!(created.created_at, now);
        assert_eq!(service.get(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn invalid_utf8_upload_is_rejected_without_mutation() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        let before = std::fs::read(store_path(&dir)).unwrap();

        let result = service
            .ingest_from_content("bad".to_string(), String::new(), vec![0xff, 0xfe, 0x00])
            .await;

        assert!(matches!(result, Err(ServiceError::Validation(ref m)) if m == "策略文件必须为 UTF-8 编码"));
        assert_eq!(service.count().await, 2);
        assert_eq!(std::fs::read(store_path(&dir)).unwrap(), before);
    }

    #[tokio::test]
    async fn ingested_ids_are_unique() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        for i in 0..10 {
            service
                .ingest_from_payload(format!("s{i}"), String::new(), String::new())
                .await
                .unwrap();
        }
        let ids: HashSet<_> = service.list().await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 12);
    }

    #[tokio::test]
    async fn toggle_round_trip_is_persisted() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        let created = service
            .ingest_from_payload("t".to_string(), String::new(), String::new())
            .await
            .unwrap();

        let t1 = Utc::now();
        let running = service.toggle_at(&created.id, t1).await.unwrap();
        assert_eq!(running.status, StrategyStatus::Running);
        assert_eq!(running.last_run, Some(t1));
        assert_eq!(reload(&dir).await, service.list().await);

        let stopped = service.toggle(&created.id).await.unwrap();
        assert_eq!(stopped.status, StrategyStatus::Stopped);
        assert_eq!(stopped.last_run, Some(t1));
        assert_eq!(reload(&dir).await, service.list().await);
    }

    #[tokio::test]
    async fn toggle_seeded_scheduled_strategy_runs_it() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        let toggled = service.toggle("2").await.unwrap();
        assert_eq!(toggled.status, StrategyStatus::Running);
        assert!(toggled.last_run.is_some());
    }

    #[tokio::test]
    async fn schedule_update_moves_between_stopped_and_scheduled() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        let created = service
            .ingest_from_payload("s".to_string(), String::new(), String::new())
            .await
            .unwrap();

        let scheduled = service
            .update_schedule(
                &created.id,
                ScheduleUpdate {
                    enabled: true,
                    start_time: Some("09:00".to_string()),
                    end_time: Some("23:00".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(scheduled.status, StrategyStatus::Scheduled);
        assert_eq!(reload(&dir).await, service.list().await);

        let stopped = service
            .update_schedule(
                &created.id,
                ScheduleUpdate { enabled: false, start_time: None, end_time: None },
            )
            .await
            .unwrap();
        assert_eq!(stopped.status, StrategyStatus::Stopped);
        assert!(stopped.start_time.is_none());
    }

    #[tokio::test]
    async fn schedule_update_leaves_running_strategy_running() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        for enabled in [true, false] {
            let updated = service
                .update_schedule("1", ScheduleUpdate { enabled, start_time: None, end_time: None })
                .await
                .unwrap();
            assert_eq!(updated.status, StrategyStatus::Running);
        }
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_and_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        let memory_before = service.list().await;
        let disk_before = std::fs::read(store_path(&dir)).unwrap();

        assert!(matches!(service.toggle("missing").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            service
                .update_schedule("missing", ScheduleUpdate { enabled: true, start_time: None, end_time: None })
                .await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(service.logs("missing").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(service.get("missing").await, Err(ServiceError::NotFound(_))));

        assert_eq!(service.list().await, memory_before);
        assert_eq!(std::fs::read(store_path(&dir)).unwrap(), disk_before);
    }

    #[tokio::test]
    async fn failed_persist_rolls_back_memory() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        let before = service.list().await;
        break_persistence(&dir);

        assert!(matches!(service.toggle("1").await, Err(ServiceError::Persistence(_))));
        assert!(matches!(
            service
                .ingest_from_payload("x".to_string(), String::new(), String::new())
                .await,
            Err(ServiceError::Persistence(_))
        ));

        assert_eq!(service.list().await, before);
        assert_eq!(reload(&dir).await, before);
    }

    #[tokio::test]
    async fn cancelled_toggle_never_leaves_disk_ahead_of_memory() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;

        for step in 0..200u64 {
            let _ = tokio::time::timeout(Duration::from_micros(step * 5), service.toggle("1")).await;
            // `list` waits for any in-flight commit to release the lock.
            let memory = service.list().await;
            assert_eq!(reload(&dir).await, memory, "diverged after cancelling at step {step}");
        }
    }

    #[tokio::test]
    async fn logs_for_existing_strategy() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir).await;
        let now = Utc::now();

        let entries = service.logs_at("2", now).await.unwrap();
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0].level, LogLevel::Warning);
        assert_eq!(entries[7].level, LogLevel::Trade);
        assert_eq!(entries[1].level, LogLevel::Info);
        assert_eq!(entries[0].timestamp, now);
        assert_eq!(entries[0].id, "2-0");
    }

    #[tokio::test]
    async fn concurrent_ingestion_keeps_disk_in_step_with_memory() {
        let dir = TempDir::new().unwrap();
        let service = Arc::new(open_service(&dir).await);

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .ingest_from_payload(format!("c{i}"), String::new(), String::new())
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let listed = service.list().await;
        assert_eq!(listed.len(), 18);
        assert_eq!(reload(&dir).await, listed);
    }
}
