use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::page::{MemoryPage, ReadyState};
use crate::studymate_client::api::{
    CountResponse, OnlineStudentsResponse, PingResponse, StatsResponse, StudentEntry,
};
use crate::studymate_client::{CountResource, StudyMateApi};
use crate::types::DashboardError;

pub fn dashboard_page(ready_state: ReadyState) -> MemoryPage {
    MemoryPage::dashboard(ready_state)
}

pub fn stats(materias: u64, notes: u64, alunos: u64) -> StatsResponse {
    StatsResponse {
        success: true,
        materias_count: materias,
        notes_count: notes,
        alunos_online_count: alunos,
        alunos_online: (0..alunos)
            .map(|idx| StudentEntry {
                id: Some(idx),
                username: format!("aluno{idx}"),
                tempo_texto: Some("há 1 min".to_string()),
                last_login: None,
            })
            .collect(),
        error: None,
    }
}

pub fn online(names: &[&str]) -> OnlineStudentsResponse {
    OnlineStudentsResponse {
        success: true,
        count: names.len() as u64,
        students: names
            .iter()
            .map(|name| StudentEntry {
                username: name.to_string(),
                tempo_texto: Some("há 2 min".to_string()),
                ..Default::default()
            })
            .collect(),
        error: None,
    }
}

/// One scripted online-students answer, optionally held back until notified.
pub struct Scripted {
    pub gate: Option<Arc<Notify>>,
    pub result: Result<OnlineStudentsResponse, String>,
}

/// Hand-rolled API double for timing-sensitive tests.
pub struct FakeApi {
    stats: Result<StatsResponse, String>,
    gate: Option<Arc<Notify>>,
    online: Mutex<VecDeque<Scripted>>,
    stats_calls: Arc<AtomicUsize>,
    ping_calls: Arc<AtomicUsize>,
}

impl FakeApi {
    pub fn with_stats(stats: Result<StatsResponse, DashboardError>) -> Self {
        Self {
            stats: stats.map_err(|err| err.to_string()),
            gate: None,
            online: Mutex::new(VecDeque::new()),
            stats_calls: Arc::new(AtomicUsize::new(0)),
            ping_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Hold every stats request until `gate()` is notified.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn gate(&self) -> Arc<Notify> {
        self.gate.clone().expect("api is not gated")
    }

    pub fn script_online(self, scripted: Scripted) -> Self {
        self.online.lock().unwrap().push_back(scripted);
        self
    }

    pub fn stats_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.stats_calls)
    }

    pub fn ping_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.ping_calls)
    }
}

#[async_trait]
impl StudyMateApi for FakeApi {
    async fn fetch_stats(&self) -> Result<StatsResponse, DashboardError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.stats.clone().map_err(DashboardError::Api)
    }

    async fn fetch_online_students(&self) -> Result<OnlineStudentsResponse, DashboardError> {
        let scripted = self.online.lock().unwrap().pop_front();
        let Some(scripted) = scripted else {
            return Err(DashboardError::Api("nothing scripted".to_string()));
        };
        if let Some(gate) = scripted.gate {
            gate.notified().await;
        }
        scripted.result.map_err(DashboardError::Api)
    }

    async fn fetch_count(&self, _resource: CountResource) -> Result<CountResponse, DashboardError> {
        Err(DashboardError::Api("not scripted".to_string()))
    }

    async fn ping(&self) -> Result<PingResponse, DashboardError> {
        self.ping_calls.fetch_add(1, Ordering::SeqCst);
        Ok(PingResponse {
            success: true,
            ..Default::default()
        })
    }
}
