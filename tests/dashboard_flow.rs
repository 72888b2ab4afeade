use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use studymate_live::dashboard::PopupId;
use studymate_live::page::{MemoryPage, Overlay, Page, PageEvent, ReadyState};
use studymate_live::studymate_client::api::{
    CountResponse, OnlineStudentsResponse, PingResponse, StatsResponse,
};
use studymate_live::studymate_client::{CountResource, StudyMateApi};
use studymate_live::{Action, Config, DashboardError, LiveDashboard};

/// Serves fixed counts and records how often the aggregate endpoint is hit.
struct FixedCounts {
    subjects: u64,
    notes: Option<u64>,
    stats_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl StudyMateApi for FixedCounts {
    async fn fetch_stats(&self) -> Result<StatsResponse, DashboardError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        Ok(StatsResponse {
            success: true,
            materias_count: self.subjects,
            notes_count: self.notes.unwrap_or(0),
            ..Default::default()
        })
    }

    async fn fetch_online_students(&self) -> Result<OnlineStudentsResponse, DashboardError> {
        Ok(OnlineStudentsResponse {
            success: true,
            ..Default::default()
        })
    }

    async fn fetch_count(&self, resource: CountResource) -> Result<CountResponse, DashboardError> {
        let count = match resource {
            CountResource::Subjects => Some(self.subjects),
            CountResource::Notes => self.notes,
        };
        match count {
            Some(count) => Ok(CountResponse {
                success: true,
                count,
                error: None,
            }),
            None => Err(DashboardError::Api("connection reset".to_string())),
        }
    }

    async fn ping(&self) -> Result<PingResponse, DashboardError> {
        Ok(PingResponse::default())
    }
}

fn start(subjects: u64, notes: Option<u64>) -> (LiveDashboard<FixedCounts, MemoryPage>, MemoryPage, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let api = FixedCounts {
        subjects,
        notes,
        stats_calls: Arc::clone(&calls),
    };
    let page = MemoryPage::dashboard(ReadyState::Complete);
    let dashboard = LiveDashboard::new(api, page.clone(), Config::default());
    dashboard.init().expect("dashboard starts");
    (dashboard, page, calls)
}

#[tokio::test(start_paused = true)]
async fn zero_subjects_show_alert_and_stay() {
    let (dashboard, page, _) = start(0, Some(3));

    dashboard.dispatch(Action::OpenSubjects).await;

    assert!(page.navigations().is_empty());
    assert!(matches!(
        page.overlays().first().map(|o| &o.overlay),
        Some(Overlay::Alert(_))
    ));

    dashboard.dispatch(Action::DismissAlert).await;
    assert!(page.overlays().is_empty());
    dashboard.stop();
}

#[tokio::test(start_paused = true)]
async fn one_subject_navigates() {
    let (dashboard, page, _) = start(1, Some(0));

    dashboard.dispatch(Action::OpenSubjects).await;

    assert_eq!(page.navigations(), vec!["/materias/".to_string()]);
    dashboard.stop();
}

#[tokio::test(start_paused = true)]
async fn notes_check_failure_is_fail_open() {
    let (dashboard, page, _) = start(1, None);

    dashboard.dispatch(Action::OpenNotes).await;

    assert_eq!(page.navigations(), vec!["/notes/".to_string()]);
    dashboard.stop();
}

#[tokio::test(start_paused = true)]
async fn cards_follow_the_aggregate_endpoint() {
    let (dashboard, page, _) = start(2, Some(1));

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(page.text("materias-count").as_deref(), Some("2"));
    assert_eq!(page.text("materias-label").as_deref(), Some("Matérias disponíveis"));
    assert_eq!(page.text("notes-count").as_deref(), Some("1"));
    assert_eq!(page.text("notes-label").as_deref(), Some("Note compartilhado"));
    assert_eq!(page.text("alunos-label").as_deref(), Some("Nenhum aluno online"));
    dashboard.stop();
}

#[tokio::test(start_paused = true)]
async fn close_popup_by_markup_key() {
    let (dashboard, page, _) = start(0, Some(0));

    dashboard.dispatch(Action::OpenSupport).await;
    assert!(page.has_class("popup-suporte", "active"));

    let popup: PopupId = "suporte".parse().unwrap();
    dashboard.dispatch(Action::ClosePopup(popup)).await;
    assert!(!page.has_class("popup-suporte", "active"));
    dashboard.stop();
}

#[tokio::test(start_paused = true)]
async fn unload_stops_further_fetches() {
    let (dashboard, _page, calls) = start(0, Some(0));

    tokio::time::sleep(Duration::from_millis(6100)).await;
    let before = calls.load(Ordering::SeqCst);
    assert_eq!(before, 3);

    dashboard
        .handle_event(&PageEvent::BeforeUnload)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(calls.load(Ordering::SeqCst), before);
}
