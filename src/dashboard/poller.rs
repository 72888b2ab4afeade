use std::sync::atomic::{AtomicBool, Ordering};

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::page::Page;
use crate::studymate_client::{CardKind, StatsSnapshot, StudyMateApi};

use super::{lock, LiveDashboard};

/// What a single aggregate fetch cycle ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Another cycle was in flight.
    Skipped,
    Applied,
    /// The server answered with `success: false`.
    Rejected,
    /// Transport failure, bad status or undecodable body.
    Failed,
}

/// Single-flight token, released when dropped.
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<A, P> LiveDashboard<A, P>
where
    A: StudyMateApi,
    P: Page,
{
    pub fn is_updating(&self) -> bool {
        self.inner.is_updating.load(Ordering::Acquire)
    }

    /// Fetch the aggregate counters and patch the cards.
    /// A call made while another one is in flight returns `Skipped` at once.
    pub async fn fetch_all_stats(&self) -> FetchOutcome {
        let Some(_guard) = FlightGuard::acquire(&self.inner.is_updating) else {
            return FetchOutcome::Skipped;
        };

        let response = match self.inner.api.fetch_stats().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = ?err, "Failed to fetch dashboard stats");
                return FetchOutcome::Failed;
            }
        };

        match StatsSnapshot::from_response(&response) {
            Ok(snapshot) => {
                self.apply_snapshot(snapshot);
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, "Stats endpoint reported a failure");
                FetchOutcome::Rejected
            }
        }
    }

    fn apply_snapshot(&self, snapshot: StatsSnapshot) {
        for card in CardKind::ALL {
            let count = snapshot.count(card);
            let label = self.inner.labels.label(card, count);
            self.update_card(card, count, label);
        }

        info!(
            materias = snapshot.subjects,
            notes = snapshot.notes,
            alunos = snapshot.online_students,
            "Stats updated"
        );

        *self
            .inner
            .online_students
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = snapshot.students;
    }

    /// Spawn the recurring refresh and, when configured, the heartbeat.
    /// Every tick runs its fetch in its own task so that a slow response never
    /// delays the schedule; the flight guard drops overlapping ticks.
    pub(super) fn schedule_timers(&self) {
        let period = self.inner.config.update_interval();
        let poller = self.clone();
        let poll = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let tick = poller.clone();
                tokio::spawn(async move {
                    if tick.fetch_all_stats().await == FetchOutcome::Skipped {
                        debug!("Previous refresh still in flight, tick skipped");
                    }
                });
            }
        });

        let ping = self.inner.config.ping_interval().map(|period| {
            let heartbeat = self.clone();
            tokio::spawn(async move {
                let mut ticker = time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    heartbeat.send_heartbeat().await;
                }
            })
        });

        let mut timers = lock(&self.inner.timers);
        timers.poll = Some(poll);
        timers.ping = ping;
    }

    async fn send_heartbeat(&self) {
        match self.inner.api.ping().await {
            Ok(response) if response.success => debug!("Activity heartbeat sent"),
            Ok(response) => warn!(
                error = ?response.error,
                "Activity heartbeat rejected"
            ),
            Err(err) => warn!(error = ?err, "Failed to send activity heartbeat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::*;
    use crate::dashboard::testing::{dashboard_page, stats, FakeApi};
    use crate::dashboard::LiveDashboard;
    use crate::page::{Content, MemoryPage, Overlay, OverlayId, ReadyState, Style};
    use crate::types::DashboardError;

    /// Page whose text reads blow up, as a broken renderer would.
    struct PanickingPage(MemoryPage);

    impl Page for PanickingPage {
        fn ready_state(&self) -> ReadyState {
            self.0.ready_state()
        }

        fn contains(&self, id: &str) -> bool {
            self.0.contains(id)
        }

        fn text(&self, id: &str) -> Option<String> {
            panic!("text lookup failed for {id}");
        }

        fn set_text(&self, id: &str, text: &str) {
            self.0.set_text(id, text)
        }

        fn set_style(&self, id: &str, style: Style) {
            self.0.set_style(id, style)
        }

        fn add_class(&self, id: &str, class: &str) {
            self.0.add_class(id, class)
        }

        fn remove_class(&self, id: &str, class: &str) {
            self.0.remove_class(id, class)
        }

        fn has_class(&self, id: &str, class: &str) -> bool {
            self.0.has_class(id, class)
        }

        fn render(&self, id: &str, content: Content) {
            self.0.render(id, content)
        }

        fn mount(&self, overlay: Overlay) -> OverlayId {
            self.0.mount(overlay)
        }

        fn animate_out(&self, overlay: OverlayId) {
            self.0.animate_out(overlay)
        }

        fn unmount(&self, overlay: OverlayId) -> bool {
            self.0.unmount(overlay)
        }

        fn navigate(&self, path: &str) {
            self.0.navigate(path)
        }

        fn value(&self, id: &str) -> Option<String> {
            self.0.value(id)
        }

        fn set_value(&self, id: &str, value: &str) {
            self.0.set_value(id, value)
        }

        fn focus(&self, id: &str) {
            self.0.focus(id)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn applies_successful_snapshot() {
        let api = FakeApi::with_stats(Ok(stats(2, 0, 1)));
        let page = dashboard_page(ReadyState::Complete);
        let dashboard = LiveDashboard::new(api, page.clone(), Default::default());

        assert_eq!(dashboard.fetch_all_stats().await, FetchOutcome::Applied);
        time::sleep(Duration::from_millis(200)).await;

        assert_eq!(page.text("materias-count").as_deref(), Some("2"));
        assert_eq!(page.text("notes-label").as_deref(), Some("Nenhum note criado"));
        assert_eq!(page.text("alunos-count").as_deref(), Some("1"));
        assert_eq!(page.text("alunos-label").as_deref(), Some("Estudante online"));
        assert_eq!(dashboard.online_students().len(), 1);
        assert!(!dashboard.is_updating());
    }

    #[tokio::test(start_paused = true)]
    async fn guard_is_released_after_failures() {
        let api = FakeApi::with_stats(Err(DashboardError::Status {
            path: "stats/".to_string(),
            status: 500,
        }));
        let page = dashboard_page(ReadyState::Complete);
        let dashboard = LiveDashboard::new(api, page.clone(), Default::default());

        assert_eq!(dashboard.fetch_all_stats().await, FetchOutcome::Failed);
        assert!(!dashboard.is_updating());
        assert_eq!(dashboard.fetch_all_stats().await, FetchOutcome::Failed);
        assert_eq!(page.text("materias-count").as_deref(), Some("0"));
    }

    #[tokio::test(start_paused = true)]
    async fn guard_is_released_when_rendering_panics() {
        let api = FakeApi::with_stats(Ok(stats(3, 1, 0)));
        let page = PanickingPage(dashboard_page(ReadyState::Complete));
        let dashboard = LiveDashboard::new(api, page, Default::default());

        let task = dashboard.clone();
        let result = tokio::spawn(async move { task.fetch_all_stats().await }).await;

        assert!(result.unwrap_err().is_panic());
        assert!(!dashboard.is_updating());
    }

    #[tokio::test(start_paused = true)]
    async fn server_reported_failure_leaves_page_untouched() {
        let mut response = stats(5, 5, 5);
        response.success = false;
        response.error = Some("boom".to_string());
        let page = dashboard_page(ReadyState::Complete);
        let dashboard =
            LiveDashboard::new(FakeApi::with_stats(Ok(response)), page.clone(), Default::default());

        assert_eq!(dashboard.fetch_all_stats().await, FetchOutcome::Rejected);
        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(page.text("notes-count").as_deref(), Some("0"));
        assert_eq!(page.text("notes-label").as_deref(), Some(""));
        assert!(!dashboard.is_updating());
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_cycle_is_skipped_not_queued() {
        let api = FakeApi::with_stats(Ok(stats(1, 1, 1))).gated();
        let gate = api.gate();
        let calls = api.stats_calls();
        let page = dashboard_page(ReadyState::Complete);
        let dashboard = LiveDashboard::new(api, page, Default::default());

        let first = {
            let dashboard = dashboard.clone();
            tokio::spawn(async move { dashboard.fetch_all_stats().await })
        };
        tokio::task::yield_now().await;
        assert!(dashboard.is_updating());

        assert_eq!(dashboard.fetch_all_stats().await, FetchOutcome::Skipped);

        gate.notify_one();
        assert_eq!(first.await.unwrap(), FetchOutcome::Applied);
        assert!(!dashboard.is_updating());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_keeps_polling_until_stopped() {
        let api = FakeApi::with_stats(Ok(stats(0, 0, 0)));
        let calls = api.stats_calls();
        let page = dashboard_page(ReadyState::Complete);
        let dashboard = LiveDashboard::new(api, page, Default::default());

        dashboard.init().unwrap();
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        dashboard.stop();
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn heartbeat_follows_its_own_interval() {
        let api = FakeApi::with_stats(Ok(stats(0, 0, 0)));
        let pings = api.ping_calls();
        let page = dashboard_page(ReadyState::Complete);
        let config = crate::config::Config {
            ping_interval_ms: Some(60_000),
            ..Default::default()
        };
        let dashboard = LiveDashboard::new(api, page, config);

        dashboard.init().unwrap();
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(pings.load(Ordering::SeqCst), 1);
        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(pings.load(Ordering::SeqCst), 2);

        dashboard.stop();
        time::sleep(Duration::from_secs(600)).await;
        assert_eq!(pings.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn no_heartbeat_without_interval() {
        let api = FakeApi::with_stats(Ok(stats(0, 0, 0)));
        let pings = api.ping_calls();
        let dashboard = LiveDashboard::new(
            api,
            dashboard_page(ReadyState::Complete),
            Default::default(),
        );

        dashboard.init().unwrap();
        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(pings.load(Ordering::SeqCst), 0);
        dashboard.stop();
    }
}
