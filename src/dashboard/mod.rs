//! Live home-page dashboard: periodic counter refresh, detail popups and the
//! custom alert dialog.

mod alert;
mod cards;
mod events;
mod poller;
mod popups;

#[cfg(test)]
mod testing;

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::Config;
use crate::page::{Page, ReadyState};
use crate::studymate_client::{LabelTable, OnlineStudent, StudyMateApi};
use crate::types::DashboardError;

pub use cards::CardUpdate;
pub use events::{is_backdrop_click, is_cancel_key, Subscription};
pub use poller::FetchOutcome;
pub use popups::{PopupId, PopupRegistry};

/// Markup-level entry points of the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenOnlineStudents,
    OpenSubjects,
    OpenNotes,
    OpenSupport,
    ClosePopup(PopupId),
    ShowAlert {
        icon: String,
        title: String,
        message: String,
    },
    DismissAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    /// Waiting for the page content to finish loading.
    Deferred,
    Running,
    Stopped,
}

#[derive(Default)]
struct Timers {
    poll: Option<JoinHandle<()>>,
    ping: Option<JoinHandle<()>>,
}

struct Inner<A, P> {
    api: A,
    page: P,
    config: Config,
    labels: LabelTable,
    is_updating: AtomicBool,
    online_students: RwLock<Vec<OnlineStudent>>,
    registry: OnceLock<PopupRegistry>,
    popup_sequences: popups::Sequences,
    alert: Mutex<Option<crate::page::OverlayId>>,
    subscriptions: Mutex<Vec<Subscription>>,
    lifecycle: Mutex<Lifecycle>,
    timers: Mutex<Timers>,
}

/// Poller/UI-sync controller for one page session.
pub struct LiveDashboard<A, P> {
    inner: Arc<Inner<A, P>>,
}

impl<A, P> Clone for LiveDashboard<A, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, P> LiveDashboard<A, P>
where
    A: StudyMateApi,
    P: Page,
{
    pub fn new(api: A, page: P, config: Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                page,
                config,
                labels: LabelTable::default(),
                is_updating: AtomicBool::new(false),
                online_students: RwLock::new(Vec::new()),
                registry: OnceLock::new(),
                popup_sequences: popups::Sequences::default(),
                alert: Mutex::new(None),
                subscriptions: Mutex::new(Vec::new()),
                lifecycle: Mutex::new(Lifecycle::Created),
                timers: Mutex::new(Timers::default()),
            }),
        }
    }

    pub fn page(&self) -> &P {
        &self.inner.page
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *lock(&self.inner.lifecycle)
    }

    /// Online students from the latest successful aggregate fetch.
    pub fn online_students(&self) -> Vec<OnlineStudent> {
        self.inner
            .online_students
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        lock(&self.inner.subscriptions).clone()
    }

    /// Start the dashboard now, or once the page content has loaded.
    pub fn init(&self) -> Result<(), DashboardError> {
        {
            let lifecycle = lock(&self.inner.lifecycle);
            if *lifecycle != Lifecycle::Created {
                warn!(state = ?*lifecycle, "Dashboard already initialised");
                return Ok(());
            }
        }

        if self.inner.page.ready_state() == ReadyState::Loading {
            self.subscribe(Subscription::ContentLoaded);
            self.subscribe(Subscription::BeforeUnload);
            *lock(&self.inner.lifecycle) = Lifecycle::Deferred;
            info!("Page still loading, deferring dashboard start");
            return Ok(());
        }

        self.start()
    }

    fn start(&self) -> Result<(), DashboardError> {
        {
            let lifecycle = lock(&self.inner.lifecycle);
            if !matches!(*lifecycle, Lifecycle::Created | Lifecycle::Deferred) {
                warn!(state = ?*lifecycle, "Dashboard start skipped");
                return Ok(());
            }
        }

        let registry = PopupRegistry::resolve(&self.inner.page)?;
        let _ = self.inner.registry.set(registry);

        info!("Live dashboard started");

        let first = self.clone();
        tokio::spawn(async move {
            first.fetch_all_stats().await;
        });
        self.schedule_timers();

        for popup in PopupId::ALL {
            self.subscribe(Subscription::BackdropClick(popup));
        }
        self.subscribe(Subscription::AlertOverlayClick);
        self.subscribe(Subscription::CancelKey);
        self.subscribe(Subscription::BeforeUnload);

        *lock(&self.inner.lifecycle) = Lifecycle::Running;
        info!(
            interval_ms = self.inner.config.update_interval_ms,
            "Automatic refresh scheduled"
        );
        Ok(())
    }

    /// Cancel the recurring timers. In-flight requests are left to finish.
    pub fn stop(&self) {
        let mut timers = lock(&self.inner.timers);
        if let Some(handle) = timers.poll.take() {
            handle.abort();
        }
        if let Some(handle) = timers.ping.take() {
            handle.abort();
        }
        self.unsubscribe(Subscription::ContentLoaded);
        *lock(&self.inner.lifecycle) = Lifecycle::Stopped;
        info!("Live dashboard stopped");
    }

    pub async fn dispatch(&self, action: Action) {
        match action {
            Action::OpenOnlineStudents => self.open_online_students().await,
            Action::OpenSubjects => self.open_subjects().await,
            Action::OpenNotes => self.open_notes().await,
            Action::OpenSupport => self.open_support(),
            Action::ClosePopup(popup) => self.close_popup(popup),
            Action::ShowAlert {
                icon,
                title,
                message,
            } => {
                self.show_alert(&icon, &title, &message);
            }
            Action::DismissAlert => self.dismiss_alert().await,
        }
    }

    fn registry(&self) -> Option<&PopupRegistry> {
        let registry = self.inner.registry.get();
        if registry.is_none() {
            warn!("Dashboard not initialised yet, ignoring popup request");
        }
        registry
    }

    fn subscribe(&self, subscription: Subscription) {
        let mut subscriptions = lock(&self.inner.subscriptions);
        if !subscriptions.contains(&subscription) {
            subscriptions.push(subscription);
        }
    }

    fn unsubscribe(&self, subscription: Subscription) {
        lock(&self.inner.subscriptions).retain(|existing| *existing != subscription);
    }

    fn is_subscribed(&self, subscription: Subscription) -> bool {
        lock(&self.inner.subscriptions).contains(&subscription)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
