use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::config::StaleResponsePolicy;
use crate::page::{Content, Page, Row, ACTIVE_CLASS};
use crate::studymate_client::{CountResource, OnlineStudent, StudyMateApi};
use crate::types::DashboardError;

use super::LiveDashboard;

const STUDENTS_CONTENT_ID: &str = "alunos-online-content";
const ALERT_OVERLAY_ID: &str = "alert-overlay";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupId {
    OnlineStudents,
    Subjects,
    Notes,
    Support,
}

impl PopupId {
    pub const ALL: [PopupId; 4] = [
        PopupId::OnlineStudents,
        PopupId::Subjects,
        PopupId::Notes,
        PopupId::Support,
    ];

    /// Key used by the page markup (`fecharPopup('suporte')`).
    pub fn key(self) -> &'static str {
        match self {
            PopupId::OnlineStudents => "alunos-online",
            PopupId::Subjects => "materias",
            PopupId::Notes => "notes",
            PopupId::Support => "suporte",
        }
    }

    pub fn element_id(self) -> String {
        format!("popup-{}", self.key())
    }

    fn index(self) -> usize {
        match self {
            PopupId::OnlineStudents => 0,
            PopupId::Subjects => 1,
            PopupId::Notes => 2,
            PopupId::Support => 3,
        }
    }
}

impl FromStr for PopupId {
    type Err = DashboardError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        PopupId::ALL
            .into_iter()
            .find(|popup| popup.key() == key)
            .ok_or_else(|| DashboardError::MissingElement(format!("popup-{key}")))
    }
}

/// Popup element handles, resolved and checked once when the dashboard starts.
#[derive(Debug, Clone)]
pub struct PopupRegistry {
    popups: [(PopupId, String); 4],
    students_content: String,
    alert_overlay: String,
}

impl PopupRegistry {
    pub fn resolve(page: &impl Page) -> Result<Self, DashboardError> {
        let popups = PopupId::ALL.map(|popup| (popup, popup.element_id()));
        for (_, element_id) in &popups {
            require(page, element_id)?;
        }
        require(page, STUDENTS_CONTENT_ID)?;
        require(page, ALERT_OVERLAY_ID)?;

        Ok(Self {
            popups,
            students_content: STUDENTS_CONTENT_ID.to_string(),
            alert_overlay: ALERT_OVERLAY_ID.to_string(),
        })
    }

    pub fn element(&self, popup: PopupId) -> &str {
        &self.popups[popup.index()].1
    }

    /// Reverse lookup used for click targets.
    pub fn popup_for(&self, element_id: &str) -> Option<PopupId> {
        self.popups
            .iter()
            .find(|(_, id)| id == element_id)
            .map(|(popup, _)| *popup)
    }

    pub fn students_content(&self) -> &str {
        &self.students_content
    }

    pub fn alert_overlay(&self) -> &str {
        &self.alert_overlay
    }
}

fn require(page: &impl Page, element_id: &str) -> Result<(), DashboardError> {
    if page.contains(element_id) {
        Ok(())
    } else {
        Err(DashboardError::MissingElement(element_id.to_string()))
    }
}

/// Per-popup request counters used to spot superseded responses.
#[derive(Default)]
pub(super) struct Sequences([AtomicU64; 4]);

#[derive(Debug, Clone, Copy)]
struct Ticket {
    popup: PopupId,
    seq: u64,
}

impl<A, P> LiveDashboard<A, P>
where
    A: StudyMateApi,
    P: Page,
{
    pub fn open_popup(&self, popup: PopupId) {
        if let Some(registry) = self.registry() {
            self.inner.page.add_class(registry.element(popup), ACTIVE_CLASS);
        }
    }

    pub fn close_popup(&self, popup: PopupId) {
        if let Some(registry) = self.registry() {
            self.inner
                .page
                .remove_class(registry.element(popup), ACTIVE_CLASS);
        }
    }

    pub fn is_popup_open(&self, popup: PopupId) -> bool {
        self.inner
            .registry
            .get()
            .map(|registry| self.inner.page.has_class(registry.element(popup), ACTIVE_CLASS))
            .unwrap_or(false)
    }

    pub fn open_support(&self) {
        self.open_popup(PopupId::Support);
    }

    /// Show the popup with a loading placeholder, then fill it from a fresh
    /// online-students request.
    pub async fn open_online_students(&self) {
        let Some(registry) = self.registry() else {
            return;
        };
        let content_id = registry.students_content();
        let page = &self.inner.page;

        page.render(
            content_id,
            Content::Placeholder {
                emoji: "⏳".to_string(),
                message: "Carregando alunos online...".to_string(),
            },
        );
        self.open_popup(PopupId::OnlineStudents);

        let ticket = self.begin_request(PopupId::OnlineStudents);
        let result = self.inner.api.fetch_online_students().await;
        if !self.is_current(ticket) {
            debug!(popup = ?ticket.popup, "Dropping superseded online students response");
            return;
        }

        let content = match result {
            Ok(response) if response.success => {
                if response.count == 0 {
                    Content::Message {
                        emoji: "😴".to_string(),
                        title: "Nenhum aluno online no momento".to_string(),
                        body: "Parece que todos estão descansando ou estudando offline!"
                            .to_string(),
                    }
                } else {
                    Content::Rows(
                        response
                            .students
                            .iter()
                            .map(OnlineStudent::from_entry)
                            .map(|student| Row {
                                subtitle: student.status_line(),
                                title: student.name,
                            })
                            .collect(),
                    )
                }
            }
            Ok(response) => {
                warn!(
                    error = response.error.as_deref().unwrap_or("unknown error"),
                    "Online students endpoint reported a failure"
                );
                load_error()
            }
            Err(err) => {
                warn!(error = ?err, "Failed to load online students");
                load_error()
            }
        };

        page.render(content_id, content);
    }

    pub async fn open_subjects(&self) {
        self.open_listing(CountResource::Subjects).await;
    }

    pub async fn open_notes(&self) {
        self.open_listing(CountResource::Notes).await;
    }

    /// Alert when the listing would be empty, navigate otherwise. A failed
    /// count check still navigates.
    async fn open_listing(&self, resource: CountResource) {
        let (popup, listing) = match resource {
            CountResource::Subjects => (
                PopupId::Subjects,
                self.inner.config.listing_pages.materias.clone(),
            ),
            CountResource::Notes => (
                PopupId::Notes,
                self.inner.config.listing_pages.notes.clone(),
            ),
        };

        let ticket = self.begin_request(popup);
        let result = self.inner.api.fetch_count(resource).await;
        if !self.is_current(ticket) {
            debug!(popup = ?ticket.popup, "Dropping superseded count response");
            return;
        }

        match result {
            Ok(response) if response.success && response.count == 0 => {
                let (icon, title, message) = match resource {
                    CountResource::Subjects => (
                        "📚",
                        "Nenhuma matéria cadastrada ainda",
                        "Em breve novas matérias serão adicionadas pela equipe!",
                    ),
                    CountResource::Notes => (
                        "📝",
                        "Nenhum note compartilhado ainda",
                        "Seja o primeiro a criar e compartilhar um note com a comunidade!",
                    ),
                };
                self.show_alert(icon, title, message);
            }
            Ok(_) => self.inner.page.navigate(&listing),
            Err(err) => {
                warn!(resource = ?resource, error = ?err, "Failed to check listing count");
                self.inner.page.navigate(&listing);
            }
        }
    }

    fn begin_request(&self, popup: PopupId) -> Ticket {
        let seq = self.inner.popup_sequences.0[popup.index()].fetch_add(1, Ordering::AcqRel) + 1;
        Ticket { popup, seq }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        match self.inner.config.stale_responses {
            StaleResponsePolicy::RenderLatestArrival => true,
            StaleResponsePolicy::DiscardSuperseded => {
                self.inner.popup_sequences.0[ticket.popup.index()].load(Ordering::Acquire)
                    == ticket.seq
            }
        }
    }
}

fn load_error() -> Content {
    Content::Message {
        emoji: "⚠️".to_string(),
        title: "Erro ao carregar dados".to_string(),
        body: "Não foi possível conectar ao servidor. Tente novamente.".to_string(),
    }
}
