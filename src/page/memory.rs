use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::studymate_client::CardKind;

use super::{Content, Overlay, OverlayId, Page, ReadyState, Style};

/// State of one element, as seen by tests and the headless binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    pub text: String,
    pub value: String,
    pub classes: BTreeSet<String>,
    pub scale: f32,
    pub border_color: Option<&'static str>,
    pub text_color: Option<&'static str>,
    pub font_weight: Option<u16>,
    pub content: Option<Content>,
}

impl Default for ElementSnapshot {
    fn default() -> Self {
        Self {
            text: String::new(),
            value: String::new(),
            classes: BTreeSet::new(),
            scale: 1.0,
            border_color: None,
            text_color: None,
            font_weight: None,
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MountedOverlay {
    pub id: OverlayId,
    pub overlay: Overlay,
    pub leaving: bool,
}

struct PageState {
    ready_state: ReadyState,
    elements: HashMap<String, ElementSnapshot>,
    overlays: Vec<MountedOverlay>,
    next_overlay: u64,
    navigations: Vec<String>,
    focused: Option<String>,
}

/// In-memory page used by the headless binary and tests.
#[derive(Clone)]
pub struct MemoryPage {
    state: Arc<Mutex<PageState>>,
}

impl MemoryPage {
    pub fn new(ready_state: ReadyState) -> Self {
        Self {
            state: Arc::new(Mutex::new(PageState {
                ready_state,
                elements: HashMap::new(),
                overlays: Vec::new(),
                next_overlay: 1,
                navigations: Vec::new(),
                focused: None,
            })),
        }
    }

    /// The home page: three cards, four popups, the popup body and the alert
    /// backdrop.
    pub fn dashboard(ready_state: ReadyState) -> Self {
        let page = Self::new(ready_state);
        for card in CardKind::ALL {
            page.insert_with_text(&card.count_id(), "0");
            page.insert(&card.label_id());
        }
        for popup in ["alunos-online", "materias", "notes", "suporte"] {
            page.insert(&format!("popup-{popup}"));
        }
        page.insert("alunos-online-content");
        page.insert("alert-overlay");
        page
    }

    pub fn insert(&self, id: &str) {
        self.state()
            .elements
            .entry(id.to_string())
            .or_default();
    }

    pub fn insert_with_text(&self, id: &str, text: &str) {
        self.state()
            .elements
            .entry(id.to_string())
            .or_default()
            .text = text.to_string();
    }

    pub fn remove(&self, id: &str) {
        self.state().elements.remove(id);
    }

    pub fn set_ready_state(&self, ready_state: ReadyState) {
        self.state().ready_state = ready_state;
    }

    pub fn element(&self, id: &str) -> Option<ElementSnapshot> {
        self.state().elements.get(id).cloned()
    }

    pub fn overlays(&self) -> Vec<MountedOverlay> {
        self.state().overlays.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state().navigations.clone()
    }

    pub fn focused(&self) -> Option<String> {
        self.state().focused.clone()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_element(&self, id: &str, apply: impl FnOnce(&mut ElementSnapshot)) {
        if let Some(element) = self.state().elements.get_mut(id) {
            apply(element);
        }
    }
}

impl Page for MemoryPage {
    fn ready_state(&self) -> ReadyState {
        self.state().ready_state
    }

    fn contains(&self, id: &str) -> bool {
        self.state().elements.contains_key(id)
    }

    fn text(&self, id: &str) -> Option<String> {
        self.state().elements.get(id).map(|e| e.text.clone())
    }

    fn set_text(&self, id: &str, text: &str) {
        self.with_element(id, |element| {
            if element.text != text {
                info!(element = %id, text = %text, "Element text updated");
            }
            element.text = text.to_string();
        });
    }

    fn set_style(&self, id: &str, style: Style) {
        debug!(element = %id, ?style, "Style applied");
        self.with_element(id, |element| match style {
            Style::Scale(scale) => element.scale = scale,
            Style::BorderColor(color) => element.border_color = Some(color),
            Style::TextColor(color) => element.text_color = Some(color),
            Style::FontWeight(weight) => element.font_weight = Some(weight),
        });
    }

    fn add_class(&self, id: &str, class: &str) {
        self.with_element(id, |element| {
            if element.classes.insert(class.to_string()) {
                debug!(element = %id, class = %class, "Class added");
            }
        });
    }

    fn remove_class(&self, id: &str, class: &str) {
        self.with_element(id, |element| {
            if element.classes.remove(class) {
                debug!(element = %id, class = %class, "Class removed");
            }
        });
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.state()
            .elements
            .get(id)
            .map(|e| e.classes.contains(class))
            .unwrap_or(false)
    }

    fn render(&self, id: &str, content: Content) {
        info!(element = %id, ?content, "Content rendered");
        self.with_element(id, |element| element.content = Some(content));
    }

    fn mount(&self, overlay: Overlay) -> OverlayId {
        let mut state = self.state();
        let id = OverlayId(state.next_overlay);
        state.next_overlay += 1;
        info!(overlay = id.0, ?overlay, "Overlay mounted");
        state.overlays.push(MountedOverlay {
            id,
            overlay,
            leaving: false,
        });
        id
    }

    fn animate_out(&self, overlay: OverlayId) {
        if let Some(mounted) = self
            .state()
            .overlays
            .iter_mut()
            .find(|mounted| mounted.id == overlay)
        {
            mounted.leaving = true;
        }
    }

    fn unmount(&self, overlay: OverlayId) -> bool {
        let mut state = self.state();
        let before = state.overlays.len();
        state.overlays.retain(|mounted| mounted.id != overlay);
        let removed = state.overlays.len() != before;
        if removed {
            debug!(overlay = overlay.0, "Overlay removed");
        }
        removed
    }

    fn navigate(&self, path: &str) {
        info!(path = %path, "Navigating");
        self.state().navigations.push(path.to_string());
    }

    fn value(&self, id: &str) -> Option<String> {
        self.state().elements.get(id).map(|e| e.value.clone())
    }

    fn set_value(&self, id: &str, value: &str) {
        self.with_element(id, |element| element.value = value.to_string());
    }

    fn focus(&self, id: &str) {
        let mut state = self.state();
        if state.elements.contains_key(id) {
            state.focused = Some(id.to_string());
        }
    }
}
