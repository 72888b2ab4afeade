//! The rendering surface the dashboard drives.
//!
//! Elements are addressed by the id conventions of the home page template
//! (`materias-count`, `popup-suporte`, ...). Every operation on a missing id
//! is a no-op; callers that need an element to exist check `contains` first.

mod memory;

pub use memory::{ElementSnapshot, MemoryPage, MountedOverlay};

pub const ACTIVE_CLASS: &str = "active";
pub const SHOW_CLASS: &str = "show";

pub const COLOR_DANGER: &str = "#dc3545";
pub const COLOR_MUTED: &str = "#6c757d";
pub const COLOR_NEUTRAL_BORDER: &str = "#e9ecef";
pub const COLOR_HIGHLIGHT_BORDER: &str = "#8ecae6";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    Scale(f32),
    BorderColor(&'static str),
    TextColor(&'static str),
    FontWeight(u16),
}

/// Structured body rendered into a fillable container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Placeholder {
        emoji: String,
        message: String,
    },
    Message {
        emoji: String,
        title: String,
        body: String,
    },
    Rows(Vec<Row>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Alert(AlertDialog),
    Toast(Toast),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDialog {
    pub icon: String,
    pub title: String,
    pub message: String,
    pub button_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

/// Events delivered by the page to its listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    ContentLoaded,
    /// `current_target` is the element the listener is attached to.
    Click {
        target: String,
        current_target: String,
    },
    KeyDown {
        key: String,
    },
    Input {
        target: String,
    },
    BeforeUnload,
}

pub trait Page: Send + Sync + 'static {
    fn ready_state(&self) -> ReadyState;

    fn contains(&self, id: &str) -> bool;

    fn text(&self, id: &str) -> Option<String>;

    fn set_text(&self, id: &str, text: &str);

    fn set_style(&self, id: &str, style: Style);

    fn add_class(&self, id: &str, class: &str);

    fn remove_class(&self, id: &str, class: &str);

    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Replace the children of a container.
    fn render(&self, id: &str, content: Content);

    /// Append a floating element to the document body.
    fn mount(&self, overlay: Overlay) -> OverlayId;

    /// Start the exit animation of a mounted overlay.
    fn animate_out(&self, overlay: OverlayId);

    /// Returns false when the overlay was already gone.
    fn unmount(&self, overlay: OverlayId) -> bool;

    fn navigate(&self, path: &str);

    fn value(&self, id: &str) -> Option<String>;

    fn set_value(&self, id: &str, value: &str);

    fn focus(&self, id: &str);
}
