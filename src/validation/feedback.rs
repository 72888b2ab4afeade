use std::time::Duration;

use tokio::time;
use tracing::debug;

use crate::page::{
    Overlay, OverlayId, Page, Style, Toast, ToastKind, COLOR_HIGHLIGHT_BORDER,
    COLOR_NEUTRAL_BORDER,
};

pub const TOAST_DURATION: Duration = Duration::from_millis(3000);
pub const TOAST_EXIT_DURATION: Duration = Duration::from_millis(300);
pub const FIELD_HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);
pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Você esqueceu de preencher todos os campos obrigatórios.";

/// Transient notification: slides out after 3 s and is removed right after.
pub fn show_toast<P>(page: &P, message: &str, kind: ToastKind) -> OverlayId
where
    P: Page + Clone,
{
    let overlay = page.mount(Overlay::Toast(Toast {
        message: message.to_string(),
        kind,
    }));

    let page = page.clone();
    tokio::spawn(async move {
        time::sleep(TOAST_DURATION).await;
        page.animate_out(overlay);
        time::sleep(TOAST_EXIT_DURATION).await;
        page.unmount(overlay);
    });

    overlay
}

/// Flag a field, focus it and optionally explain why with an error toast.
pub fn highlight_field_error<P>(page: &P, field_id: &str, message: Option<&str>)
where
    P: Page + Clone,
{
    page.set_style(field_id, Style::BorderColor(COLOR_HIGHLIGHT_BORDER));
    page.focus(field_id);

    if let Some(message) = message {
        show_toast(page, message, ToastKind::Error);
    }

    let page = page.clone();
    let field_id = field_id.to_string();
    tokio::spawn(async move {
        time::sleep(FIELD_HIGHLIGHT_DURATION).await;
        page.set_style(&field_id, Style::BorderColor(COLOR_NEUTRAL_BORDER));
    });
}

/// Highlight every blank required field. One toast covers all of them.
pub fn validate_required_fields<P>(page: &P, required: &[&str]) -> bool
where
    P: Page + Clone,
{
    let empty: Vec<&str> = required
        .iter()
        .copied()
        .filter(|field_id| {
            page.value(field_id)
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        })
        .collect();

    for field_id in &empty {
        highlight_field_error(page, field_id, None);
    }

    if empty.is_empty() {
        return true;
    }

    debug!(fields = ?empty, "Required fields missing");
    show_toast(page, REQUIRED_FIELDS_MESSAGE, ToastKind::Error);
    false
}
