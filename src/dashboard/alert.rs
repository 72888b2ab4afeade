use tokio::time;
use tracing::debug;

use crate::page::{AlertDialog, Overlay, OverlayId, Page, SHOW_CLASS};
use crate::studymate_client::StudyMateApi;

use super::{lock, LiveDashboard};

const ACKNOWLEDGE_LABEL: &str = "Entendi";

impl<A, P> LiveDashboard<A, P>
where
    A: StudyMateApi,
    P: Page,
{
    /// Mount the custom alert over the shared backdrop. A live alert is
    /// replaced, never stacked.
    pub fn show_alert(&self, icon: &str, title: &str, message: &str) -> Option<OverlayId> {
        let registry = self.registry()?;
        let page = &self.inner.page;

        let mut current = lock(&self.inner.alert);
        if let Some(previous) = current.take() {
            debug!(overlay = previous.0, "Replacing live alert");
            page.unmount(previous);
        }

        page.add_class(registry.alert_overlay(), SHOW_CLASS);
        let overlay = page.mount(Overlay::Alert(AlertDialog {
            icon: icon.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            button_label: ACKNOWLEDGE_LABEL.to_string(),
        }));
        *current = Some(overlay);
        Some(overlay)
    }

    pub fn has_alert(&self) -> bool {
        lock(&self.inner.alert).is_some()
    }

    /// Play the exit animation, then drop the dialog and hide the backdrop.
    pub async fn dismiss_alert(&self) {
        let live = lock(&self.inner.alert).take();
        let Some(overlay) = live else {
            return;
        };
        let page = &self.inner.page;

        page.animate_out(overlay);
        time::sleep(self.inner.config.alert_animation()).await;
        page.unmount(overlay);

        // A new alert may have been shown while this one was fading out.
        if !self.has_alert() {
            if let Some(registry) = self.inner.registry.get() {
                page.remove_class(registry.alert_overlay(), SHOW_CLASS);
            }
        }
    }
}
