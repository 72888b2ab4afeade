use tracing::debug;

use crate::page::{Page, PageEvent, ACTIVE_CLASS, SHOW_CLASS};
use crate::studymate_client::StudyMateApi;
use crate::types::DashboardError;

use super::{LiveDashboard, PopupId};

const CANCEL_KEY: &str = "Escape";

/// Listeners the dashboard attaches to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscription {
    ContentLoaded,
    BackdropClick(PopupId),
    AlertOverlayClick,
    CancelKey,
    BeforeUnload,
}

pub fn is_cancel_key(key: &str) -> bool {
    key == CANCEL_KEY
}

/// True when the click landed on the overlay itself rather than its children.
pub fn is_backdrop_click(target: &str, current_target: &str) -> bool {
    target == current_target
}

impl<A, P> LiveDashboard<A, P>
where
    A: StudyMateApi,
    P: Page,
{
    /// Route a page event to the subscribed handler, if any.
    pub async fn handle_event(&self, event: &PageEvent) -> Result<(), DashboardError> {
        match event {
            PageEvent::ContentLoaded => {
                if self.is_subscribed(Subscription::ContentLoaded) {
                    self.unsubscribe(Subscription::ContentLoaded);
                    self.start()?;
                }
            }
            PageEvent::Click {
                target,
                current_target,
            } => self.handle_click(target, current_target).await,
            PageEvent::KeyDown { key } => {
                if self.is_subscribed(Subscription::CancelKey) && is_cancel_key(key) {
                    self.cancel_all().await;
                }
            }
            PageEvent::BeforeUnload => {
                if self.is_subscribed(Subscription::BeforeUnload) {
                    self.stop();
                }
            }
            PageEvent::Input { .. } => {}
        }
        Ok(())
    }

    async fn handle_click(&self, target: &str, current_target: &str) {
        let Some(registry) = self.inner.registry.get() else {
            return;
        };

        if current_target == registry.alert_overlay() {
            if self.is_subscribed(Subscription::AlertOverlayClick) {
                self.dismiss_alert().await;
            }
            return;
        }

        if let Some(popup) = registry.popup_for(current_target) {
            if self.is_subscribed(Subscription::BackdropClick(popup))
                && is_backdrop_click(target, current_target)
            {
                debug!(popup = ?popup, "Backdrop clicked");
                self.close_popup(popup);
            }
        }
    }

    /// Close every open popup and an open alert.
    async fn cancel_all(&self) {
        let Some(registry) = self.inner.registry.get() else {
            return;
        };
        let page = &self.inner.page;

        for popup in PopupId::ALL {
            if page.has_class(registry.element(popup), ACTIVE_CLASS) {
                page.remove_class(registry.element(popup), ACTIVE_CLASS);
            }
        }

        if page.has_class(registry.alert_overlay(), SHOW_CLASS) {
            self.dismiss_alert().await;
        }
    }
}
