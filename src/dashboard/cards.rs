use tokio::time;

use crate::page::{Page, Style};
use crate::studymate_client::helpers::parse_displayed_count;
use crate::studymate_client::{CardKind, StudyMateApi};

use super::LiveDashboard;

const PULSE_SCALE: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardUpdate {
    /// Count or label element absent from the page.
    Missing,
    /// Displayed count already matched; only the label was written.
    Unchanged,
    Animated { from: u64, to: u64 },
}

impl<A, P> LiveDashboard<A, P>
where
    A: StudyMateApi,
    P: Page,
{
    /// Patch one card. The count pulses and swaps halfway through the
    /// transition, and only when the displayed number actually changes.
    pub fn update_card(&self, card: CardKind, new_count: u64, label: &str) -> CardUpdate {
        let page = &self.inner.page;
        let count_id = card.count_id();
        let label_id = card.label_id();

        if !page.contains(&count_id) || !page.contains(&label_id) {
            return CardUpdate::Missing;
        }

        let old_count = page
            .text(&count_id)
            .map(|text| parse_displayed_count(&text))
            .unwrap_or(0);

        let outcome = if old_count != new_count {
            page.set_style(&count_id, Style::Scale(PULSE_SCALE));

            let half = self.inner.config.transition() / 2;
            let dashboard = self.clone();
            tokio::spawn(async move {
                time::sleep(half).await;
                let page = &dashboard.inner.page;
                page.set_text(&count_id, &new_count.to_string());
                page.set_style(&count_id, Style::Scale(1.0));
            });

            CardUpdate::Animated {
                from: old_count,
                to: new_count,
            }
        } else {
            CardUpdate::Unchanged
        };

        page.set_text(&label_id, label);
        outcome
    }
}
