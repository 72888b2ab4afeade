use crate::page::{Page, PageEvent, Style, COLOR_DANGER, COLOR_MUTED, COLOR_NEUTRAL_BORDER};

pub type Validator = fn(&str) -> bool;

/// What one input event did to the field and its counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterState {
    pub length: usize,
    pub max_length: usize,
    pub valid: bool,
    pub at_limit: bool,
    pub truncated: bool,
}

/// Live `len/max` counter bound to one input field.
#[derive(Debug, Clone)]
pub struct CharCounter {
    input_id: String,
    counter_id: String,
    max_length: usize,
    validator: Option<Validator>,
}

impl CharCounter {
    /// Bind a counter; `None` when either element is absent from the page.
    pub fn setup(
        page: &impl Page,
        input_id: &str,
        counter_id: &str,
        max_length: usize,
        validator: Option<Validator>,
    ) -> Option<Self> {
        if !page.contains(input_id) || !page.contains(counter_id) {
            return None;
        }
        Some(Self {
            input_id: input_id.to_string(),
            counter_id: counter_id.to_string(),
            max_length,
            validator,
        })
    }

    pub fn handle_event(&self, page: &impl Page, event: &PageEvent) -> Option<CounterState> {
        match event {
            PageEvent::Input { target } if *target == self.input_id => Some(self.on_input(page)),
            _ => None,
        }
    }

    pub fn on_input(&self, page: &impl Page) -> CounterState {
        let value = page.value(&self.input_id).unwrap_or_default();
        let length = value.chars().count();

        page.set_text(&self.counter_id, &format!("{}/{}", length, self.max_length));

        let valid = self.validator.map(|validate| validate(&value)).unwrap_or(true);
        let border = if valid { COLOR_NEUTRAL_BORDER } else { COLOR_DANGER };
        page.set_style(&self.input_id, Style::BorderColor(border));

        let at_limit = length >= self.max_length;
        if at_limit {
            page.set_style(&self.counter_id, Style::TextColor(COLOR_DANGER));
            page.set_style(&self.counter_id, Style::FontWeight(600));
        } else {
            page.set_style(&self.counter_id, Style::TextColor(COLOR_MUTED));
            page.set_style(&self.counter_id, Style::FontWeight(400));
        }

        let truncated = length > self.max_length;
        if truncated {
            let kept: String = value.chars().take(self.max_length).collect();
            page.set_value(&self.input_id, &kept);
        }

        CounterState {
            length,
            max_length: self.max_length,
            valid,
            at_limit,
            truncated,
        }
    }
}
