//! Input feature sidebar.

use std::ops::Range;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{ControlKind, FeatureDescriptor, InputVector, FEATURES};
use crate::domain::feature::{round_to_step, STEP};
use crate::tui::styles::SolarTheme;

/// One bounded control.
#[derive(Debug, Clone)]
pub struct FeatureControl {
    pub descriptor: &'static FeatureDescriptor,
    pub label: String,
    pub value: f64,
    /// Uncommitted text typed into a numeric entry
    pub buffer: Option<String>,
}

impl FeatureControl {
    fn new(descriptor: &'static FeatureDescriptor) -> Self {
        Self {
            descriptor,
            label: descriptor.label(),
            value: descriptor.mean,
            buffer: None,
        }
    }

    fn nudge(&mut self, delta: f64) {
        self.buffer = None;
        self.value = self.descriptor.snap(self.value + delta);
    }

    /// Parse and range-check the pending text, keeping the old value on failure.
    fn commit(&mut self) -> Result<(), String> {
        let Some(text) = self.buffer.take() else {
            return Ok(());
        };
        let d = self.descriptor;

        let parsed: f64 = text
            .trim()
            .parse()
            .map_err(|_| format!("{}: Invalid number", self.label))?;
        let value = round_to_step(parsed);
        if !value.is_finite() || !d.contains(value) {
            return Err(format!(
                "{}: Value must be between {:.2} and {:.2}",
                self.label, d.min, d.max
            ));
        }

        self.value = value;
        Ok(())
    }

    /// Text shown in the control.
    #[must_use]
    pub fn display_value(&self) -> String {
        match &self.buffer {
            Some(text) => text.clone(),
            None => format!("{:.2}", self.value),
        }
    }
}

/// Sidebar state: one control per feature, in model order.
pub struct FeatureFormState {
    pub controls: Vec<FeatureControl>,
    pub selected: usize,
    pub error_message: Option<String>,
}

impl Default for FeatureFormState {
    fn default() -> Self {
        Self {
            controls: FEATURES.iter().map(FeatureControl::new).collect(),
            selected: 0,
            error_message: None,
        }
    }
}

impl FeatureFormState {
    fn current(&mut self) -> &mut FeatureControl {
        &mut self.controls[self.selected]
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.commit_or_report();
        self.selected = (self.selected + 1) % self.controls.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        self.commit_or_report();
        if self.selected == 0 {
            self.selected = self.controls.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Fine step up/down (`direction` is +1 or -1).
    ///
    /// Pending text in a numeric entry is committed first; a rejected entry is not stepped.
    pub fn step(&mut self, direction: f64) {
        if self.commit_current() {
            self.current().nudge(direction * STEP);
        }
    }

    /// Coarse step up/down (`direction` is +1 or -1).
    pub fn page(&mut self, direction: f64) {
        if self.commit_current() {
            let coarse = self.current().descriptor.coarse_step();
            self.current().nudge(direction * coarse);
        }
    }

    /// Jump to the range minimum.
    pub fn to_min(&mut self) {
        let min = self.current().descriptor.min;
        let control = self.current();
        control.buffer = None;
        control.value = min;
        self.error_message = None;
    }

    /// Jump to the range maximum.
    pub fn to_max(&mut self) {
        let max = self.current().descriptor.max;
        let control = self.current();
        control.buffer = None;
        control.value = max;
        self.error_message = None;
    }

    /// Type a character into the current numeric entry. Sliders ignore typing.
    pub fn input_char(&mut self, c: char) {
        let control = self.current();
        if control.descriptor.control != ControlKind::NumericEntry {
            return;
        }
        if c.is_ascii_digit() || c == '.' || c == '-' {
            control.buffer.get_or_insert_with(String::new).push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character of the current numeric entry.
    pub fn delete_char(&mut self) {
        let control = self.current();
        if control.descriptor.control != ControlKind::NumericEntry {
            return;
        }
        let value = control.value;
        let text = control
            .buffer
            .get_or_insert_with(|| format!("{value:.2}"));
        text.pop();
    }

    /// Reset the current control to its mean.
    pub fn reset_field(&mut self) {
        let control = self.current();
        control.buffer = None;
        control.value = control.descriptor.mean;
        self.error_message = None;
    }

    /// Reset every control to its mean.
    pub fn reset_all(&mut self) {
        for control in self.controls.iter_mut() {
            control.buffer = None;
            control.value = control.descriptor.mean;
        }
        self.error_message = None;
    }

    /// Commit all pending numeric entries.
    ///
    /// # Errors
    /// Returns the first rejection message; rejected entries keep their previous value.
    pub fn commit_pending(&mut self) -> Result<(), String> {
        let mut first_error = None;
        for control in self.controls.iter_mut() {
            if let Err(e) = control.commit() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => {
                self.error_message = Some(e.clone());
                Err(e)
            }
            None => Ok(()),
        }
    }

    /// Commit the selected control's pending text, reporting a rejection inline.
    fn commit_current(&mut self) -> bool {
        match self.current().commit() {
            Ok(()) => {
                self.error_message = None;
                true
            }
            Err(e) => {
                self.error_message = Some(e);
                false
            }
        }
    }

    fn commit_or_report(&mut self) {
        if self.commit_pending().is_ok() {
            self.error_message = None;
        }
    }

    /// Current committed values in model order.
    #[must_use]
    pub fn input_vector(&self) -> InputVector {
        let values: Vec<f64> = self.controls.iter().map(|c| c.value).collect();
        InputVector::from_slice(&values).unwrap_or_default()
    }
}

/// Rows of controls visible in a window of `capacity` rows, keeping `selected` in view.
#[must_use]
pub fn visible_window(selected: usize, total: usize, capacity: usize) -> Range<usize> {
    if capacity == 0 || total == 0 {
        return 0..0;
    }
    if total <= capacity {
        return 0..total;
    }
    let start = selected.saturating_sub(capacity / 2).min(total - capacity);
    start..start + capacity
}

/// Knob position on a track of `width` cells.
#[must_use]
pub fn slider_position(value: f64, descriptor: &FeatureDescriptor, width: usize) -> usize {
    if width <= 1 {
        return 0;
    }
    let ratio = ((value - descriptor.min) / (descriptor.max - descriptor.min)).clamp(0.0, 1.0);
    (ratio * (width - 1) as f64).round() as usize
}

/// Render the input feature sidebar
pub fn render_form(f: &mut Frame, area: Rect, state: &FeatureFormState, editable: bool) {
    let block = Block::default()
        .title(Span::styled(" Input Features ", SolarTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(if editable {
            SolarTheme::border_focused()
        } else {
            SolarTheme::border()
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    // 2 rows per control, 1 reserved for the error line
    let capacity = (inner.height.saturating_sub(1) / 2) as usize;
    let window = visible_window(state.selected, state.controls.len(), capacity);
    let track_width = (inner.width as usize).saturating_sub(14).max(4);

    let mut lines = Vec::with_capacity(window.len() * 2 + 1);
    for i in window {
        let control = &state.controls[i];
        let is_selected = i == state.selected;
        lines.push(label_line(control, is_selected));
        lines.push(match control.descriptor.control {
            ControlKind::Slider => slider_line(control, track_width),
            ControlKind::NumericEntry => entry_line(control, is_selected),
        });
    }

    if let Some(err) = &state.error_message {
        lines.push(Line::from(vec![
            Span::styled("! ", SolarTheme::danger()),
            Span::styled(err.clone(), SolarTheme::danger()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn label_line(control: &FeatureControl, selected: bool) -> Line<'_> {
    let (marker, style) = if selected {
        ("▶ ", SolarTheme::focused())
    } else {
        ("  ", SolarTheme::text_secondary())
    };
    Line::from(vec![
        Span::styled(marker, SolarTheme::focused()),
        Span::styled(control.label.as_str(), style),
    ])
}

fn slider_line(control: &FeatureControl, width: usize) -> Line<'static> {
    let knob = slider_position(control.value, control.descriptor, width);
    Line::from(vec![
        Span::raw("  "),
        Span::styled("━".repeat(knob), SolarTheme::slider_fill()),
        Span::styled("●", SolarTheme::focused()),
        Span::styled(
            "─".repeat(width.saturating_sub(knob + 1)),
            SolarTheme::slider_track(),
        ),
        Span::styled(format!(" {:>9.2}", control.value), SolarTheme::text()),
    ])
}

fn entry_line(control: &FeatureControl, selected: bool) -> Line<'static> {
    let d = control.descriptor;
    let value_style = if control.buffer.is_some() {
        SolarTheme::focused()
    } else {
        SolarTheme::text()
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled("[ ", SolarTheme::border()),
        Span::styled(format!("{:>8}", control.display_value()), value_style),
        if selected {
            Span::styled("▌", SolarTheme::focused())
        } else {
            Span::raw(" ")
        },
        Span::styled(" ]", SolarTheme::border()),
        Span::styled(
            format!("  {:.2} – {:.2}", d.min, d.max),
            SolarTheme::text_muted(),
        ),
    ])
}
