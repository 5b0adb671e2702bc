use crate::headings::Heading;

/// Fraction of the viewport height added to the scroll position when
/// deciding which heading is "in view": a heading counts as current a
/// little before it reaches the very top of the screen.
pub fn scroll_margin(viewport_height: f64) -> f64 {
    viewport_height / 8.0
}

/// The last heading whose position is at or above `scroll_offset`.
/// Headings are sorted ascending by position, so anything past the offset
/// ends the scan. `None` when the offset is above the first heading.
pub fn current_heading(headings: &[Heading], scroll_offset: f64) -> Option<&Heading> {
    headings
        .iter()
        .take_while(|h| h.position <= scroll_offset)
        .last()
}

/// Side effects a scroll evaluation asks the host to apply. Emitted only
/// on transitions, so replaying the same scroll position yields nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEffect {
    /// Move the active class to the nav item for this heading id.
    Activate(String),
    /// No heading is in view any more; clear the active class everywhere.
    ClearActive,
    /// The widget has scrolled past its natural position.
    Dock,
    Undock,
}

/// Mutable widget state threaded through the pure update functions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerState {
    /// Scroll offset beyond which the widget switches to fixed positioning.
    pub dock_point: f64,
    pub active_heading: Option<String>,
    pub docked: bool,
}

impl TrackerState {
    pub fn new(dock_point: f64) -> Self {
        Self {
            dock_point,
            active_heading: None,
            docked: false,
        }
    }

    /// Evaluate one scroll position. Docked iff `scroll_top > dock_point`;
    /// the current heading is resolved against `scroll_top` plus the
    /// viewport margin.
    pub fn on_scroll(
        &mut self,
        headings: &[Heading],
        scroll_top: f64,
        viewport_height: f64,
    ) -> Vec<NavEffect> {
        let mut effects = Vec::new();

        let should_dock = scroll_top > self.dock_point;
        if should_dock != self.docked {
            self.docked = should_dock;
            effects.push(if should_dock {
                NavEffect::Dock
            } else {
                NavEffect::Undock
            });
        }

        let scroll_offset = scroll_top + scroll_margin(viewport_height);
        match current_heading(headings, scroll_offset) {
            Some(candidate) if self.active_heading.as_deref() != Some(candidate.id.as_str()) => {
                self.active_heading = Some(candidate.id.clone());
                effects.push(NavEffect::Activate(candidate.id.clone()));
            }
            None if self.active_heading.is_some() => {
                self.active_heading = None;
                effects.push(NavEffect::ClearActive);
            }
            _ => {}
        }

        effects
    }

    /// The page reflowed; the widget's natural position may have moved.
    pub fn on_resize(&mut self, dock_point: f64) {
        self.dock_point = dock_point;
    }
}
