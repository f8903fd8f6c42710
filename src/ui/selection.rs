//! Per-graph window selection state machine.
//!
//! Pointer and keyboard events arrive already mapped into time coordinates;
//! the plot layer converts the on-screen handle radius (9 px scaled by the
//! device pixel ratio) into seconds before calling in. Internal drag state
//! may transiently hold `start > end`; everything published through
//! `selection()` and the change callback is normalized.

use crate::sim::interval::Interval;

/// Arrow-key step for the selected bound, in seconds.
pub const NUDGE_STEP_S: f64 = 0.02;
/// Fine step with the modifier held.
pub const NUDGE_FINE_STEP_S: f64 = 0.01;

/// On-screen handle hit radius in logical pixels, before DPI scaling.
pub const HANDLE_HIT_RADIUS_PX: f32 = 9.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// Origin fixed at the press position, far edge tracks the pointer.
    SelectingNew,
    DraggingStart,
    DraggingEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

pub fn nudge_step(fine: bool) -> f64 {
    if fine { NUDGE_FINE_STEP_S } else { NUDGE_STEP_S }
}

type ChangeCallback = Box<dyn FnMut(Option<Interval>)>;

pub struct SelectionState {
    selection: Option<Interval>,
    drag: DragState,
    domain: Option<Interval>,
    motion_hint: Option<Interval>,
    on_change: Option<ChangeCallback>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selection: None,
            drag: DragState::Idle,
            domain: None,
            motion_hint: None,
            on_change: None,
        }
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoked with the normalized interval (or None) on every mutation,
    /// not only on release, so hosts can show live numbers while dragging.
    pub fn set_on_change(&mut self, f: ChangeCallback) {
        self.on_change = Some(f);
    }

    /// Install the data domain for a new trial. Resets any selection.
    pub fn set_data(&mut self, domain: Option<Interval>, motion_hint: Option<Interval>) {
        self.domain = domain.map(|d| d.normalized());
        self.motion_hint = motion_hint;
        self.drag = DragState::Idle;
        if self.selection.take().is_some() {
            self.emit();
        }
    }

    pub fn clear(&mut self) {
        self.drag = DragState::Idle;
        if self.selection.take().is_some() {
            self.emit();
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn has_data(&self) -> bool {
        self.domain.is_some()
    }

    /// Normalized selection for consumers.
    pub fn selection(&self) -> Option<Interval> {
        self.selection.map(|s| s.normalized())
    }

    /// Raw bounds as dragged, for handle rendering.
    pub fn raw_selection(&self) -> Option<Interval> {
        self.selection
    }

    fn emit(&mut self) {
        let published = self.selection.map(|s| s.normalized());
        if let Some(f) = self.on_change.as_mut() {
            f(published);
        }
    }

    fn clamp(&self, t: f64) -> f64 {
        match self.domain {
            Some(d) => t.clamp(d.start_s, d.end_s),
            None => t,
        }
    }

    /// Pointer press at time `t`. Grabs a handle when within `radius_s` of a
    /// bound (the closer bound wins when both are in range), otherwise starts
    /// a fresh zero-width selection. Without data this is a no-op.
    pub fn pointer_down(&mut self, t: f64, radius_s: f64) {
        if self.domain.is_none() {
            return;
        }
        let t = self.clamp(t);

        if let Some(sel) = self.selection {
            let d_start = (t - sel.start_s).abs();
            let d_end = (t - sel.end_s).abs();
            if d_start <= radius_s || d_end <= radius_s {
                self.drag = if d_start <= d_end {
                    DragState::DraggingStart
                } else {
                    DragState::DraggingEnd
                };
                return;
            }
        }

        self.selection = Some(Interval::new(t, t));
        self.drag = DragState::SelectingNew;
        self.emit();
    }

    /// Pointer drag: the tracked bound follows `t`, clamped to the domain.
    pub fn pointer_move(&mut self, t: f64) {
        let t = self.clamp(t);
        let Some(sel) = self.selection.as_mut() else {
            return;
        };
        match self.drag {
            DragState::Idle => return,
            DragState::SelectingNew | DragState::DraggingEnd => sel.end_s = t,
            DragState::DraggingStart => sel.start_s = t,
        }
        self.emit();
    }

    /// Release or cancel: back to settled/idle.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Keyboard nudge of one bound. With no selection present, first seeds
    /// one (centered in the motion window, or over the 20–40% span of the
    /// domain), then applies the delta.
    pub fn nudge(&mut self, bound: Bound, delta_s: f64) {
        let Some(domain) = self.domain else {
            return;
        };

        if self.selection.is_none() {
            self.selection = Some(self.seed_selection(domain));
        }
        let sel = self.selection.as_mut().expect("seeded above");
        match bound {
            Bound::Start => sel.start_s = (sel.start_s + delta_s).clamp(domain.start_s, domain.end_s),
            Bound::End => sel.end_s = (sel.end_s + delta_s).clamp(domain.start_s, domain.end_s),
        }
        self.emit();
    }

    fn seed_selection(&self, domain: Interval) -> Interval {
        match self.motion_hint {
            Some(hint) => {
                // Middle half of the motion window.
                let h = hint.normalized();
                let quarter = h.width_s() / 4.0;
                Interval::new(h.start_s + quarter, h.end_s - quarter)
            }
            None => {
                let span = domain.width_s();
                Interval::new(
                    domain.start_s + 0.2 * span,
                    domain.start_s + 0.4 * span,
                )
            }
        }
    }
}
