// Cursor source selection: the JS hand tracker when it is running, the
// mouse/touch pointer until then.

use carousel_core::CursorSample;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Pointer,
    Tracker,
}

/// Last known pointer state in canvas UV space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub u: f32,
    pub v: f32,
    pub down: bool,
    pub inside: bool,
}

/// Holds the newest sample from each source and decides which one the
/// engine sees. Once the tracker has pushed a single sample the pointer is
/// ignored for the rest of the session.
#[derive(Debug, Default)]
pub struct InputMux {
    tracker: Option<CursorSample>,
    pointer: PointerState,
}

impl InputMux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_tracker(&mut self, x: f32, y: f32, is_pinching: bool, is_visible: bool) {
        if self.tracker.is_none() {
            log::info!("[tracker] first sample received, pointer fallback off");
        }
        self.tracker = Some(CursorSample::new(x, y, is_pinching, is_visible));
    }

    pub fn pointer_move(&mut self, u: f32, v: f32) {
        self.pointer.u = u;
        self.pointer.v = v;
        self.pointer.inside = true;
    }

    pub fn pointer_down(&mut self) {
        self.pointer.down = true;
    }

    pub fn pointer_up(&mut self) {
        self.pointer.down = false;
    }

    /// Leaving the canvas hides the cursor and drops any held press.
    pub fn pointer_leave(&mut self) {
        self.pointer.inside = false;
        self.pointer.down = false;
    }

    pub fn source(&self) -> InputSource {
        if self.tracker.is_some() {
            InputSource::Tracker
        } else {
            InputSource::Pointer
        }
    }

    /// Sample for this frame. A tracker that stops pushing keeps reporting
    /// its last sample; the tracker is expected to push `visible = false`
    /// when it loses the hand.
    pub fn current(&self) -> CursorSample {
        match self.tracker {
            Some(sample) => sample,
            None if self.pointer.inside => {
                CursorSample::new(self.pointer.u, self.pointer.v, self.pointer.down, true)
            }
            None => CursorSample::HIDDEN,
        }
    }
}
