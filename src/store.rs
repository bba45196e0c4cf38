//! Gesture capture and undo/redo over stroke groups.
//!
//! The store owns the committed history and the undo stack and nothing else:
//! rendering and audio side effects belong to the caller. Undo is linear with
//! branch discard; starting a new gesture throws away the redo future.

use crate::model::{DrawingRecord, Stroke, StrokeGroup};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing,
}

#[derive(Debug, Default)]
pub struct StrokeStore {
    history: Vec<StrokeGroup>,
    undone: Vec<StrokeGroup>,
    state: GestureState,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Committed groups plus the open tail group, in commit order.
    pub fn groups(&self) -> &[StrokeGroup] {
        &self.history
    }

    /// Groups belonging to finished gestures. While a gesture is open its
    /// tail group is excluded; see [`StrokeStore::active_strokes`].
    pub fn committed(&self) -> &[StrokeGroup] {
        match self.state {
            GestureState::Idle => &self.history,
            GestureState::Drawing => match self.history.split_last() {
                Some((_, rest)) => rest,
                None => &self.history,
            },
        }
    }

    /// Strokes of the gesture currently being drawn, if any.
    pub fn active_strokes(&self) -> &[Stroke] {
        if self.state == GestureState::Drawing {
            self.history.last().map(Vec::as_slice).unwrap_or(&[])
        } else {
            &[]
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.iter().any(|g| !g.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Open a gesture. A new action invalidates the redo future, so the undo
    /// stack is cleared before the empty tail group is committed.
    pub fn begin_gesture(&mut self) {
        if self.state == GestureState::Drawing {
            log::debug!("begin_gesture while a gesture is already open; ignored");
            return;
        }
        self.undone.clear();
        self.history.push(StrokeGroup::new());
        self.state = GestureState::Drawing;
    }

    /// Append one segment to the open gesture's tail group.
    pub fn append_segment(&mut self, stroke: Stroke) {
        if self.state != GestureState::Drawing {
            log::debug!("append_segment with no open gesture; ignored");
            return;
        }
        let Some(tail) = self.history.last_mut() else {
            return;
        };
        tail.push(stroke);
    }

    /// Close the open gesture. An empty tail group (a click with no drag) is
    /// left in place; `undo` discards it lazily.
    pub fn end_gesture(&mut self) {
        if self.state != GestureState::Drawing {
            log::debug!("end_gesture with no open gesture; ignored");
            return;
        }
        self.state = GestureState::Idle;
    }

    /// Pop the most recent gesture onto the undo stack. Trailing empty groups
    /// are discarded first rather than becoming no-op undo entries. Returns
    /// whether anything visible changed (the caller owes a full redraw).
    pub fn undo(&mut self) -> bool {
        if self.state == GestureState::Drawing {
            log::debug!("undo during an open gesture; ignored");
            return false;
        }
        while self.history.last().is_some_and(|g| g.is_empty()) {
            self.history.pop();
        }
        let Some(group) = self.history.pop() else {
            log::debug!("undo with empty history; nothing to do");
            return false;
        };
        self.undone.push(group);
        true
    }

    /// Restore the most recently undone gesture to the history tail. Returns
    /// whether a group came back (the caller redraws just that group).
    pub fn redo(&mut self) -> bool {
        if self.state == GestureState::Drawing {
            log::debug!("redo during an open gesture; ignored");
            return false;
        }
        let Some(group) = self.undone.pop() else {
            log::debug!("redo with empty undo stack; nothing to do");
            return false;
        };
        self.history.push(group);
        true
    }

    /// Blank slate: history, undo stack, and any open gesture are dropped.
    pub fn clear(&mut self) {
        self.history.clear();
        self.undone.clear();
        self.state = GestureState::Idle;
    }

    /// Deep, independent snapshot of the committed history.
    pub fn serialize(&self, filename: &str) -> DrawingRecord {
        DrawingRecord {
            filename: filename.to_string(),
            strokes: self.history.clone(),
        }
    }

    /// Replace the history wholesale with a deserialized record.
    pub fn load(&mut self, record: DrawingRecord) {
        self.history = record.strokes;
        self.undone.clear();
        self.state = GestureState::Idle;
    }
}
