use crate::input::keys::KeyState;

/// Raw input events delivered by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed (browser `keyCode`).
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// A touch/click began at screen coordinates (x, y). Acts as confirm.
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    /// The page lost focus; nothing is held any more.
    FocusLost,
}

/// Events that arrived since the last display callback, in arrival order.
/// They only reach the simulation through [`InputQueue::apply_to`], so a
/// step never sees a half-applied batch.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Fold every pending event into the held-key set and empty the queue.
    /// Returns how many events were applied.
    pub fn apply_to(&mut self, keys: &mut KeyState) -> usize {
        let applied = self.pending.len();
        for event in self.pending.drain(..) {
            keys.apply(&event);
        }
        applied
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::{Key, KeyBindings};

    #[test]
    fn press_and_release_in_one_batch_ends_released() {
        let mut q = InputQueue::new();
        let mut keys = KeyState::new(KeyBindings::default());
        q.push(InputEvent::KeyDown { key_code: 32 });
        q.push(InputEvent::KeyUp { key_code: 32 });
        assert_eq!(q.len(), 2);

        assert_eq!(q.apply_to(&mut keys), 2);
        assert!(q.is_empty());
        assert!(!keys.snapshot().held(Key::Jump));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut q = InputQueue::new();
        let mut keys = KeyState::new(KeyBindings::default());
        q.push(InputEvent::KeyDown { key_code: 39 });
        q.push(InputEvent::PointerDown { x: 1.0, y: 2.0 });
        q.apply_to(&mut keys);
        assert!(keys.snapshot().held(Key::Right));
        assert!(keys.snapshot().held(Key::Confirm));

        q.push(InputEvent::FocusLost);
        q.apply_to(&mut keys);
        assert!(!keys.snapshot().held(Key::Right));
        assert!(!keys.snapshot().held(Key::Confirm));
    }
}
