//! Player input, queued between ticks

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One discrete input, already translated from raw key/mouse bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Cursor moved to a pixel position
    CursorMoved { x: f32, y: f32 },
    /// Left click: mine the targeted block
    PrimaryClick,
    /// Right click: use the thing under the cursor, or place the held item
    SecondaryClick,
    /// Nudge the player's velocity (-1/0/1 per axis)
    Move { dx: f32, dy: f32 },
    Jump,
    /// Number key 0-9
    SelectHotbar(u8),
    /// A symbolic effect bound to a key, e.g. "crafting basic"
    TriggerEffect(String),
}

impl InputEvent {
    /// Hotbar slot for a number key: 1-9 select slots 0-8, 0 selects slot 9
    pub fn hotbar_slot(key: u8) -> usize {
        match key {
            0 => 9,
            n => (n as usize - 1).min(9),
        }
    }
}

/// Inputs received since the last tick, drained once per tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotbar_slot_mapping() {
        assert_eq!(InputEvent::hotbar_slot(1), 0);
        assert_eq!(InputEvent::hotbar_slot(9), 8);
        assert_eq!(InputEvent::hotbar_slot(0), 9);
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Jump);
        queue.push(InputEvent::PrimaryClick);
        assert_eq!(queue.len(), 2);

        let events = queue.drain();
        assert_eq!(events, vec![InputEvent::Jump, InputEvent::PrimaryClick]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_read_from_ron() {
        let events: Vec<InputEvent> =
            ron::from_str(r#"[CursorMoved(x: 10.0, y: 20.0), SelectHotbar(2), TriggerEffect("food 2")]"#)
                .unwrap();
        assert_eq!(events[0], InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        assert_eq!(events[1], InputEvent::SelectHotbar(2));
        assert_eq!(events[2], InputEvent::TriggerEffect("food 2".to_string()));
    }
}
