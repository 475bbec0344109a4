use serde::{Deserialize, Serialize};

/// Raw held-state of the four game actions, refreshed once per tick. Human
/// key handling and the autopilot both produce this map; the control path
/// downstream cannot tell them apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
}

impl KeyState {
    pub fn any_held(&self) -> bool {
        self.left || self.right || self.thrust || self.fire
    }
}

#[inline]
pub fn encode_key_byte(keys: KeyState) -> u8 {
    (if keys.left { 0x01 } else { 0 })
        | (if keys.right { 0x02 } else { 0 })
        | (if keys.thrust { 0x04 } else { 0 })
        | (if keys.fire { 0x08 } else { 0 })
}

#[inline]
pub fn decode_key_byte(byte: u8) -> KeyState {
    KeyState {
        left: (byte & 0x01) != 0,
        right: (byte & 0x02) != 0,
        thrust: (byte & 0x04) != 0,
        fire: (byte & 0x08) != 0,
    }
}

/// Edge-resolved input consumed by a single simulation step. Turn and thrust
/// are level-triggered; fire is a press edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire_pressed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Released,
    Pressed,
    Held,
}

impl ActionState {
    fn advance(self, held: bool) -> ActionState {
        match (self, held) {
            (_, false) => ActionState::Released,
            (ActionState::Released, true) => ActionState::Pressed,
            (ActionState::Pressed, true) | (ActionState::Held, true) => ActionState::Held,
        }
    }

    pub fn is_active(self) -> bool {
        !matches!(self, ActionState::Released)
    }
}

/// Per-action press/hold state machine, advanced exactly once per tick
/// before the simulation consumes the result.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputTracker {
    left: ActionState,
    right: ActionState,
    thrust: ActionState,
    fire: ActionState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, keys: KeyState) -> TickInput {
        self.left = self.left.advance(keys.left);
        self.right = self.right.advance(keys.right);
        self.thrust = self.thrust.advance(keys.thrust);
        self.fire = self.fire.advance(keys.fire);

        TickInput {
            left: self.left.is_active(),
            right: self.right.is_active(),
            thrust: self.thrust.is_active(),
            fire_pressed: self.fire == ActionState::Pressed,
        }
    }
}
