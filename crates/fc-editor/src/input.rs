//! Input abstraction layer.
//!
//! Normalizes host pointer events into a unified `InputEvent` enum
//! consumed by the editor. Coordinates are screen space: pixels relative
//! to the drawing surface's top-left corner.

use fc_core::model::Point;

/// Keyboard modifier state at the time of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    /// Right button. Starts a pan.
    Secondary,
}

/// A normalized input event from the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown {
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
    },

    /// Pointer moved, pressed or not.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Double click. Opens the text editor on a node.
    DoubleClick { x: f64, y: f64 },

    /// Wheel notch. Positive `delta_y` scrolls down.
    Wheel { x: f64, y: f64, delta_y: f64 },
}

impl InputEvent {
    /// Primary-button press without modifiers.
    pub fn down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn shift_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::SHIFT,
        }
    }

    pub fn secondary_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::Secondary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    /// Screen-space position of the event.
    pub fn position(&self) -> Point {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::DoubleClick { x, y }
            | Self::Wheel { x, y, .. } => Point::new(x, y),
        }
    }
}

/// Keys the in-place text editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditKey {
    /// Enter. With shift it inserts a newline and does not commit.
    Enter { shift: bool },
    Escape,
}
