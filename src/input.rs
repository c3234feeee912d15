//! Input events as the analyzer sees them. These mirror the DOM events a browser delivers; the
//! wasm bindings convert real `KeyboardEvent`s and `MouseEvent`s into these, and the simulator
//! builds them from text.

pub use input_analyzer_parser::keys::Modifiers;

/// Where an event was dispatched. Default actions are never suppressed in editable targets, so
/// that typing into form fields keeps working.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    #[default]
    Document,
    /// `<input>`, `<textarea>` or a contenteditable element.
    Editable,
}

impl Target {
    pub fn is_editable(self) -> bool {
        self == Target::Editable
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Physical key identifier, e.g. `KeyA`.
    pub code: String,
    /// Produced character or key name, e.g. `a` or `Enter`.
    pub key: String,
    pub mods: Modifiers,
    /// Set on auto-repeat keydowns.
    pub repeat: bool,
    pub target: Target,
}

impl KeyInput {
    pub fn new(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            key: key.into(),
            mods: Modifiers::empty(),
            repeat: false,
            target: Target::Document,
        }
    }

    pub fn with_mods(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyInput),
    KeyUp(KeyInput),
    /// `button` is the DOM `MouseEvent.button` index.
    MouseDown { button: i16, target: Target },
    MouseUp { button: i16, target: Target },
    ContextMenu { target: Target },
    /// The window lost focus; key-ups for held keys will never arrive.
    FocusLost,
}

/// What the host should do with the event after the analyzer has seen it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Disposition {
    pub prevent_default: bool,
}

impl Disposition {
    pub const PASS: Disposition = Disposition {
        prevent_default: false,
    };

    pub fn prevent_if(cond: bool) -> Self {
        Self {
            prevent_default: cond,
        }
    }
}
