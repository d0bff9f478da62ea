//! Flowchart editor engine: pointer gestures, undo/redo, persistence.

pub mod editor;
pub mod gesture;
pub mod history;
pub mod input;
pub mod storage;

pub use editor::{Editor, Inspector, NodeProperty, TextEdit, TextOverlay};
pub use gesture::{Gesture, GestureEnd, Selection};
pub use history::History;
pub use input::{InputEvent, Modifiers, PointerButton, TextEditKey};
pub use storage::{
    AutosaveTimer, FileStore, KeyValueStore, MemoryStore, SavedLibrary, StoreError,
};
