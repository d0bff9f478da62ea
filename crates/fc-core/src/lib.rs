//! Flowchart editor core: scene model, view transform, document format.

pub mod config;
pub mod document;
pub mod error;
pub mod id;
pub mod model;
pub mod view;

pub use config::EditorConfig;
pub use document::Document;
pub use error::EditorError;
pub use id::{ConnectorId, IdAllocator, NodeId};
pub use model::*;
pub use view::{ViewState, Viewport};
