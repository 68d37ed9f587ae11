//! Read-only rendering of a run directory into titled panels.

pub mod context;
mod error;
pub mod panel;
pub mod render;
pub mod roles;

pub use context::{load_json, Document, LoadOptions, RunContext};
pub use error::ViewError;
pub use panel::{Panel, PanelBody, Report};
pub use render::{render_context, render_directory, RenderOptions};
pub use roles::DocumentRole;
