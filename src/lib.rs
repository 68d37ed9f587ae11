pub mod config;
pub mod extract;
pub mod scan;
pub mod util;
pub mod view;

pub use config::Config;
pub use extract::{
    extract_file_artifacts, extract_patch_bundles, extract_run_steps, looks_like_unified_diff,
    Badge, FileArtifact, PackRef,
};
pub use view::{render_directory, Panel, PanelBody, RenderOptions, Report, RunContext, ViewError};
