pub mod config;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod segment;

pub use config::Config;
pub use error::{ClipsplitError, Result};
pub use pipeline::{
    plan_to_json, preview_plan, print_summary, split_media, split_media_with_cancel, SplitOptions,
    SplitResult, SplitStats,
};
