//! File-level conversion: single images and whole directories.
//!
//! Directory runs use a dedicated rayon pool sized by
//! `ConvertOptions::max_concurrent_files`, so the concurrency limit is
//! owned by the caller rather than held in global state.

mod progress;
mod runner;

pub use progress::{file_progress_bar, spinner};
pub use runner::{
    convert_directory, convert_file, discover_images, BatchError, BatchFailure, BatchReport,
};
