//! Output documents and writing them to disk.
//!
//! - [`templates`] - Page, index, project-index and master-index documents
//! - [`site`] - In-memory [`Site`] and the filesystem writer
//! - [`assets`] - Embedded stylesheet and script

pub mod assets;
pub mod site;
pub mod templates;

pub use site::{Document, Site, write_assets};
