//! # Plankit IO
//!
//! Project input/output for the plankit engine:
//!
//! - **Import**: furniture lists from CSV, JSON and (via an external
//!   document-parsing capability) PDF files. Imports are atomic per file.
//! - **Export**: PNG snapshots, inventory PDFs and placed-furniture JSON.
//! - **Serialization**: the external camelCase project-file shape.
//! - **Persistence**: the async project-store port with debounced saves.

pub mod export;
pub mod import;
pub mod persistence;
pub mod serialization;

pub use export::{export_json, export_pdf, export_png, PngExportOptions};
pub use import::{import_csv, import_json, import_items, DocumentParser, ImportedItem};
pub use persistence::{DebouncedSaver, FileStore, MemoryStore, ProjectStore, SaveStatus};
pub use serialization::{project_from_json, project_to_json, ProjectFile};
