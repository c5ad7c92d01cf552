//! EthosJus Core - OAB Ethics Guidance and Contract Generation
//!
//! # Pipeline
//! 1. A field map is merged into the services contract template
//!    (`contract`, `templates`). Missing fields become placeholders.
//! 2. Free-form text becomes a structured document of paragraphs
//!    (`document`).
//! 3. The document is serialized as a `.docx` package (`docx`).
//! 4. `pipeline` refuses blank text, sanitizes the filename and returns
//!    the bytes with their manifest.
//!
//! `guidance` and `history` hold the canned Q&A table and the answer log.

pub mod config;
pub mod contract;
pub mod docx;
pub mod document;
pub mod filename;
pub mod guidance;
pub mod hashing;
pub mod history;
pub mod pipeline;
pub mod templates;

pub use config::AppConfig;
pub use contract::{assemble, ContractAssembler, ContractField, ContractFields};
pub use document::{Block, GeneratedDocument};
pub use docx::{DocumentExporter, DOCX_MIME};
pub use filename::{sanitize, FilenameToken};
pub use guidance::{answer_for, QuickQuestion, QUICK_QUESTIONS};
pub use history::{HistoryEntry, HistoryStore, JsonlHistory, MemoryHistory};
pub use pipeline::{DocxDownload, ExportError, ExportPipeline, ExportRequest};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
