/// Construction of the EUC-KR mapping tables.
///
/// This crate holds the canonical-index reader, the two-zone byte layout,
/// the table builder and the shared configuration and traits used across
/// the workspace.

pub mod builder;
pub mod config;
pub mod error;
pub mod layout;
pub mod reader;
pub mod table;
pub mod traits;

pub use builder::{BuildStats, TableBuilder, build, build_from_source};
pub use config::GenConfig;
pub use error::TableError;
pub use layout::{BytePair, decompose};
pub use reader::{MappingEntry, MappingReader};
pub use table::{DecodeTable, EncodeTable, Tables};
