//! Hierarchical Dat catalog support: parsing, projection, re-serialization.
//!
//! Reads Logiqx-style XML Dat files into a form the selection engine can
//! consume (`DatFile::to_entries`), and reassembles a filtered catalog from
//! the winners while preserving the document envelope.

pub mod dat;
pub mod error;
pub mod projector;
pub mod writer;

pub use dat::{DatFile, DatGame, DatHeader, DatRom, parse_dat, parse_dat_file};
pub use error::DatError;
pub use projector::{players_variant, project_catalog};
pub use writer::write_dat;
