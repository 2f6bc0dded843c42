//! Read and write Mach-O load commands.
//!
//! Every load command read from a stream is written back byte for byte:
//! sizes, padding, trailing bytes and unknown record kinds all survive a
//! round trip.
//!
//! ```
//! use machcmd::constants::LC_LOAD_DYLIB;
//! use machcmd::LoadCommand;
//!
//! let dylib = LoadCommand::dylib(LC_LOAD_DYLIB, "/usr", 2, 0x0501_0000, 0x0001_0000)?;
//! let bytes = dylib.to_bytes()?;
//! assert_eq!(bytes.len(), 32);
//!
//! let reread = LoadCommand::read(&mut bytes.as_slice())?;
//! assert_eq!(reread, dylib);
//! # Ok::<(), machcmd::Error>(())
//! ```

pub mod commands;
pub mod constants;
pub mod error;
pub mod file;
pub mod image;
pub mod options;

pub use commands::{
    read_commands, write_commands, LoadCommand, LoadCommandHeader, LoadCommandReader, Record,
    Section32, Section64, SectionFields, Segment, Segment32, Segment64, SegmentFields,
};
pub use error::Error;
pub use file::{MachOFile, Slice};
pub use image::{MachHeader, MachOImage};
pub use options::ReadOptions;

pub type Result<T> = std::result::Result<T, Error>;
