//! Records made of a fixed field block and an opaque tail.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ cmd, cmdsize (8 bytes)       │
//! ├──────────────────────────────┤
//! │ fixed fields F               │
//! ├──────────────────────────────┤
//! │ tail: cmdsize - 8 - sizeof F │
//! │ (strings, padding, blobs)    │
//! └──────────────────────────────┘
//! ```
//!
//! Strings such as a dylib install name live in the tail at an offset
//! recorded in F, measured from the start of the record.

use super::fields::{
    align_to, read_fields, write_fields, BuildToolVersion, BuildVersionCommand, DylibCommand,
    DylinkerCommand, FilesetEntryCommand, FixedFields, FvmfileCommand, FvmlibCommand,
    LinkerOptionCommand, LoadCommandHeader, PreboundDylibCommand, RpathCommand, SubCommand,
    SIZEOF_LOAD_COMMAND,
};
use crate::{Error, Result};

/// Records built from a string are padded to this multiple.
pub const STRING_RECORD_ALIGNMENT: usize = 8;

/// A load command with fixed fields `F` followed by opaque trailing bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<F> {
    header: LoadCommandHeader,
    fields: F,
    tail: Vec<u8>,
}

impl<F: FixedFields> Record<F> {
    /// Size of the header plus the fixed fields.
    pub fn prefix_size() -> usize {
        SIZEOF_LOAD_COMMAND + F::encoded_size()
    }

    /// Build a record, computing `cmdsize` from the fields and tail.
    ///
    /// The tail is stored as given; callers wanting the conventional
    /// pointer-width padding must include it.
    pub fn new(cmd: u32, fields: F, tail: Vec<u8>) -> Result<Self> {
        let size = Self::prefix_size() + tail.len();
        let cmdsize = u32::try_from(size).map_err(|_| Error::InvalidRecordSize {
            cmd,
            cmdsize: u32::MAX,
            minimum: size,
        })?;
        Ok(Self {
            header: LoadCommandHeader { cmd, cmdsize },
            fields,
            tail,
        })
    }

    /// Build a record whose tail is `string`, NUL-terminated and padded so
    /// `cmdsize` is a multiple of 8.
    ///
    /// The string starts right after the fixed fields; `fields` must already
    /// carry that offset (see [`Record::prefix_size`]).
    pub fn with_string(cmd: u32, fields: F, string: &[u8]) -> Result<Self> {
        let prefix = Self::prefix_size();
        let total = align_to(prefix + string.len() + 1, STRING_RECORD_ALIGNMENT);
        let mut tail = Vec::new();
        tail.try_reserve_exact(total - prefix)?;
        tail.extend_from_slice(string);
        tail.resize(total - prefix, 0);
        Self::new(cmd, fields, tail)
    }

    /// Decode a record from its complete frame, header included.
    pub(crate) fn parse(header: LoadCommandHeader, frame: &[u8]) -> Result<Self> {
        let prefix = Self::prefix_size();
        if frame.len() < prefix {
            return Err(Error::InvalidRecordSize {
                cmd: header.cmd,
                cmdsize: header.cmdsize,
                minimum: prefix,
            });
        }
        let fields = read_fields(&frame[SIZEOF_LOAD_COMMAND..])?;
        let mut tail = Vec::new();
        tail.try_reserve_exact(frame.len() - prefix)?;
        tail.extend_from_slice(&frame[prefix..]);
        Ok(Self {
            header,
            fields,
            tail,
        })
    }

    /// Append the encoded record to `out`.
    pub(crate) fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        write_fields(self.header, out)?;
        write_fields(self.fields, out)?;
        out.extend_from_slice(&self.tail);
        Ok(())
    }

    /// The record header.
    pub fn header(&self) -> LoadCommandHeader {
        self.header
    }

    /// The record tag.
    pub fn cmd(&self) -> u32 {
        self.header.cmd
    }

    /// The declared total size.
    pub fn cmdsize(&self) -> u32 {
        self.header.cmdsize
    }

    /// The fixed fields.
    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// Trailing bytes after the fixed fields, padding included.
    pub fn tail(&self) -> &[u8] {
        &self.tail
    }

    /// Read the NUL-terminated string at `offset` from the start of the
    /// record.
    ///
    /// A string without a terminator runs to the end of the record.
    pub fn string_at(&self, offset: u32) -> Result<&[u8]> {
        let prefix = Self::prefix_size();
        let start = (offset as usize)
            .checked_sub(prefix)
            .filter(|&start| start <= self.tail.len())
            .ok_or(Error::InvalidStringOffset {
                cmd: self.header.cmd,
                offset,
            })?;
        let bytes = &self.tail[start..];
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(&bytes[..end])
    }
}

impl Record<DylibCommand> {
    /// The install name of the library.
    pub fn path(&self) -> Result<&[u8]> {
        self.string_at(self.fields.name_offset)
    }
}

impl Record<DylinkerCommand> {
    /// Path of the dynamic linker, or the environment string for
    /// `LC_DYLD_ENVIRONMENT`.
    pub fn name(&self) -> Result<&[u8]> {
        self.string_at(self.fields.name_offset)
    }
}

impl Record<SubCommand> {
    /// The framework, umbrella, client or library name.
    pub fn name(&self) -> Result<&[u8]> {
        self.string_at(self.fields.name_offset)
    }
}

impl Record<PreboundDylibCommand> {
    /// The install name of the prebound library.
    pub fn name(&self) -> Result<&[u8]> {
        self.string_at(self.fields.name_offset)
    }
}

impl Record<FvmlibCommand> {
    /// Target pathname of the library.
    pub fn name(&self) -> Result<&[u8]> {
        self.string_at(self.fields.name_offset)
    }
}

impl Record<FvmfileCommand> {
    /// Pathname of the file.
    pub fn name(&self) -> Result<&[u8]> {
        self.string_at(self.fields.name_offset)
    }
}

impl Record<RpathCommand> {
    /// The run path.
    pub fn path(&self) -> Result<&[u8]> {
        self.string_at(self.fields.path_offset)
    }
}

impl Record<FilesetEntryCommand> {
    /// Identifier of the fileset entry.
    pub fn entry_id(&self) -> Result<&[u8]> {
        self.string_at(self.fields.entry_id_offset)
    }
}

impl Record<BuildVersionCommand> {
    /// Decode the `ntools` tool entries from the tail.
    pub fn tools(&self) -> Result<Vec<BuildToolVersion>> {
        let count = self.fields.ntools as usize;
        let entry_size = BuildToolVersion::encoded_size();
        let needed = count
            .checked_mul(entry_size)
            .filter(|&needed| needed <= self.tail.len())
            .ok_or(Error::InvalidRecordSize {
                cmd: self.header.cmd,
                cmdsize: self.header.cmdsize,
                minimum: Self::prefix_size().saturating_add(count.saturating_mul(entry_size)),
            })?;
        self.tail[..needed]
            .chunks_exact(entry_size)
            .map(read_fields::<BuildToolVersion>)
            .collect()
    }
}

impl Record<LinkerOptionCommand> {
    /// The `count` NUL-terminated option strings.
    ///
    /// Stops early if the tail runs out before `count` strings.
    pub fn options(&self) -> Vec<&[u8]> {
        self.tail
            .split(|&b| b == 0)
            .take(self.fields.count as usize)
            .collect()
    }
}
