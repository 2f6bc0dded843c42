//! Segment records and their nested sections.
//!
//! ## Structure
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │ cmd, cmdsize (8 bytes)             │
//! ├────────────────────────────────────┤
//! │ segment fields (48 or 64 bytes)    │
//! │  - segname, vm/file ranges         │
//! │  - maxprot, initprot               │
//! │  - nsects, flags                   │
//! ├────────────────────────────────────┤
//! │ Section 0 (68 or 80 bytes)         │
//! ├────────────────────────────────────┤
//! │ ... nsects sections, packed        │
//! └────────────────────────────────────┘
//! ```

use std::str;

use scroll::{Pread, Pwrite, SizeWith};

use super::fields::{read_fields, write_fields, FixedFields, LoadCommandHeader, SIZEOF_LOAD_COMMAND};
use crate::constants::{LC_SEGMENT, LC_SEGMENT_64};
use crate::{Error, Result};

/// Width of segment and section name fields.
pub const NAME_LEN: usize = 16;

/// The logical value of a fixed-width name: the bytes before the first NUL,
/// or the whole field if there is none.
pub fn name_value(name: &[u8; NAME_LEN]) -> &[u8] {
    let end = name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    &name[..end]
}

/// Encode `name` as a fixed-width field, truncating or NUL-padding it.
pub fn fixed_name(name: &[u8]) -> [u8; NAME_LEN] {
    let mut out = [0u8; NAME_LEN];
    let len = name.len().min(NAME_LEN);
    out[..len].copy_from_slice(&name[..len]);
    out
}

/// Segment fields of `LC_SEGMENT`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct SegmentCommand32 {
    pub segname: [u8; 16],
    pub vmaddr: u32,
    pub vmsize: u32,
    pub fileoff: u32,
    pub filesize: u32,
    pub maxprot: u32,
    pub initprot: u32,
    pub nsects: u32,
    pub flags: u32,
}

/// Segment fields of `LC_SEGMENT_64`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct SegmentCommand64 {
    pub segname: [u8; 16],
    pub vmaddr: u64,
    pub vmsize: u64,
    pub fileoff: u64,
    pub filesize: u64,
    pub maxprot: u32,
    pub initprot: u32,
    pub nsects: u32,
    pub flags: u32,
}

/// A section of a 32-bit segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct Section32 {
    pub sectname: [u8; 16],
    pub segname: [u8; 16],
    pub addr: u32,
    pub size: u32,
    pub offset: u32,
    pub align: u32,
    pub reloff: u32,
    pub nreloc: u32,
    pub flags: u32,
    pub reserved1: u32,
    pub reserved2: u32,
}

/// A section of a 64-bit segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct Section64 {
    pub sectname: [u8; 16],
    pub segname: [u8; 16],
    pub addr: u64,
    pub size: u64,
    pub offset: u32,
    pub align: u32,
    pub reloff: u32,
    pub nreloc: u32,
    pub flags: u32,
    pub reserved1: u32,
    pub reserved2: u32,
    pub reserved3: u32,
}

/// Segment field blocks, generic over the 32- and 64-bit layouts.
pub trait SegmentFields: FixedFields {
    /// Section layout used by this segment kind.
    type Section: SectionFields;

    /// Tag of this segment kind.
    const CMD: u32;

    /// Raw 16-byte segment name.
    fn segname(&self) -> &[u8; NAME_LEN];
    /// Virtual address, widened to 64 bits.
    fn vmaddr(&self) -> u64;
    /// Virtual size, widened to 64 bits.
    fn vmsize(&self) -> u64;
    /// File offset of the segment contents.
    fn fileoff(&self) -> u64;
    /// Bytes mapped from the file.
    fn filesize(&self) -> u64;
    /// Maximum VM protection.
    fn maxprot(&self) -> u32;
    /// Initial VM protection.
    fn initprot(&self) -> u32;
    /// Declared section count.
    fn nsects(&self) -> u32;
    /// Overwrite the declared section count.
    fn set_nsects(&mut self, nsects: u32);
    /// `SG_*` flags.
    fn flags(&self) -> u32;
}

/// Section field blocks, generic over the 32- and 64-bit layouts.
pub trait SectionFields: FixedFields {
    /// Raw 16-byte section name.
    fn sectname(&self) -> &[u8; NAME_LEN];
    /// Raw 16-byte name of the owning segment.
    fn segname(&self) -> &[u8; NAME_LEN];
    /// Virtual address, widened to 64 bits.
    fn addr(&self) -> u64;
    /// Size in bytes, widened to 64 bits.
    fn size(&self) -> u64;
    /// File offset of the contents.
    fn offset(&self) -> u32;
    /// Alignment as a power of two.
    fn align(&self) -> u32;
    /// Section type and attributes.
    fn flags(&self) -> u32;

    /// Logical section name.
    fn name(&self) -> &[u8] {
        name_value(self.sectname())
    }

    /// Logical name of the owning segment.
    fn segment_name(&self) -> &[u8] {
        name_value(self.segname())
    }
}

macro_rules! impl_segment_fields {
    ($segment:ty, $section:ty, $cmd:expr) => {
        impl SegmentFields for $segment {
            type Section = $section;
            const CMD: u32 = $cmd;

            fn segname(&self) -> &[u8; NAME_LEN] {
                &self.segname
            }
            fn vmaddr(&self) -> u64 {
                self.vmaddr.into()
            }
            fn vmsize(&self) -> u64 {
                self.vmsize.into()
            }
            fn fileoff(&self) -> u64 {
                self.fileoff.into()
            }
            fn filesize(&self) -> u64 {
                self.filesize.into()
            }
            fn maxprot(&self) -> u32 {
                self.maxprot
            }
            fn initprot(&self) -> u32 {
                self.initprot
            }
            fn nsects(&self) -> u32 {
                self.nsects
            }
            fn set_nsects(&mut self, nsects: u32) {
                self.nsects = nsects;
            }
            fn flags(&self) -> u32 {
                self.flags
            }
        }

        impl SectionFields for $section {
            fn sectname(&self) -> &[u8; NAME_LEN] {
                &self.sectname
            }
            fn segname(&self) -> &[u8; NAME_LEN] {
                &self.segname
            }
            fn addr(&self) -> u64 {
                self.addr.into()
            }
            fn size(&self) -> u64 {
                self.size.into()
            }
            fn offset(&self) -> u32 {
                self.offset
            }
            fn align(&self) -> u32 {
                self.align
            }
            fn flags(&self) -> u32 {
                self.flags
            }
        }
    };
}

impl_segment_fields!(SegmentCommand32, Section32, LC_SEGMENT);
impl_segment_fields!(SegmentCommand64, Section64, LC_SEGMENT_64);

/// A segment record with its sections.
///
/// The number of held sections always equals the `nsects` field. Bytes a
/// producer placed after the last section are kept and written back.
#[derive(Debug, Clone)]
pub struct Segment<C: SegmentFields> {
    header: LoadCommandHeader,
    fields: C,
    sections: Vec<C::Section>,
    surplus: Vec<u8>,
}

/// `LC_SEGMENT`
pub type Segment32 = Segment<SegmentCommand32>;

/// `LC_SEGMENT_64`
pub type Segment64 = Segment<SegmentCommand64>;

impl<C: SegmentFields> Segment<C> {
    /// Size of the header plus the segment fields.
    pub fn prefix_size() -> usize {
        SIZEOF_LOAD_COMMAND + C::encoded_size()
    }

    /// Build a segment from its fields and sections.
    ///
    /// `nsects` and `cmdsize` are derived from `sections`.
    pub fn new(mut fields: C, sections: Vec<C::Section>) -> Result<Self> {
        let size = C::Section::encoded_size()
            .checked_mul(sections.len())
            .and_then(|len| len.checked_add(Self::prefix_size()));
        let nsects = u32::try_from(sections.len()).ok();
        let (cmdsize, nsects) = match (size.and_then(|s| u32::try_from(s).ok()), nsects) {
            (Some(cmdsize), Some(nsects)) => (cmdsize, nsects),
            _ => {
                return Err(Error::InvalidRecordSize {
                    cmd: C::CMD,
                    cmdsize: u32::MAX,
                    minimum: size.unwrap_or(usize::MAX),
                })
            }
        };
        fields.set_nsects(nsects);
        Ok(Self {
            header: LoadCommandHeader {
                cmd: C::CMD,
                cmdsize,
            },
            fields,
            sections,
            surplus: Vec::new(),
        })
    }

    /// Decode a segment from its complete frame, header included.
    pub(crate) fn parse(header: LoadCommandHeader, frame: &[u8]) -> Result<Self> {
        let prefix = Self::prefix_size();
        if frame.len() < prefix {
            return Err(Error::InvalidRecordSize {
                cmd: header.cmd,
                cmdsize: header.cmdsize,
                minimum: prefix,
            });
        }
        let fields: C = read_fields(&frame[SIZEOF_LOAD_COMMAND..])?;

        let count = fields.nsects() as usize;
        let section_size = C::Section::encoded_size();
        let needed = section_size
            .checked_mul(count)
            .and_then(|len| len.checked_add(prefix))
            .filter(|&needed| needed <= frame.len())
            .ok_or(Error::InvalidRecordSize {
                cmd: header.cmd,
                cmdsize: header.cmdsize,
                minimum: prefix.saturating_add(section_size.saturating_mul(count)),
            })?;

        let mut sections = Vec::new();
        sections.try_reserve_exact(count)?;
        for chunk in frame[prefix..needed].chunks_exact(section_size) {
            sections.push(read_fields(chunk)?);
        }

        let mut surplus = Vec::new();
        surplus.try_reserve_exact(frame.len() - needed)?;
        surplus.extend_from_slice(&frame[needed..]);

        Ok(Self {
            header,
            fields,
            sections,
            surplus,
        })
    }

    /// Append the encoded segment and its sections to `out`.
    pub(crate) fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        debug_assert_eq!(
            self.fields.nsects() as usize,
            self.sections.len(),
            "nsects out of sync with held sections"
        );
        write_fields(self.header, out)?;
        write_fields(self.fields, out)?;
        for section in &self.sections {
            write_fields(*section, out)?;
        }
        out.extend_from_slice(&self.surplus);
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

    /// The segment fields.
    pub fn fields(&self) -> &C {
        &self.fields
    }

    /// The sections, in file order.
    pub fn sections(&self) -> &[C::Section] {
        &self.sections
    }

    /// Bytes after the last section, normally empty.
    pub fn surplus(&self) -> &[u8] {
        &self.surplus
    }

    /// Logical segment name.
    pub fn name(&self) -> &[u8] {
        name_value(self.fields.segname())
    }

    /// Segment name as UTF-8, if it is valid.
    pub fn name_str(&self) -> Option<&str> {
        str::from_utf8(self.name()).ok()
    }

    /// Find a section by logical name.
    pub fn section(&self, name: &[u8]) -> Option<&C::Section> {
        self.sections.iter().find(|section| section.name() == name)
    }
}

impl<C: SegmentFields> PartialEq for Segment<C> {
    fn eq(&self, other: &Self) -> bool {
        if self.header != other.header || self.fields != other.fields {
            return false;
        }
        let count = self.fields.nsects() as usize;
        self.sections.len() == other.sections.len()
            && self
                .sections
                .iter()
                .zip(&other.sections)
                .take(count)
                .all(|(a, b)| a == b)
            && self.surplus == other.surplus
    }
}

impl<C: SegmentFields> Eq for Segment<C> {}
