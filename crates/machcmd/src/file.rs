//! Mach-O files: a single thin image or a fat container of slices.
//!
//! Fat headers are located with `goblin`; each slice is then parsed as a
//! [`MachOImage`].

use std::fs::File;
use std::path::Path;

use goblin::mach::constants::cputype::get_arch_name_from_types;
use goblin::mach::MultiArch;
use memmap2::Mmap;
use tracing::debug;

use crate::constants::{FAT_CIGAM, FAT_MAGIC};
use crate::image::MachOImage;
use crate::{Error, ReadOptions, Result};

/// One architecture slice of a file.
#[derive(Debug, Clone)]
pub struct Slice {
    /// Offset of the slice in the file.
    pub offset: usize,
    /// Size of the slice.
    pub size: usize,
    /// CPU type
    pub cputype: u32,
    /// CPU subtype
    pub cpusubtype: u32,
    image: MachOImage,
    original: Vec<u8>,
}

impl Slice {
    fn parse(bytes: &[u8], offset: usize, options: &ReadOptions) -> Result<Self> {
        let image = MachOImage::parse_with(bytes, options)?;
        let header = image.header();
        let end = header.size() + header.sizeofcmds as usize;

        let mut original = Vec::new();
        original.try_reserve_exact(end)?;
        original.extend_from_slice(&bytes[..end]);

        Ok(Self {
            offset,
            size: bytes.len(),
            cputype: header.cputype,
            cpusubtype: header.cpusubtype,
            image,
            original,
        })
    }

    /// The parsed image.
    pub fn image(&self) -> &MachOImage {
        &self.image
    }

    /// Architecture name such as `arm64` or `x86_64`.
    pub fn arch_name(&self) -> Option<&'static str> {
        get_arch_name_from_types(self.cputype, self.cpusubtype)
    }

    /// Whether re-encoding the image reproduces the header and command
    /// bytes exactly as read.
    pub fn round_trips(&self) -> Result<bool> {
        Ok(self.image.to_bytes()? == self.original)
    }
}

/// A parsed Mach-O file.
#[derive(Debug, Clone)]
pub struct MachOFile {
    is_fat: bool,
    slices: Vec<Slice>,
}

impl MachOFile {
    /// Map and parse the file at `path` with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &ReadOptions::default())
    }

    /// Map and parse the file at `path`.
    pub fn open_with(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::parse_with(&mmap, options)
    }

    /// Parse a thin image or fat container from bytes with default options.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &ReadOptions::default())
    }

    /// Parse a thin image or fat container from bytes.
    pub fn parse_with(data: &[u8], options: &ReadOptions) -> Result<Self> {
        options.validate()?;

        let magic = data
            .get(..4)
            .map(|m| u32::from_be_bytes([m[0], m[1], m[2], m[3]]))
            .ok_or(Error::TruncatedStream)?;

        if magic != FAT_MAGIC && magic != FAT_CIGAM {
            let slice = Slice::parse(data, 0, options)?;
            return Ok(Self {
                is_fat: false,
                slices: vec![slice],
            });
        }

        let fat = MultiArch::new(data)?;
        let mut slices = Vec::new();
        for (i, arch) in fat.iter_arches().enumerate() {
            let arch = arch.map_err(|e| Error::MachO(format!("Fat arch {}: {}", i, e)))?;
            let offset = arch.offset as usize;
            let size = arch.size as usize;
            let bytes = offset
                .checked_add(size)
                .and_then(|end| data.get(offset..end))
                .ok_or_else(|| {
                    Error::MachO(format!(
                        "Fat arch {} ({:#x}+{:#x}) out of bounds",
                        i, offset, size
                    ))
                })?;

            let mut slice = Slice::parse(bytes, offset, options)
                .map_err(|e| Error::MachO(format!("Slice {}: {}", i, e)))?;
            slice.cputype = arch.cputype as u32;
            slice.cpusubtype = arch.cpusubtype as u32;
            debug!(index = i, offset, size, arch = slice.arch_name(), "parsed fat slice");
            slices.push(slice);
        }

        Ok(Self {
            is_fat: true,
            slices,
        })
    }

    /// Whether the file is a fat container.
    pub fn is_fat(&self) -> bool {
        self.is_fat
    }

    /// Architecture slices; a thin file has exactly one.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }
}
