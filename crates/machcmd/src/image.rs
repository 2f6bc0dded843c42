//! Thin Mach-O images: the header and its load commands.
//!
//! ## Layout
//!
//! ```text
//! ┌───────────────────────────────────┐
//! │ mach_header (28 bytes)            │
//! │ or mach_header_64 (32 bytes)      │
//! ├───────────────────────────────────┤
//! │ load command 0                    │
//! │ ...                               │ sizeofcmds
//! │ load command ncmds - 1            │
//! │ slack (kept as-is)                │
//! ├───────────────────────────────────┤
//! │ segment contents (not modeled)    │
//! └───────────────────────────────────┘
//! ```
//!
//! Only the header and the command region are parsed; file contents the
//! commands point at are left alone.

use scroll::{Pread, Pwrite, SizeWith};
use tracing::debug;

use crate::commands::fields::{read_fields, write_fields, EntryPointCommand};
use crate::commands::{read_commands, LoadCommand};
use crate::constants::*;
use crate::{Error, ReadOptions, Result};

/// Header fields shared by the 32- and 64-bit layouts.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
struct HeaderFields {
    magic: u32,
    cputype: u32,
    cpusubtype: u32,
    filetype: u32,
    ncmds: u32,
    sizeofcmds: u32,
    flags: u32,
}

/// Size of `mach_header`.
pub const SIZEOF_MACH_HEADER: usize = 28;

/// Size of `mach_header_64`.
pub const SIZEOF_MACH_HEADER_64: usize = 32;

/// A little-endian Mach-O header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachHeader {
    /// `MH_MAGIC` or `MH_MAGIC_64`.
    pub magic: u32,
    pub cputype: u32,
    pub cpusubtype: u32,
    /// `MH_EXECUTE`, `MH_DYLIB`, ...
    pub filetype: u32,
    pub ncmds: u32,
    pub sizeofcmds: u32,
    pub flags: u32,
    /// Present in 64-bit headers only; zero otherwise.
    pub reserved: u32,
}

impl MachHeader {
    /// Create a header with no commands.
    ///
    /// `magic` selects the width and must be `MH_MAGIC` or `MH_MAGIC_64`.
    pub fn new(magic: u32, cputype: u32, cpusubtype: u32, filetype: u32, flags: u32) -> Result<Self> {
        check_magic(magic)?;
        Ok(Self {
            magic,
            cputype,
            cpusubtype,
            filetype,
            ncmds: 0,
            sizeofcmds: 0,
            flags,
            reserved: 0,
        })
    }

    /// Parse the header at the start of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedStream`] if `bytes` is shorter than the
    /// header and [`Error::MachO`] for byte-swapped, fat or unknown magics.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let magic = bytes
            .get(..4)
            .map(|m| u32::from_le_bytes([m[0], m[1], m[2], m[3]]))
            .ok_or(Error::TruncatedStream)?;
        check_magic(magic)?;

        let size = if magic == MH_MAGIC_64 {
            SIZEOF_MACH_HEADER_64
        } else {
            SIZEOF_MACH_HEADER
        };
        if bytes.len() < size {
            return Err(Error::TruncatedStream);
        }

        let fields: HeaderFields = read_fields(bytes)?;
        let reserved = if magic == MH_MAGIC_64 {
            read_fields::<u32>(&bytes[SIZEOF_MACH_HEADER..])?
        } else {
            0
        };
        Ok(Self {
            magic: fields.magic,
            cputype: fields.cputype,
            cpusubtype: fields.cpusubtype,
            filetype: fields.filetype,
            ncmds: fields.ncmds,
            sizeofcmds: fields.sizeofcmds,
            flags: fields.flags,
            reserved,
        })
    }

    /// Whether this is a 64-bit header.
    pub fn is_64(&self) -> bool {
        self.magic == MH_MAGIC_64
    }

    /// Encoded size of the header.
    pub fn size(&self) -> usize {
        if self.is_64() {
            SIZEOF_MACH_HEADER_64
        } else {
            SIZEOF_MACH_HEADER
        }
    }

    /// Pointer width in bytes, the natural alignment of load commands.
    pub fn alignment(&self) -> u32 {
        if self.is_64() {
            8
        } else {
            4
        }
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let fields = HeaderFields {
            magic: self.magic,
            cputype: self.cputype,
            cpusubtype: self.cpusubtype,
            filetype: self.filetype,
            ncmds: self.ncmds,
            sizeofcmds: self.sizeofcmds,
            flags: self.flags,
        };
        write_fields(fields, out)?;
        if self.is_64() {
            write_fields(self.reserved, out)?;
        }
        Ok(())
    }
}

fn check_magic(magic: u32) -> Result<()> {
    match magic {
        MH_MAGIC | MH_MAGIC_64 => Ok(()),
        MH_CIGAM | MH_CIGAM_64 => Err(Error::MachO(
            "Big-endian images are not supported".into(),
        )),
        FAT_MAGIC | FAT_CIGAM => Err(Error::MachO(
            "Fat container, not a thin image".into(),
        )),
        other => Err(Error::MachO(format!("Bad magic {other:#010x}"))),
    }
}

/// A thin Mach-O image reduced to its header and load commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachOImage {
    header: MachHeader,
    commands: Vec<LoadCommand>,
    slack: Vec<u8>,
}

impl MachOImage {
    /// Create an image from a header and commands, recomputing `ncmds` and
    /// `sizeofcmds`.
    pub fn new(mut header: MachHeader, commands: Vec<LoadCommand>) -> Result<Self> {
        header.ncmds = u32::try_from(commands.len())
            .map_err(|_| Error::MachO("Too many load commands".into()))?;
        header.sizeofcmds = commands
            .iter()
            .try_fold(0u32, |total, command| total.checked_add(command.cmdsize()))
            .ok_or_else(|| Error::MachO("Load commands exceed 4 GiB".into()))?;
        Ok(Self {
            header,
            commands,
            slack: Vec::new(),
        })
    }

    /// Parse an image with default options.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_with(bytes, &ReadOptions::default())
    }

    /// Parse the header and exactly `ncmds` load commands.
    ///
    /// Commands must fit inside the `sizeofcmds` region; one running past it
    /// fails with [`Error::TruncatedStream`]. In strict mode the alignment is
    /// taken from the header width.
    pub fn parse_with(bytes: &[u8], options: &ReadOptions) -> Result<Self> {
        let header = MachHeader::parse(bytes)?;
        let options = options.alignment(header.alignment());

        let start = header.size();
        let end = start
            .checked_add(header.sizeofcmds as usize)
            .filter(|&end| end <= bytes.len())
            .ok_or(Error::TruncatedStream)?;

        let mut region = &bytes[start..end];
        let commands = read_commands(&mut region, header.ncmds, &options)?;

        let mut slack = Vec::new();
        slack.try_reserve_exact(region.len())?;
        slack.extend_from_slice(region);

        debug!(
            ncmds = header.ncmds,
            sizeofcmds = header.sizeofcmds,
            slack = slack.len(),
            "parsed Mach-O image"
        );
        Ok(Self {
            header,
            commands,
            slack,
        })
    }

    /// Encode the header, the commands and any slack.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.header.size() + self.header.sizeofcmds as usize)?;
        self.header.write_to(&mut out)?;
        for command in &self.commands {
            command.write_to(&mut out)?;
        }
        out.extend_from_slice(&self.slack);
        Ok(out)
    }

    /// Append a command, updating `ncmds` and `sizeofcmds`.
    pub fn push_command(&mut self, command: LoadCommand) -> Result<()> {
        let ncmds = self
            .header
            .ncmds
            .checked_add(1)
            .ok_or_else(|| Error::MachO("Too many load commands".into()))?;
        let sizeofcmds = self
            .header
            .sizeofcmds
            .checked_add(command.cmdsize())
            .ok_or_else(|| Error::MachO("Load commands exceed 4 GiB".into()))?;
        self.commands.try_reserve(1)?;
        self.commands.push(command);
        self.header.ncmds = ncmds;
        self.header.sizeofcmds = sizeofcmds;
        Ok(())
    }

    /// The header as read or last updated.
    pub fn header(&self) -> &MachHeader {
        &self.header
    }

    /// All load commands in order.
    pub fn commands(&self) -> &[LoadCommand] {
        &self.commands
    }

    /// Bytes between the last command and the end of `sizeofcmds`.
    pub fn slack(&self) -> &[u8] {
        &self.slack
    }

    /// Whether this is a 64-bit image.
    pub fn is_64(&self) -> bool {
        self.header.is_64()
    }

    /// Segment commands in order.
    pub fn segments(&self) -> impl Iterator<Item = &LoadCommand> {
        self.commands
            .iter()
            .filter(|command| command.segment_name().is_some())
    }

    /// The segment called `name`.
    pub fn segment(&self, name: &[u8]) -> Option<&LoadCommand> {
        self.segments()
            .find(|command| command.segment_name() == Some(name))
    }

    /// Install names of the libraries this image links against.
    pub fn dylibs(&self) -> Vec<&[u8]> {
        self.commands
            .iter()
            .filter(|command| matches!(command, LoadCommand::Dylib(_)))
            .filter_map(LoadCommand::dylib_path)
            .collect()
    }

    /// The install name from `LC_ID_DYLIB`.
    pub fn install_name(&self) -> Option<&[u8]> {
        self.commands.iter().find_map(|command| match command {
            LoadCommand::IdDylib(record) => record.path().ok(),
            _ => None,
        })
    }

    /// Run paths in order.
    pub fn rpaths(&self) -> Vec<&[u8]> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                LoadCommand::Rpath(record) => record.path().ok(),
                _ => None,
            })
            .collect()
    }

    /// The image UUID.
    pub fn uuid(&self) -> Option<[u8; 16]> {
        self.commands.iter().find_map(|command| match command {
            LoadCommand::Uuid(record) => Some(record.fields().uuid),
            _ => None,
        })
    }

    /// The `LC_MAIN` entry point.
    pub fn entry_point(&self) -> Option<EntryPointCommand> {
        self.commands.iter().find_map(|command| match command {
            LoadCommand::EntryPoint(record) => Some(*record.fields()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{fixed_name, Section64, Segment64, SegmentCommand64};

    fn text_segment() -> LoadCommand {
        let fields = SegmentCommand64 {
            segname: fixed_name(b"__TEXT"),
            vmaddr: 0x1_0000_0000,
            vmsize: 0x4000,
            fileoff: 0,
            filesize: 0x4000,
            maxprot: VM_PROT_READ | VM_PROT_EXECUTE,
            initprot: VM_PROT_READ | VM_PROT_EXECUTE,
            nsects: 0,
            flags: 0,
        };
        let section = Section64 {
            sectname: fixed_name(b"__text"),
            segname: fixed_name(b"__TEXT"),
            addr: 0x1_0000_3f00,
            size: 0x40,
            offset: 0x3f00,
            align: 2,
            ..Default::default()
        };
        LoadCommand::Segment64(Segment64::new(fields, vec![section]).unwrap())
    }

    fn sample_image() -> MachOImage {
        let header = MachHeader::new(MH_MAGIC_64, 0x0100_000c, 0, MH_EXECUTE, MH_PIE).unwrap();
        MachOImage::new(
            header,
            vec![
                text_segment(),
                LoadCommand::dylinker(LC_LOAD_DYLINKER, "/usr/lib/dyld").unwrap(),
                LoadCommand::dylib(LC_LOAD_DYLIB, "/usr/lib/libSystem.B.dylib", 2, 0x0501_0000, 0x0001_0000).unwrap(),
                LoadCommand::rpath("@executable_path/../Frameworks").unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_header_sizes() {
        let header = MachHeader::new(MH_MAGIC, 7, 3, MH_EXECUTE, 0).unwrap();
        assert_eq!(header.size(), 28);
        assert_eq!(header.alignment(), 4);

        let header = MachHeader::new(MH_MAGIC_64, 7, 3, MH_EXECUTE, 0).unwrap();
        assert_eq!(header.size(), 32);
        assert_eq!(header.alignment(), 8);
    }

    #[test]
    fn test_header_rejects_other_magics() {
        assert!(matches!(
            MachHeader::parse(&MH_CIGAM_64.to_le_bytes()),
            Err(Error::MachO(_))
        ));
        assert!(matches!(
            MachHeader::parse(&FAT_MAGIC.to_be_bytes()),
            Err(Error::MachO(_))
        ));
        assert!(matches!(
            MachHeader::parse(&[0xcf, 0xfa]),
            Err(Error::TruncatedStream)
        ));
        assert!(MachHeader::new(0x1234, 0, 0, 0, 0).is_err());
    }

    #[test]
    fn test_new_computes_counts() {
        let image = sample_image();
        assert_eq!(image.header().ncmds, 4);
        assert_eq!(image.header().sizeofcmds, 152 + 32 + 56 + 48);
    }

    #[test]
    fn test_round_trip() {
        let image = sample_image();
        let bytes = image.to_bytes().unwrap();
        assert_eq!(bytes.len(), 32 + 288);

        let parsed = MachOImage::parse(&bytes).unwrap();
        assert_eq!(parsed, image);
        assert_eq!(parsed.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_accessors() {
        let image = sample_image();
        assert_eq!(image.segments().count(), 1);
        assert!(image.segment(b"__TEXT").is_some());
        assert!(image.segment(b"__DATA").is_none());
        assert_eq!(image.dylibs(), vec![&b"/usr/lib/libSystem.B.dylib"[..]]);
        assert_eq!(image.rpaths(), vec![&b"@executable_path/../Frameworks"[..]]);
        assert!(image.install_name().is_none());
        assert!(image.uuid().is_none());
        assert!(image.entry_point().is_none());
    }

    #[test]
    fn test_slack_preserved() {
        let mut bytes = sample_image().to_bytes().unwrap();
        let sizeofcmds = 288u32 + 16;
        bytes[20..24].copy_from_slice(&sizeofcmds.to_le_bytes());
        bytes.extend_from_slice(&[0xee; 16]);

        let parsed = MachOImage::parse(&bytes).unwrap();
        assert_eq!(parsed.slack(), &[0xee; 16]);
        assert_eq!(parsed.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_command_past_region_is_truncated() {
        let mut bytes = sample_image().to_bytes().unwrap();
        // Shrink sizeofcmds so the last command overruns it.
        bytes[20..24].copy_from_slice(&280u32.to_le_bytes());
        assert!(matches!(
            MachOImage::parse(&bytes),
            Err(Error::TruncatedStream)
        ));
    }

    #[test]
    fn test_region_past_end_is_truncated() {
        let bytes = sample_image().to_bytes().unwrap();
        assert!(matches!(
            MachOImage::parse(&bytes[..100]),
            Err(Error::TruncatedStream)
        ));
    }

    #[test]
    fn test_push_command() {
        let mut image = sample_image();
        let uuid = crate::commands::Record::new(
            LC_UUID,
            crate::commands::UuidCommand { uuid: [0x11; 16] },
            Vec::new(),
        )
        .unwrap();
        image.push_command(LoadCommand::Uuid(uuid)).unwrap();

        assert_eq!(image.header().ncmds, 5);
        assert_eq!(image.header().sizeofcmds, 288 + 24);
        assert_eq!(image.uuid(), Some([0x11; 16]));

        let reparsed = MachOImage::parse(&image.to_bytes().unwrap()).unwrap();
        assert_eq!(reparsed, image);
    }

    #[test]
    fn test_strict_uses_header_width() {
        let header = MachHeader::new(MH_MAGIC, 7, 3, MH_EXECUTE, 0).unwrap();
        let odd = crate::commands::Record::new(
            0x4242,
            crate::commands::Empty,
            vec![0; 4],
        )
        .unwrap();
        let image = MachOImage::new(header, vec![LoadCommand::Unknown(odd)]).unwrap();
        let bytes = image.to_bytes().unwrap();

        let strict = ReadOptions::new().strict_alignment(true);
        assert!(MachOImage::parse_with(&bytes, &strict).is_ok());

        let mut header64 = header;
        header64.magic = MH_MAGIC_64;
        let image = MachOImage::new(header64, image.commands().to_vec()).unwrap();
        let bytes = image.to_bytes().unwrap();
        assert!(matches!(
            MachOImage::parse_with(&bytes, &strict),
            Err(Error::MisalignedRecord { alignment: 8, .. })
        ));
    }
}
