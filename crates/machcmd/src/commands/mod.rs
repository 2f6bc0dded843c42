//! Load commands.
//!
//! A load command stream is a sequence of self-describing records, each
//! starting with `cmd` (the tag) and `cmdsize` (the total size). Reading is
//! frame-first: the whole record is pulled from the source before any field
//! is interpreted, so a malformed record never leaves the source positioned
//! in the middle of a record. [`LoadCommand::read`] is the only place tags
//! are mapped to shapes.

pub mod fields;
pub mod record;
pub mod segment;

use std::fmt;
use std::io::{Read, Write};
use std::str;

use tracing::{debug, trace};

use crate::constants::*;
use crate::{Error, ReadOptions, Result};

pub use fields::*;
pub use record::Record;
pub use segment::{
    fixed_name, name_value, Section32, Section64, SectionFields, Segment, Segment32, Segment64,
    SegmentCommand32, SegmentCommand64, SegmentFields, NAME_LEN,
};

/// A load command interpreted according to its tag.
///
/// Records sharing a layout share an alternative; the exact tag stays in the
/// record header. Obsolete tags keep their historical layouts. Any other
/// tag decodes into [`LoadCommand::Unknown`] with the whole payload kept as
/// opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadCommand {
    /// `LC_SEGMENT`
    Segment32(Segment32),
    /// `LC_SEGMENT_64`
    Segment64(Segment64),
    /// `LC_SYMTAB`
    Symtab(Record<SymtabCommand>),
    /// `LC_DYSYMTAB`
    Dysymtab(Record<DysymtabCommand>),
    /// `LC_THREAD` or `LC_UNIXTHREAD`; the flavor/count/state triples are
    /// kept in the tail.
    Thread(Record<Empty>),
    /// `LC_LOAD_DYLIB`, `LC_LOAD_WEAK_DYLIB`, `LC_REEXPORT_DYLIB`,
    /// `LC_LAZY_LOAD_DYLIB`, or `LC_LOAD_UPWARD_DYLIB`
    Dylib(Record<DylibCommand>),
    /// `LC_ID_DYLIB`
    IdDylib(Record<DylibCommand>),
    /// `LC_LOAD_DYLINKER`
    LoadDylinker(Record<DylinkerCommand>),
    /// `LC_ID_DYLINKER`
    IdDylinker(Record<DylinkerCommand>),
    /// `LC_DYLD_ENVIRONMENT`
    DyldEnvironment(Record<DylinkerCommand>),
    /// `LC_PREBOUND_DYLIB`
    PreboundDylib(Record<PreboundDylibCommand>),
    /// `LC_ROUTINES`
    Routines32(Record<RoutinesCommand32>),
    /// `LC_ROUTINES_64`
    Routines64(Record<RoutinesCommand64>),
    /// `LC_SUB_FRAMEWORK`
    SubFramework(Record<SubCommand>),
    /// `LC_SUB_UMBRELLA`
    SubUmbrella(Record<SubCommand>),
    /// `LC_SUB_CLIENT`
    SubClient(Record<SubCommand>),
    /// `LC_SUB_LIBRARY`
    SubLibrary(Record<SubCommand>),
    /// `LC_TWOLEVEL_HINTS`
    TwolevelHints(Record<TwolevelHintsCommand>),
    /// `LC_PREBIND_CKSUM`
    PrebindCksum(Record<PrebindCksumCommand>),
    /// `LC_UUID`
    Uuid(Record<UuidCommand>),
    /// `LC_RPATH`
    Rpath(Record<RpathCommand>),
    /// `LC_CODE_SIGNATURE`, `LC_SEGMENT_SPLIT_INFO`, `LC_FUNCTION_STARTS`,
    /// `LC_DATA_IN_CODE`, `LC_DYLIB_CODE_SIGN_DRS`,
    /// `LC_LINKER_OPTIMIZATION_HINT`, `LC_DYLD_EXPORTS_TRIE`,
    /// `LC_DYLD_CHAINED_FIXUPS`, or `LC_ATOM_INFO`
    LinkeditData(Record<LinkeditDataCommand>),
    /// `LC_ENCRYPTION_INFO`
    EncryptionInfo32(Record<EncryptionInfoCommand>),
    /// `LC_ENCRYPTION_INFO_64`
    EncryptionInfo64(Record<EncryptionInfoCommand64>),
    /// `LC_DYLD_INFO` or `LC_DYLD_INFO_ONLY`
    DyldInfo(Record<DyldInfoCommand>),
    /// `LC_VERSION_MIN_MACOSX`, `LC_VERSION_MIN_IPHONEOS`,
    /// `LC_VERSION_MIN_TVOS`, or `LC_VERSION_MIN_WATCHOS`
    VersionMin(Record<VersionMinCommand>),
    /// `LC_MAIN`
    EntryPoint(Record<EntryPointCommand>),
    /// `LC_SOURCE_VERSION`
    SourceVersion(Record<SourceVersionCommand>),
    /// `LC_LINKER_OPTION`
    LinkerOption(Record<LinkerOptionCommand>),
    /// `LC_NOTE`
    Note(Record<NoteCommand>),
    /// `LC_BUILD_VERSION`
    BuildVersion(Record<BuildVersionCommand>),
    /// `LC_FILESET_ENTRY`
    FilesetEntry(Record<FilesetEntryCommand>),
    /// `LC_SYMSEG` (obsolete)
    Symseg(Record<SymsegCommand>),
    /// `LC_LOADFVMLIB` (obsolete)
    LoadFvmlib(Record<FvmlibCommand>),
    /// `LC_IDFVMLIB` (obsolete)
    IdFvmlib(Record<FvmlibCommand>),
    /// `LC_IDENT` (obsolete); the free-form strings are kept in the tail.
    Ident(Record<Empty>),
    /// `LC_FVMFILE` (obsolete)
    Fvmfile(Record<FvmfileCommand>),
    /// `LC_PREPAGE` (obsolete)
    Prepage(Record<Empty>),
    /// Any other tag; everything after the header is opaque.
    Unknown(Record<Empty>),
}

/// Run `$body` with `$bind` bound to whichever record is active.
macro_rules! with_record {
    ($value:expr, $bind:ident => $body:expr) => {
        match $value {
            LoadCommand::Segment32($bind) => $body,
            LoadCommand::Segment64($bind) => $body,
            LoadCommand::Symtab($bind) => $body,
            LoadCommand::Dysymtab($bind) => $body,
            LoadCommand::Thread($bind) => $body,
            LoadCommand::Dylib($bind) => $body,
            LoadCommand::IdDylib($bind) => $body,
            LoadCommand::LoadDylinker($bind) => $body,
            LoadCommand::IdDylinker($bind) => $body,
            LoadCommand::DyldEnvironment($bind) => $body,
            LoadCommand::PreboundDylib($bind) => $body,
            LoadCommand::Routines32($bind) => $body,
            LoadCommand::Routines64($bind) => $body,
            LoadCommand::SubFramework($bind) => $body,
            LoadCommand::SubUmbrella($bind) => $body,
            LoadCommand::SubClient($bind) => $body,
            LoadCommand::SubLibrary($bind) => $body,
            LoadCommand::TwolevelHints($bind) => $body,
            LoadCommand::PrebindCksum($bind) => $body,
            LoadCommand::Uuid($bind) => $body,
            LoadCommand::Rpath($bind) => $body,
            LoadCommand::LinkeditData($bind) => $body,
            LoadCommand::EncryptionInfo32($bind) => $body,
            LoadCommand::EncryptionInfo64($bind) => $body,
            LoadCommand::DyldInfo($bind) => $body,
            LoadCommand::VersionMin($bind) => $body,
            LoadCommand::EntryPoint($bind) => $body,
            LoadCommand::SourceVersion($bind) => $body,
            LoadCommand::LinkerOption($bind) => $body,
            LoadCommand::Note($bind) => $body,
            LoadCommand::BuildVersion($bind) => $body,
            LoadCommand::FilesetEntry($bind) => $body,
            LoadCommand::Symseg($bind) => $body,
            LoadCommand::LoadFvmlib($bind) => $body,
            LoadCommand::IdFvmlib($bind) => $body,
            LoadCommand::Ident($bind) => $body,
            LoadCommand::Fvmfile($bind) => $body,
            LoadCommand::Prepage($bind) => $body,
            LoadCommand::Unknown($bind) => $body,
        }
    };
}

impl LoadCommand {
    /// Read one load command from `source` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedStream`] if the source ends before the
    /// header or the declared `cmdsize`, and [`Error::InvalidRecordSize`]
    /// if `cmdsize` is too small for the record kind. Nothing is returned
    /// for a record that failed part way.
    pub fn read<R: Read + ?Sized>(source: &mut R) -> Result<Self> {
        Self::read_with(source, &ReadOptions::default())
    }

    /// Read one load command from `source`.
    pub fn read_with<R: Read + ?Sized>(source: &mut R, options: &ReadOptions) -> Result<Self> {
        options.validate()?;

        let mut prefix = [0u8; SIZEOF_LOAD_COMMAND];
        source.read_exact(&mut prefix)?;
        let header: LoadCommandHeader = read_fields(&prefix)?;

        let cmdsize = header.cmdsize as usize;
        if cmdsize < SIZEOF_LOAD_COMMAND {
            return Err(Error::InvalidRecordSize {
                cmd: header.cmd,
                cmdsize: header.cmdsize,
                minimum: SIZEOF_LOAD_COMMAND,
            });
        }
        options.check_size(header.cmd, header.cmdsize)?;

        let mut frame = Vec::new();
        frame.try_reserve_exact(cmdsize)?;
        frame.extend_from_slice(&prefix);
        let remaining = (cmdsize - SIZEOF_LOAD_COMMAND) as u64;
        (&mut *source).take(remaining).read_to_end(&mut frame)?;
        if frame.len() != cmdsize {
            return Err(Error::TruncatedStream);
        }

        Self::parse(header, &frame)
    }

    /// Interpret a complete frame according to its tag.
    fn parse(header: LoadCommandHeader, frame: &[u8]) -> Result<Self> {
        trace!(cmd = cmd_to_str(header.cmd), cmdsize = header.cmdsize, "load command");
        Ok(match header.cmd {
            LC_SEGMENT => LoadCommand::Segment32(Segment::parse(header, frame)?),
            LC_SEGMENT_64 => LoadCommand::Segment64(Segment::parse(header, frame)?),
            LC_SYMTAB => LoadCommand::Symtab(Record::parse(header, frame)?),
            LC_DYSYMTAB => LoadCommand::Dysymtab(Record::parse(header, frame)?),
            LC_THREAD | LC_UNIXTHREAD => LoadCommand::Thread(Record::parse(header, frame)?),
            LC_LOAD_DYLIB
            | LC_LOAD_WEAK_DYLIB
            | LC_REEXPORT_DYLIB
            | LC_LAZY_LOAD_DYLIB
            | LC_LOAD_UPWARD_DYLIB => LoadCommand::Dylib(Record::parse(header, frame)?),
            LC_ID_DYLIB => LoadCommand::IdDylib(Record::parse(header, frame)?),
            LC_LOAD_DYLINKER => LoadCommand::LoadDylinker(Record::parse(header, frame)?),
            LC_ID_DYLINKER => LoadCommand::IdDylinker(Record::parse(header, frame)?),
            LC_DYLD_ENVIRONMENT => LoadCommand::DyldEnvironment(Record::parse(header, frame)?),
            LC_PREBOUND_DYLIB => LoadCommand::PreboundDylib(Record::parse(header, frame)?),
            LC_ROUTINES => LoadCommand::Routines32(Record::parse(header, frame)?),
            LC_ROUTINES_64 => LoadCommand::Routines64(Record::parse(header, frame)?),
            LC_SUB_FRAMEWORK => LoadCommand::SubFramework(Record::parse(header, frame)?),
            LC_SUB_UMBRELLA => LoadCommand::SubUmbrella(Record::parse(header, frame)?),
            LC_SUB_CLIENT => LoadCommand::SubClient(Record::parse(header, frame)?),
            LC_SUB_LIBRARY => LoadCommand::SubLibrary(Record::parse(header, frame)?),
            LC_TWOLEVEL_HINTS => LoadCommand::TwolevelHints(Record::parse(header, frame)?),
            LC_PREBIND_CKSUM => LoadCommand::PrebindCksum(Record::parse(header, frame)?),
            LC_UUID => LoadCommand::Uuid(Record::parse(header, frame)?),
            LC_RPATH => LoadCommand::Rpath(Record::parse(header, frame)?),
            LC_CODE_SIGNATURE
            | LC_SEGMENT_SPLIT_INFO
            | LC_FUNCTION_STARTS
            | LC_DATA_IN_CODE
            | LC_DYLIB_CODE_SIGN_DRS
            | LC_LINKER_OPTIMIZATION_HINT
            | LC_DYLD_EXPORTS_TRIE
            | LC_DYLD_CHAINED_FIXUPS
            | LC_ATOM_INFO => LoadCommand::LinkeditData(Record::parse(header, frame)?),
            LC_ENCRYPTION_INFO => LoadCommand::EncryptionInfo32(Record::parse(header, frame)?),
            LC_ENCRYPTION_INFO_64 => LoadCommand::EncryptionInfo64(Record::parse(header, frame)?),
            LC_DYLD_INFO | LC_DYLD_INFO_ONLY => {
                LoadCommand::DyldInfo(Record::parse(header, frame)?)
            }
            LC_VERSION_MIN_MACOSX
            | LC_VERSION_MIN_IPHONEOS
            | LC_VERSION_MIN_TVOS
            | LC_VERSION_MIN_WATCHOS => LoadCommand::VersionMin(Record::parse(header, frame)?),
            LC_MAIN => LoadCommand::EntryPoint(Record::parse(header, frame)?),
            LC_SOURCE_VERSION => LoadCommand::SourceVersion(Record::parse(header, frame)?),
            LC_LINKER_OPTION => LoadCommand::LinkerOption(Record::parse(header, frame)?),
            LC_NOTE => LoadCommand::Note(Record::parse(header, frame)?),
            LC_BUILD_VERSION => LoadCommand::BuildVersion(Record::parse(header, frame)?),
            LC_FILESET_ENTRY => LoadCommand::FilesetEntry(Record::parse(header, frame)?),
            LC_SYMSEG => LoadCommand::Symseg(Record::parse(header, frame)?),
            LC_LOADFVMLIB => LoadCommand::LoadFvmlib(Record::parse(header, frame)?),
            LC_IDFVMLIB => LoadCommand::IdFvmlib(Record::parse(header, frame)?),
            LC_IDENT => LoadCommand::Ident(Record::parse(header, frame)?),
            LC_FVMFILE => LoadCommand::Fvmfile(Record::parse(header, frame)?),
            LC_PREPAGE => LoadCommand::Prepage(Record::parse(header, frame)?),
            cmd => {
                debug!(cmd = format_args!("{cmd:#x}"), "keeping unrecognized load command opaque");
                LoadCommand::Unknown(Record::parse(header, frame)?)
            }
        })
    }

    /// Write the command to `sink` exactly as [`LoadCommand::read`] would
    /// consume it.
    pub fn write<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        let bytes = self.to_bytes()?;
        sink.write_all(&bytes)?;
        Ok(())
    }

    /// Encode the command into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.cmdsize() as usize)?;
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        with_record!(self, record => record.write_to(out))
    }

    /// The record header of the active alternative.
    pub fn header(&self) -> LoadCommandHeader {
        with_record!(self, record => record.header())
    }

    /// The record tag.
    pub fn cmd(&self) -> u32 {
        self.header().cmd
    }

    /// The declared total size.
    pub fn cmdsize(&self) -> u32 {
        self.header().cmdsize
    }

    /// The tag without the `LC_REQ_DYLD` bit.
    pub fn base_cmd(&self) -> u32 {
        self.cmd() & !LC_REQ_DYLD
    }

    /// Whether the dynamic linker must understand this command to load the
    /// image.
    pub fn is_required(&self) -> bool {
        self.cmd() & LC_REQ_DYLD != 0
    }

    /// Whether the command fell back to the opaque alternative.
    pub fn is_unknown(&self) -> bool {
        matches!(self, LoadCommand::Unknown(_))
    }

    /// Release the command and every buffer it owns.
    ///
    /// Equivalent to dropping it; taking `self` by value means it can only
    /// happen once.
    pub fn release(self) {
        drop(self)
    }

    /// Deep comparison of two commands.
    ///
    /// Commands of different alternatives are never equal. Otherwise the
    /// headers, fixed fields, trailing bytes and, for segments, the sections
    /// are compared.
    pub fn structurally_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Build a dylib command from an install name.
    ///
    /// `cmd` selects the flavor (`LC_LOAD_DYLIB`, `LC_ID_DYLIB`,
    /// `LC_LOAD_WEAK_DYLIB`, ...). The path is placed right after the fixed
    /// fields and NUL-padded so the size is a multiple of 8.
    ///
    /// # Example
    ///
    /// ```
    /// use machcmd::constants::LC_LOAD_DYLIB;
    /// use machcmd::LoadCommand;
    ///
    /// let dylib = LoadCommand::dylib(LC_LOAD_DYLIB, "/usr/lib/libSystem.B.dylib", 2, 0x0501_0000, 0x0001_0000)?;
    /// assert_eq!(dylib.cmdsize(), 56);
    /// assert_eq!(dylib.dylib_path(), Some(&b"/usr/lib/libSystem.B.dylib"[..]));
    /// # Ok::<(), machcmd::Error>(())
    /// ```
    pub fn dylib(
        cmd: u32,
        path: &str,
        timestamp: u32,
        current_version: u32,
        compatibility_version: u32,
    ) -> Result<Self> {
        let fields = DylibCommand {
            name_offset: Record::<DylibCommand>::prefix_size() as u32,
            timestamp,
            current_version,
            compatibility_version,
        };
        let record = Record::with_string(cmd, fields, path.as_bytes())?;
        match cmd {
            LC_ID_DYLIB => Ok(LoadCommand::IdDylib(record)),
            LC_LOAD_DYLIB
            | LC_LOAD_WEAK_DYLIB
            | LC_REEXPORT_DYLIB
            | LC_LAZY_LOAD_DYLIB
            | LC_LOAD_UPWARD_DYLIB => Ok(LoadCommand::Dylib(record)),
            _ => Err(Error::MachO(format!(
                "{} ({cmd:#x}) is not a dylib command",
                cmd_to_str(cmd)
            ))),
        }
    }

    /// Build an `LC_RPATH` command.
    pub fn rpath(path: &str) -> Result<Self> {
        let fields = RpathCommand {
            path_offset: Record::<RpathCommand>::prefix_size() as u32,
        };
        Ok(LoadCommand::Rpath(Record::with_string(
            LC_RPATH,
            fields,
            path.as_bytes(),
        )?))
    }

    /// Build an `LC_LOAD_DYLINKER`, `LC_ID_DYLINKER` or
    /// `LC_DYLD_ENVIRONMENT` command.
    pub fn dylinker(cmd: u32, name: &str) -> Result<Self> {
        let fields = DylinkerCommand {
            name_offset: Record::<DylinkerCommand>::prefix_size() as u32,
        };
        let record = Record::with_string(cmd, fields, name.as_bytes())?;
        match cmd {
            LC_LOAD_DYLINKER => Ok(LoadCommand::LoadDylinker(record)),
            LC_ID_DYLINKER => Ok(LoadCommand::IdDylinker(record)),
            LC_DYLD_ENVIRONMENT => Ok(LoadCommand::DyldEnvironment(record)),
            _ => Err(Error::MachO(format!(
                "{} ({cmd:#x}) is not a dylinker command",
                cmd_to_str(cmd)
            ))),
        }
    }

    /// The install name of a dylib command.
    pub fn dylib_path(&self) -> Option<&[u8]> {
        match self {
            LoadCommand::Dylib(record) | LoadCommand::IdDylib(record) => record.path().ok(),
            _ => None,
        }
    }

    /// The logical name of a segment command.
    pub fn segment_name(&self) -> Option<&[u8]> {
        match self {
            LoadCommand::Segment32(segment) => Some(segment.name()),
            LoadCommand::Segment64(segment) => Some(segment.name()),
            _ => None,
        }
    }
}

impl fmt::Display for LoadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.header();
        write!(f, "{header}")?;
        match self {
            LoadCommand::Segment32(segment) => write_segment(f, segment),
            LoadCommand::Segment64(segment) => write_segment(f, segment),
            LoadCommand::Dylib(record) | LoadCommand::IdDylib(record) => {
                let dylib = record.fields();
                write_string(f, record.path())?;
                write!(
                    f,
                    " current {} compatibility {}",
                    format_version(dylib.current_version),
                    format_version(dylib.compatibility_version)
                )
            }
            LoadCommand::LoadDylinker(record)
            | LoadCommand::IdDylinker(record)
            | LoadCommand::DyldEnvironment(record) => write_string(f, record.name()),
            LoadCommand::SubFramework(record)
            | LoadCommand::SubUmbrella(record)
            | LoadCommand::SubClient(record)
            | LoadCommand::SubLibrary(record) => write_string(f, record.name()),
            LoadCommand::Rpath(record) => write_string(f, record.path()),
            LoadCommand::LoadFvmlib(record) | LoadCommand::IdFvmlib(record) => {
                write_string(f, record.name())?;
                write!(f, " minor {}", record.fields().minor_version)
            }
            LoadCommand::Fvmfile(record) => {
                write_string(f, record.name())?;
                write!(f, " header_addr {:#x}", record.fields().header_addr)
            }
            LoadCommand::Uuid(record) => write!(f, " {}", record.fields().to_hyphenated()),
            LoadCommand::Symtab(record) => {
                let symtab = record.fields();
                write!(f, " nsyms {} strsize {}", symtab.nsyms, symtab.strsize)
            }
            LoadCommand::LinkeditData(record) => {
                let data = record.fields();
                write!(f, " dataoff {:#x} datasize {}", data.dataoff, data.datasize)
            }
            LoadCommand::VersionMin(record) => {
                let version = record.fields();
                write!(
                    f,
                    " version {} sdk {}",
                    format_version(version.version),
                    format_version(version.sdk)
                )
            }
            LoadCommand::BuildVersion(record) => {
                let build = record.fields();
                write!(
                    f,
                    " platform {} minos {} sdk {} ntools {}",
                    build.platform,
                    format_version(build.minos),
                    format_version(build.sdk),
                    build.ntools
                )
            }
            LoadCommand::EntryPoint(record) => {
                let entry = record.fields();
                write!(f, " entryoff {:#x} stacksize {}", entry.entryoff, entry.stacksize)
            }
            LoadCommand::SourceVersion(record) => {
                write!(f, " {}", format_source_version(record.fields().version))
            }
            LoadCommand::Unknown(_) => write!(f, " (cmd {:#x})", header.cmd),
            _ => Ok(()),
        }
    }
}

fn write_segment<C: SegmentFields>(f: &mut fmt::Formatter<'_>, segment: &Segment<C>) -> fmt::Result {
    let fields = segment.fields();
    write!(
        f,
        " {} vmaddr {:#x} vmsize {:#x} nsects {}",
        String::from_utf8_lossy(segment.name()),
        fields.vmaddr(),
        fields.vmsize(),
        fields.nsects()
    )
}

fn write_string(f: &mut fmt::Formatter<'_>, string: Result<&[u8]>) -> fmt::Result {
    match string {
        Ok(bytes) => match str::from_utf8(bytes) {
            Ok(s) => write!(f, " {s}"),
            Err(_) => write!(f, " {}", String::from_utf8_lossy(bytes)),
        },
        Err(_) => write!(f, " <invalid string offset>"),
    }
}

/// Iterator reading a fixed number of load commands from a source.
///
/// Stops after the first error.
pub struct LoadCommandReader<'a, R: Read + ?Sized> {
    source: &'a mut R,
    remaining: u32,
    options: ReadOptions,
}

impl<'a, R: Read + ?Sized> LoadCommandReader<'a, R> {
    /// Read `ncmds` commands from `source` with `options`.
    pub fn new(source: &'a mut R, ncmds: u32, options: ReadOptions) -> Self {
        Self {
            source,
            remaining: ncmds,
            options,
        }
    }
}

impl<R: Read + ?Sized> Iterator for LoadCommandReader<'_, R> {
    type Item = Result<LoadCommand>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let command = LoadCommand::read_with(self.source, &self.options);
        self.remaining = if command.is_ok() { self.remaining - 1 } else { 0 };
        Some(command)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}

/// Read exactly `ncmds` load commands.
pub fn read_commands<R: Read + ?Sized>(
    source: &mut R,
    ncmds: u32,
    options: &ReadOptions,
) -> Result<Vec<LoadCommand>> {
    LoadCommandReader::new(source, ncmds, *options).collect()
}

/// Write `commands` back to back.
pub fn write_commands<'a, W, I>(commands: I, sink: &mut W) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a LoadCommand>,
{
    for command in commands {
        command.write(sink)?;
    }
    Ok(())
}
