//! Fixed-size field blocks of the known load commands.
//!
//! Every struct here describes the bytes that follow the 8-byte
//! [`LoadCommandHeader`] of one record kind. None of them repeat `cmd` or
//! `cmdsize`; the header is owned by the record wrapper. All layouts are
//! little-endian and packed exactly as in `mach-o/loader.h`.

use std::fmt;

use scroll::ctx::{self, TryFromCtx, TryIntoCtx};
use scroll::{Endian, Pread, Pwrite, SizeWith, LE};

use crate::constants::cmd_to_str;
use crate::Result;

/// Size of the common record header.
pub const SIZEOF_LOAD_COMMAND: usize = 8;

/// A fixed block of typed fields with a known little-endian encoding.
///
/// Implemented automatically for every type with the `scroll` derives.
pub trait FixedFields:
    fmt::Debug
    + Clone
    + Copy
    + PartialEq
    + Eq
    + for<'a> TryFromCtx<'a, Endian, Error = scroll::Error>
    + TryIntoCtx<Endian, Error = scroll::Error>
    + ctx::SizeWith<Endian>
{
    /// Number of bytes this block occupies.
    fn encoded_size() -> usize {
        <Self as ctx::SizeWith<Endian>>::size_with(&LE)
    }
}

impl<T> FixedFields for T where
    T: fmt::Debug
        + Clone
        + Copy
        + PartialEq
        + Eq
        + for<'a> TryFromCtx<'a, Endian, Error = scroll::Error>
        + TryIntoCtx<Endian, Error = scroll::Error>
        + ctx::SizeWith<Endian>
{
}

/// Decode a field block from the start of `bytes`.
///
/// The caller guarantees `bytes` is long enough.
pub(crate) fn read_fields<F: FixedFields>(bytes: &[u8]) -> Result<F> {
    let (fields, _) = F::try_from_ctx(bytes, LE)?;
    Ok(fields)
}

/// Append the encoding of a field block to `out`.
pub(crate) fn write_fields<F: FixedFields>(fields: F, out: &mut Vec<u8>) -> Result<()> {
    let start = out.len();
    out.resize(start + F::encoded_size(), 0);
    fields.try_into_ctx(&mut out[start..], LE)?;
    Ok(())
}

/// Round `value` up to a multiple of `alignment` (a power of two).
pub(crate) fn align_to(value: usize, alignment: usize) -> usize {
    (value + alignment - 1) & !(alignment - 1)
}

/// Format a packed `xxxx.yy.zz` version number.
pub fn format_version(packed: u32) -> String {
    format!(
        "{}.{}.{}",
        packed >> 16,
        (packed >> 8) & 0xff,
        packed & 0xff
    )
}

/// Format a packed `a.b.c.d.e` source version (24.10.10.10.10 bits).
pub fn format_source_version(packed: u64) -> String {
    format!(
        "{}.{}.{}.{}.{}",
        packed >> 40,
        (packed >> 30) & 0x3ff,
        (packed >> 20) & 0x3ff,
        (packed >> 10) & 0x3ff,
        packed & 0x3ff
    )
}

/// The prefix shared by every load command.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct LoadCommandHeader {
    /// Record tag, one of the `LC_*` constants.
    pub cmd: u32,
    /// Total size including this header and all trailing data.
    pub cmdsize: u32,
}

impl fmt::Display for LoadCommandHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cmdsize {}", cmd_to_str(self.cmd), self.cmdsize)
    }
}

/// An empty field block.
///
/// Used for records whose whole payload is opaque, including the fallback
/// for unrecognized tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Empty;

impl<'a> TryFromCtx<'a, Endian> for Empty {
    type Error = scroll::Error;

    fn try_from_ctx(_: &'a [u8], _: Endian) -> std::result::Result<(Self, usize), Self::Error> {
        Ok((Empty, 0))
    }
}

impl TryIntoCtx<Endian> for Empty {
    type Error = scroll::Error;

    fn try_into_ctx(self, _: &mut [u8], _: Endian) -> std::result::Result<usize, Self::Error> {
        Ok(0)
    }
}

impl ctx::SizeWith<Endian> for Empty {
    fn size_with(_: &Endian) -> usize {
        0
    }
}

/// `LC_SYMTAB`: location of the symbol and string tables.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct SymtabCommand {
    pub symoff: u32,
    pub nsyms: u32,
    pub stroff: u32,
    pub strsize: u32,
}

/// `LC_DYSYMTAB`: index ranges into the symbol table and related tables.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct DysymtabCommand {
    pub ilocalsym: u32,
    pub nlocalsym: u32,
    pub iextdefsym: u32,
    pub nextdefsym: u32,
    pub iundefsym: u32,
    pub nundefsym: u32,
    pub tocoff: u32,
    pub ntoc: u32,
    pub modtaboff: u32,
    pub nmodtab: u32,
    pub extrefsymoff: u32,
    pub nextrefsyms: u32,
    pub indirectsymoff: u32,
    pub nindirectsyms: u32,
    pub extreloff: u32,
    pub nextrel: u32,
    pub locreloff: u32,
    pub nlocrel: u32,
}

/// Dylib records: `LC_LOAD_DYLIB`, `LC_ID_DYLIB`, `LC_LOAD_WEAK_DYLIB`,
/// `LC_REEXPORT_DYLIB`, `LC_LAZY_LOAD_DYLIB`, `LC_LOAD_UPWARD_DYLIB`.
///
/// The install name follows in the tail at `name_offset`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct DylibCommand {
    /// Offset of the install name from the start of the command.
    pub name_offset: u32,
    pub timestamp: u32,
    pub current_version: u32,
    pub compatibility_version: u32,
}

/// `LC_LOAD_DYLINKER`, `LC_ID_DYLINKER`, `LC_DYLD_ENVIRONMENT`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct DylinkerCommand {
    pub name_offset: u32,
}

/// `LC_SUB_FRAMEWORK`, `LC_SUB_UMBRELLA`, `LC_SUB_CLIENT`, `LC_SUB_LIBRARY`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct SubCommand {
    pub name_offset: u32,
}

/// `LC_PREBOUND_DYLIB`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct PreboundDylibCommand {
    pub name_offset: u32,
    pub nmodules: u32,
    pub linked_modules_offset: u32,
}

/// `LC_RPATH`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct RpathCommand {
    pub path_offset: u32,
}

/// `LC_UUID`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct UuidCommand {
    pub uuid: [u8; 16],
}

impl UuidCommand {
    /// Canonical 8-4-4-4-12 hex form.
    pub fn to_hyphenated(&self) -> String {
        let mut out = String::with_capacity(36);
        for (i, byte) in self.uuid.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                out.push('-');
            }
            out.push_str(&format!("{byte:02X}"));
        }
        out
    }
}

/// Table descriptors in `__LINKEDIT`: `LC_CODE_SIGNATURE`,
/// `LC_SEGMENT_SPLIT_INFO`, `LC_FUNCTION_STARTS`, `LC_DATA_IN_CODE`,
/// `LC_DYLIB_CODE_SIGN_DRS`, `LC_LINKER_OPTIMIZATION_HINT`,
/// `LC_DYLD_EXPORTS_TRIE`, `LC_DYLD_CHAINED_FIXUPS`, `LC_ATOM_INFO`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct LinkeditDataCommand {
    pub dataoff: u32,
    pub datasize: u32,
}

/// `LC_DYLD_INFO` and `LC_DYLD_INFO_ONLY`.
///
/// Only the table locations are modeled; the opcode streams they point at
/// are not decoded.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct DyldInfoCommand {
    pub rebase_off: u32,
    pub rebase_size: u32,
    pub bind_off: u32,
    pub bind_size: u32,
    pub weak_bind_off: u32,
    pub weak_bind_size: u32,
    pub lazy_bind_off: u32,
    pub lazy_bind_size: u32,
    pub export_off: u32,
    pub export_size: u32,
}

/// `LC_VERSION_MIN_MACOSX`, `LC_VERSION_MIN_IPHONEOS`,
/// `LC_VERSION_MIN_TVOS`, `LC_VERSION_MIN_WATCHOS`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct VersionMinCommand {
    pub version: u32,
    pub sdk: u32,
}

/// `LC_MAIN`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct EntryPointCommand {
    /// File offset of `main()` relative to the `__TEXT` segment.
    pub entryoff: u64,
    /// Initial stack size, if not zero.
    pub stacksize: u64,
}

/// `LC_SOURCE_VERSION`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct SourceVersionCommand {
    pub version: u64,
}

/// `LC_ENCRYPTION_INFO`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct EncryptionInfoCommand {
    pub cryptoff: u32,
    pub cryptsize: u32,
    pub cryptid: u32,
}

/// `LC_ENCRYPTION_INFO_64`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct EncryptionInfoCommand64 {
    pub cryptoff: u32,
    pub cryptsize: u32,
    pub cryptid: u32,
    pub pad: u32,
}

/// `LC_BUILD_VERSION`
///
/// `ntools` [`BuildToolVersion`] entries follow in the tail.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct BuildVersionCommand {
    pub platform: u32,
    pub minos: u32,
    pub sdk: u32,
    pub ntools: u32,
}

/// One tool entry of an `LC_BUILD_VERSION` record.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct BuildToolVersion {
    pub tool: u32,
    pub version: u32,
}

/// `LC_LINKER_OPTION`: `count` NUL-terminated strings follow.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct LinkerOptionCommand {
    pub count: u32,
}

/// `LC_NOTE`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct NoteCommand {
    pub data_owner: [u8; 16],
    pub offset: u64,
    pub size: u64,
}

/// `LC_FILESET_ENTRY`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct FilesetEntryCommand {
    pub vmaddr: u64,
    pub fileoff: u64,
    pub entry_id_offset: u32,
    pub reserved: u32,
}

/// `LC_TWOLEVEL_HINTS`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct TwolevelHintsCommand {
    pub offset: u32,
    pub nhints: u32,
}

/// `LC_PREBIND_CKSUM`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct PrebindCksumCommand {
    pub cksum: u32,
}

/// `LC_ROUTINES`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct RoutinesCommand32 {
    pub init_address: u32,
    pub init_module: u32,
    pub reserved1: u32,
    pub reserved2: u32,
    pub reserved3: u32,
    pub reserved4: u32,
    pub reserved5: u32,
    pub reserved6: u32,
}

/// `LC_ROUTINES_64`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct RoutinesCommand64 {
    pub init_address: u64,
    pub init_module: u64,
    pub reserved1: u64,
    pub reserved2: u64,
    pub reserved3: u64,
    pub reserved4: u64,
    pub reserved5: u64,
    pub reserved6: u64,
}

/// `LC_SYMSEG` (obsolete): location of the old symbol segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct SymsegCommand {
    pub offset: u32,
    pub size: u32,
}

/// `LC_LOADFVMLIB` and `LC_IDFVMLIB` (obsolete): a fixed virtual memory
/// shared library. The pathname follows in the tail at `name_offset`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct FvmlibCommand {
    pub name_offset: u32,
    pub minor_version: u32,
    pub header_addr: u32,
}

/// `LC_FVMFILE` (obsolete): a file to be loaded at `header_addr`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pread, Pwrite, SizeWith)]
pub struct FvmfileCommand {
    pub name_offset: u32,
    pub header_addr: u32,
}
