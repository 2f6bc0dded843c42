//! Mach-O constants and magic numbers
//!
//! Header magics, load command tags, protection bits, section types and
//! attributes, platform identifiers, and the tags of formats this crate only
//! documents (dyld opcode streams and code-signing blobs).

// =============================================================================
// Header Magic Numbers
// =============================================================================

/// 32-bit Mach-O, native (little-endian) byte order
pub const MH_MAGIC: u32 = 0xfeedface;

/// 32-bit Mach-O, swapped byte order
pub const MH_CIGAM: u32 = 0xcefaedfe;

/// 64-bit Mach-O, native (little-endian) byte order
pub const MH_MAGIC_64: u32 = 0xfeedfacf;

/// 64-bit Mach-O, swapped byte order
pub const MH_CIGAM_64: u32 = 0xcffaedfe;

/// Fat (universal) container, stored big-endian
pub const FAT_MAGIC: u32 = 0xcafebabe;

/// Fat container as read little-endian
pub const FAT_CIGAM: u32 = 0xbebafeca;

// =============================================================================
// File Types
// =============================================================================

/// Relocatable object file
pub const MH_OBJECT: u32 = 0x1;

/// Demand paged executable file
pub const MH_EXECUTE: u32 = 0x2;

/// Fixed VM shared library file
pub const MH_FVMLIB: u32 = 0x3;

/// Core file
pub const MH_CORE: u32 = 0x4;

/// Preloaded executable file
pub const MH_PRELOAD: u32 = 0x5;

/// Dynamically bound shared library
pub const MH_DYLIB: u32 = 0x6;

/// Dynamic link editor
pub const MH_DYLINKER: u32 = 0x7;

/// Dynamically bound bundle file
pub const MH_BUNDLE: u32 = 0x8;

/// Shared library stub for static linking only
pub const MH_DYLIB_STUB: u32 = 0x9;

/// Companion file with only debug sections
pub const MH_DSYM: u32 = 0xa;

/// x86_64 kext
pub const MH_KEXT_BUNDLE: u32 = 0xb;

/// Set of Mach-Os
pub const MH_FILESET: u32 = 0xc;

// =============================================================================
// Header Flags
// =============================================================================

/// No undefined references
pub const MH_NOUNDEFS: u32 = 0x1;

/// Output of an incremental link
pub const MH_INCRLINK: u32 = 0x2;

/// Input for the dynamic linker
pub const MH_DYLDLINK: u32 = 0x4;

/// Undefined references bound by the dynamic linker when loaded
pub const MH_BINDATLOAD: u32 = 0x8;

/// Undefined references prebound
pub const MH_PREBOUND: u32 = 0x10;

/// Read-only and read-write segments are split
pub const MH_SPLIT_SEGS: u32 = 0x20;

/// Two-level namespace bindings
pub const MH_TWOLEVEL: u32 = 0x80;

/// Flat namespace bindings forced
pub const MH_FORCE_FLAT: u32 = 0x100;

/// Safe to divide sections into sub-sections for dead code stripping
pub const MH_SUBSECTIONS_VIA_SYMBOLS: u32 = 0x2000;

/// Contains weak definitions
pub const MH_WEAK_DEFINES: u32 = 0x8000;

/// Uses weak symbols
pub const MH_BINDS_TO_WEAK: u32 = 0x10000;

/// All stacks get execute permission
pub const MH_ALLOW_STACK_EXECUTION: u32 = 0x20000;

/// Loaded at a random address
pub const MH_PIE: u32 = 0x200000;

/// Heap is not executable
pub const MH_NO_HEAP_EXECUTION: u32 = 0x1000000;

/// Contains an __objc_* or __swift section with app-extension-safe content
pub const MH_APP_EXTENSION_SAFE: u32 = 0x2000000;

/// Part of the dyld shared cache
pub const MH_DYLIB_IN_CACHE: u32 = 0x80000000;

// =============================================================================
// Load Command Tags
// =============================================================================

/// Set on tags the dynamic linker must understand to load the image
pub const LC_REQ_DYLD: u32 = 0x80000000;

/// Segment of this file to be mapped (32-bit)
pub const LC_SEGMENT: u32 = 0x1;
/// Link-edit stab symbol table info
pub const LC_SYMTAB: u32 = 0x2;
/// Link-edit gdb symbol table info (obsolete)
pub const LC_SYMSEG: u32 = 0x3;
/// Thread
pub const LC_THREAD: u32 = 0x4;
/// Unix thread (includes a stack)
pub const LC_UNIXTHREAD: u32 = 0x5;
/// Load a specified fixed VM shared library (obsolete)
pub const LC_LOADFVMLIB: u32 = 0x6;
/// Fixed VM shared library identification (obsolete)
pub const LC_IDFVMLIB: u32 = 0x7;
/// Object identification info (obsolete)
pub const LC_IDENT: u32 = 0x8;
/// Fixed VM file inclusion (internal use)
pub const LC_FVMFILE: u32 = 0x9;
/// Prepage command (internal use)
pub const LC_PREPAGE: u32 = 0xa;
/// Dynamic link-edit symbol table info
pub const LC_DYSYMTAB: u32 = 0xb;
/// Load a dynamically linked shared library
pub const LC_LOAD_DYLIB: u32 = 0xc;
/// Dynamically linked shared library identification
pub const LC_ID_DYLIB: u32 = 0xd;
/// Load a dynamic linker
pub const LC_LOAD_DYLINKER: u32 = 0xe;
/// Dynamic linker identification
pub const LC_ID_DYLINKER: u32 = 0xf;
/// Modules prebound for a dynamically linked shared library
pub const LC_PREBOUND_DYLIB: u32 = 0x10;
/// Image routines (32-bit)
pub const LC_ROUTINES: u32 = 0x11;
/// Sub framework
pub const LC_SUB_FRAMEWORK: u32 = 0x12;
/// Sub umbrella
pub const LC_SUB_UMBRELLA: u32 = 0x13;
/// Sub client
pub const LC_SUB_CLIENT: u32 = 0x14;
/// Sub library
pub const LC_SUB_LIBRARY: u32 = 0x15;
/// Two-level namespace lookup hints
pub const LC_TWOLEVEL_HINTS: u32 = 0x16;
/// Prebind checksum
pub const LC_PREBIND_CKSUM: u32 = 0x17;
/// Load a dynamically linked shared library, allowing it to be missing
pub const LC_LOAD_WEAK_DYLIB: u32 = 0x18 | LC_REQ_DYLD;
/// Segment of this file to be mapped (64-bit)
pub const LC_SEGMENT_64: u32 = 0x19;
/// Image routines (64-bit)
pub const LC_ROUTINES_64: u32 = 0x1a;
/// The image's unique identifier
pub const LC_UUID: u32 = 0x1b;
/// Runpath addition
pub const LC_RPATH: u32 = 0x1c | LC_REQ_DYLD;
/// Location of the code signature
pub const LC_CODE_SIGNATURE: u32 = 0x1d;
/// Location of info to split segments
pub const LC_SEGMENT_SPLIT_INFO: u32 = 0x1e;
/// Load and re-export a dylib
pub const LC_REEXPORT_DYLIB: u32 = 0x1f | LC_REQ_DYLD;
/// Delay load of a dylib until first use
pub const LC_LAZY_LOAD_DYLIB: u32 = 0x20;
/// Encrypted segment information (32-bit)
pub const LC_ENCRYPTION_INFO: u32 = 0x21;
/// Compressed dyld information
pub const LC_DYLD_INFO: u32 = 0x22;
/// Compressed dyld information only
pub const LC_DYLD_INFO_ONLY: u32 = 0x22 | LC_REQ_DYLD;
/// Load an upward dylib
pub const LC_LOAD_UPWARD_DYLIB: u32 = 0x23 | LC_REQ_DYLD;
/// Build for macOS min OS version
pub const LC_VERSION_MIN_MACOSX: u32 = 0x24;
/// Build for iOS min OS version
pub const LC_VERSION_MIN_IPHONEOS: u32 = 0x25;
/// Compressed table of function start addresses
pub const LC_FUNCTION_STARTS: u32 = 0x26;
/// String for dyld to treat like an environment variable
pub const LC_DYLD_ENVIRONMENT: u32 = 0x27;
/// Replacement for LC_UNIXTHREAD
pub const LC_MAIN: u32 = 0x28 | LC_REQ_DYLD;
/// Table of non-instructions in __text
pub const LC_DATA_IN_CODE: u32 = 0x29;
/// Source version used to build the binary
pub const LC_SOURCE_VERSION: u32 = 0x2a;
/// Code signing DRs copied from linked dylibs
pub const LC_DYLIB_CODE_SIGN_DRS: u32 = 0x2b;
/// Encrypted segment information (64-bit)
pub const LC_ENCRYPTION_INFO_64: u32 = 0x2c;
/// Linker options in MH_OBJECT files
pub const LC_LINKER_OPTION: u32 = 0x2d;
/// Optimization hints in MH_OBJECT files
pub const LC_LINKER_OPTIMIZATION_HINT: u32 = 0x2e;
/// Build for tvOS min OS version
pub const LC_VERSION_MIN_TVOS: u32 = 0x2f;
/// Build for watchOS min OS version
pub const LC_VERSION_MIN_WATCHOS: u32 = 0x30;
/// Arbitrary data included within a Mach-O file
pub const LC_NOTE: u32 = 0x31;
/// Build for platform min OS version
pub const LC_BUILD_VERSION: u32 = 0x32;
/// Used with a linkedit data command, payload is a trie
pub const LC_DYLD_EXPORTS_TRIE: u32 = 0x33 | LC_REQ_DYLD;
/// Used with a linkedit data command
pub const LC_DYLD_CHAINED_FIXUPS: u32 = 0x34 | LC_REQ_DYLD;
/// Used with a fileset entry command
pub const LC_FILESET_ENTRY: u32 = 0x35 | LC_REQ_DYLD;
/// Used with a linkedit data command
pub const LC_ATOM_INFO: u32 = 0x36;

/// Return the constant name of a load command tag, or `"LC_UNKNOWN"`.
pub fn cmd_to_str(cmd: u32) -> &'static str {
    match cmd {
        LC_SEGMENT => "LC_SEGMENT",
        LC_SYMTAB => "LC_SYMTAB",
        LC_SYMSEG => "LC_SYMSEG",
        LC_THREAD => "LC_THREAD",
        LC_UNIXTHREAD => "LC_UNIXTHREAD",
        LC_LOADFVMLIB => "LC_LOADFVMLIB",
        LC_IDFVMLIB => "LC_IDFVMLIB",
        LC_IDENT => "LC_IDENT",
        LC_FVMFILE => "LC_FVMFILE",
        LC_PREPAGE => "LC_PREPAGE",
        LC_DYSYMTAB => "LC_DYSYMTAB",
        LC_LOAD_DYLIB => "LC_LOAD_DYLIB",
        LC_ID_DYLIB => "LC_ID_DYLIB",
        LC_LOAD_DYLINKER => "LC_LOAD_DYLINKER",
        LC_ID_DYLINKER => "LC_ID_DYLINKER",
        LC_PREBOUND_DYLIB => "LC_PREBOUND_DYLIB",
        LC_ROUTINES => "LC_ROUTINES",
        LC_SUB_FRAMEWORK => "LC_SUB_FRAMEWORK",
        LC_SUB_UMBRELLA => "LC_SUB_UMBRELLA",
        LC_SUB_CLIENT => "LC_SUB_CLIENT",
        LC_SUB_LIBRARY => "LC_SUB_LIBRARY",
        LC_TWOLEVEL_HINTS => "LC_TWOLEVEL_HINTS",
        LC_PREBIND_CKSUM => "LC_PREBIND_CKSUM",
        LC_LOAD_WEAK_DYLIB => "LC_LOAD_WEAK_DYLIB",
        LC_SEGMENT_64 => "LC_SEGMENT_64",
        LC_ROUTINES_64 => "LC_ROUTINES_64",
        LC_UUID => "LC_UUID",
        LC_RPATH => "LC_RPATH",
        LC_CODE_SIGNATURE => "LC_CODE_SIGNATURE",
        LC_SEGMENT_SPLIT_INFO => "LC_SEGMENT_SPLIT_INFO",
        LC_REEXPORT_DYLIB => "LC_REEXPORT_DYLIB",
        LC_LAZY_LOAD_DYLIB => "LC_LAZY_LOAD_DYLIB",
        LC_ENCRYPTION_INFO => "LC_ENCRYPTION_INFO",
        LC_DYLD_INFO => "LC_DYLD_INFO",
        LC_DYLD_INFO_ONLY => "LC_DYLD_INFO_ONLY",
        LC_LOAD_UPWARD_DYLIB => "LC_LOAD_UPWARD_DYLIB",
        LC_VERSION_MIN_MACOSX => "LC_VERSION_MIN_MACOSX",
        LC_VERSION_MIN_IPHONEOS => "LC_VERSION_MIN_IPHONEOS",
        LC_FUNCTION_STARTS => "LC_FUNCTION_STARTS",
        LC_DYLD_ENVIRONMENT => "LC_DYLD_ENVIRONMENT",
        LC_MAIN => "LC_MAIN",
        LC_DATA_IN_CODE => "LC_DATA_IN_CODE",
        LC_SOURCE_VERSION => "LC_SOURCE_VERSION",
        LC_DYLIB_CODE_SIGN_DRS => "LC_DYLIB_CODE_SIGN_DRS",
        LC_ENCRYPTION_INFO_64 => "LC_ENCRYPTION_INFO_64",
        LC_LINKER_OPTION => "LC_LINKER_OPTION",
        LC_LINKER_OPTIMIZATION_HINT => "LC_LINKER_OPTIMIZATION_HINT",
        LC_VERSION_MIN_TVOS => "LC_VERSION_MIN_TVOS",
        LC_VERSION_MIN_WATCHOS => "LC_VERSION_MIN_WATCHOS",
        LC_NOTE => "LC_NOTE",
        LC_BUILD_VERSION => "LC_BUILD_VERSION",
        LC_DYLD_EXPORTS_TRIE => "LC_DYLD_EXPORTS_TRIE",
        LC_DYLD_CHAINED_FIXUPS => "LC_DYLD_CHAINED_FIXUPS",
        LC_FILESET_ENTRY => "LC_FILESET_ENTRY",
        LC_ATOM_INFO => "LC_ATOM_INFO",
        _ => "LC_UNKNOWN",
    }
}

// =============================================================================
// Virtual Memory Protection
// =============================================================================

/// No access
pub const VM_PROT_NONE: u32 = 0x0;

/// Read permission
pub const VM_PROT_READ: u32 = 0x1;

/// Write permission
pub const VM_PROT_WRITE: u32 = 0x2;

/// Execute permission
pub const VM_PROT_EXECUTE: u32 = 0x4;

// =============================================================================
// Segment Flags
// =============================================================================

/// Contents are for the high part of the VM space
pub const SG_HIGHVM: u32 = 0x1;

/// VM allocated by a fixed VM library, for overlap checking
pub const SG_FVMLIB: u32 = 0x2;

/// Nothing was relocated in or to this segment
pub const SG_NORELOC: u32 = 0x4;

/// Segment is protected; if it starts at file offset 0 the first page is not
pub const SG_PROTECTED_VERSION_1: u32 = 0x8;

/// Segment is made read-only after fixups
pub const SG_READ_ONLY: u32 = 0x10;

// =============================================================================
// Section Types (low byte of flags)
// =============================================================================

/// Mask selecting the section type
pub const SECTION_TYPE: u32 = 0x000000ff;

/// Mask selecting the section attributes
pub const SECTION_ATTRIBUTES: u32 = 0xffffff00;

/// Regular section
pub const S_REGULAR: u32 = 0x0;
/// Zero fill on demand
pub const S_ZEROFILL: u32 = 0x1;
/// Only literal C strings
pub const S_CSTRING_LITERALS: u32 = 0x2;
/// Only 4-byte literals
pub const S_4BYTE_LITERALS: u32 = 0x3;
/// Only 8-byte literals
pub const S_8BYTE_LITERALS: u32 = 0x4;
/// Only pointers to literals
pub const S_LITERAL_POINTERS: u32 = 0x5;
/// Only non-lazy symbol pointers
pub const S_NON_LAZY_SYMBOL_POINTERS: u32 = 0x6;
/// Only lazy symbol pointers
pub const S_LAZY_SYMBOL_POINTERS: u32 = 0x7;
/// Only symbol stubs
pub const S_SYMBOL_STUBS: u32 = 0x8;
/// Only function pointers for initialization
pub const S_MOD_INIT_FUNC_POINTERS: u32 = 0x9;
/// Only function pointers for termination
pub const S_MOD_TERM_FUNC_POINTERS: u32 = 0xa;
/// Only symbols that are to be coalesced
pub const S_COALESCED: u32 = 0xb;
/// Zero fill on demand, may exceed 4GB
pub const S_GB_ZEROFILL: u32 = 0xc;
/// Only pairs of function pointers for interposing
pub const S_INTERPOSING: u32 = 0xd;
/// Only 16-byte literals
pub const S_16BYTE_LITERALS: u32 = 0xe;
/// DTrace object format
pub const S_DTRACE_DOF: u32 = 0xf;
/// Only lazy symbol pointers to lazy loaded dylibs
pub const S_LAZY_DYLIB_SYMBOL_POINTERS: u32 = 0x10;
/// Template of initial values for thread-local variables
pub const S_THREAD_LOCAL_REGULAR: u32 = 0x11;
/// Zero fill template of initial values for thread-local variables
pub const S_THREAD_LOCAL_ZEROFILL: u32 = 0x12;
/// Thread-local variable descriptors
pub const S_THREAD_LOCAL_VARIABLES: u32 = 0x13;
/// Pointers to thread-local variable descriptors
pub const S_THREAD_LOCAL_VARIABLE_POINTERS: u32 = 0x14;
/// Functions to call to initialize thread-local values
pub const S_THREAD_LOCAL_INIT_FUNCTION_POINTERS: u32 = 0x15;
/// 32-bit offsets to initializers
pub const S_INIT_FUNC_OFFSETS: u32 = 0x16;

// =============================================================================
// Section Attributes
// =============================================================================

/// Only true machine instructions
pub const S_ATTR_PURE_INSTRUCTIONS: u32 = 0x80000000;
/// Coalesced symbols that are not to be in a ranlib table of contents
pub const S_ATTR_NO_TOC: u32 = 0x40000000;
/// Ok to strip static symbols in this section
pub const S_ATTR_STRIP_STATIC_SYMS: u32 = 0x20000000;
/// No dead stripping
pub const S_ATTR_NO_DEAD_STRIP: u32 = 0x10000000;
/// Blocks are live if they reference live blocks
pub const S_ATTR_LIVE_SUPPORT: u32 = 0x08000000;
/// Used with i386 code stubs written on by dyld
pub const S_ATTR_SELF_MODIFYING_CODE: u32 = 0x04000000;
/// A debug section
pub const S_ATTR_DEBUG: u32 = 0x02000000;
/// Section contains some machine instructions
pub const S_ATTR_SOME_INSTRUCTIONS: u32 = 0x00000400;
/// Section has external relocation entries
pub const S_ATTR_EXT_RELOC: u32 = 0x00000200;
/// Section has local relocation entries
pub const S_ATTR_LOC_RELOC: u32 = 0x00000100;

// =============================================================================
// Platforms and Build Tools (LC_BUILD_VERSION)
// =============================================================================

/// macOS
pub const PLATFORM_MACOS: u32 = 1;
/// iOS
pub const PLATFORM_IOS: u32 = 2;
/// tvOS
pub const PLATFORM_TVOS: u32 = 3;
/// watchOS
pub const PLATFORM_WATCHOS: u32 = 4;
/// bridgeOS
pub const PLATFORM_BRIDGEOS: u32 = 5;
/// Mac Catalyst
pub const PLATFORM_MACCATALYST: u32 = 6;
/// iOS simulator
pub const PLATFORM_IOSSIMULATOR: u32 = 7;
/// tvOS simulator
pub const PLATFORM_TVOSSIMULATOR: u32 = 8;
/// watchOS simulator
pub const PLATFORM_WATCHOSSIMULATOR: u32 = 9;
/// DriverKit
pub const PLATFORM_DRIVERKIT: u32 = 10;
/// visionOS
pub const PLATFORM_XROS: u32 = 11;
/// visionOS simulator
pub const PLATFORM_XROS_SIMULATOR: u32 = 12;

/// clang
pub const TOOL_CLANG: u32 = 1;
/// swift
pub const TOOL_SWIFT: u32 = 2;
/// ld
pub const TOOL_LD: u32 = 3;
/// ld-prime
pub const TOOL_LD_PRIME: u32 = 4;

// =============================================================================
// Dyld Rebase Opcodes (documented only; streams are not decoded)
// =============================================================================

pub const REBASE_TYPE_POINTER: u8 = 1;
pub const REBASE_TYPE_TEXT_ABSOLUTE32: u8 = 2;
pub const REBASE_TYPE_TEXT_PCREL32: u8 = 3;

pub const REBASE_OPCODE_MASK: u8 = 0xf0;
pub const REBASE_IMMEDIATE_MASK: u8 = 0x0f;
pub const REBASE_OPCODE_DONE: u8 = 0x00;
pub const REBASE_OPCODE_SET_TYPE_IMM: u8 = 0x10;
pub const REBASE_OPCODE_SET_SEGMENT_AND_OFFSET_ULEB: u8 = 0x20;
pub const REBASE_OPCODE_ADD_ADDR_ULEB: u8 = 0x30;
pub const REBASE_OPCODE_ADD_ADDR_IMM_SCALED: u8 = 0x40;
pub const REBASE_OPCODE_DO_REBASE_IMM_TIMES: u8 = 0x50;
pub const REBASE_OPCODE_DO_REBASE_ULEB_TIMES: u8 = 0x60;
pub const REBASE_OPCODE_DO_REBASE_ADD_ADDR_ULEB: u8 = 0x70;
pub const REBASE_OPCODE_DO_REBASE_ULEB_TIMES_SKIPPING_ULEB: u8 = 0x80;

// =============================================================================
// Dyld Bind Opcodes (documented only; streams are not decoded)
// =============================================================================

pub const BIND_TYPE_POINTER: u8 = 1;
pub const BIND_TYPE_TEXT_ABSOLUTE32: u8 = 2;
pub const BIND_TYPE_TEXT_PCREL32: u8 = 3;

pub const BIND_SPECIAL_DYLIB_SELF: i8 = 0;
pub const BIND_SPECIAL_DYLIB_MAIN_EXECUTABLE: i8 = -1;
pub const BIND_SPECIAL_DYLIB_FLAT_LOOKUP: i8 = -2;
pub const BIND_SPECIAL_DYLIB_WEAK_LOOKUP: i8 = -3;

pub const BIND_SYMBOL_FLAGS_WEAK_IMPORT: u8 = 0x1;
pub const BIND_SYMBOL_FLAGS_NON_WEAK_DEFINITION: u8 = 0x8;

pub const BIND_OPCODE_MASK: u8 = 0xf0;
pub const BIND_IMMEDIATE_MASK: u8 = 0x0f;
pub const BIND_OPCODE_DONE: u8 = 0x00;
pub const BIND_OPCODE_SET_DYLIB_ORDINAL_IMM: u8 = 0x10;
pub const BIND_OPCODE_SET_DYLIB_ORDINAL_ULEB: u8 = 0x20;
pub const BIND_OPCODE_SET_DYLIB_SPECIAL_IMM: u8 = 0x30;
pub const BIND_OPCODE_SET_SYMBOL_TRAILING_FLAGS_IMM: u8 = 0x40;
pub const BIND_OPCODE_SET_TYPE_IMM: u8 = 0x50;
pub const BIND_OPCODE_SET_ADDEND_SLEB: u8 = 0x60;
pub const BIND_OPCODE_SET_SEGMENT_AND_OFFSET_ULEB: u8 = 0x70;
pub const BIND_OPCODE_ADD_ADDR_ULEB: u8 = 0x80;
pub const BIND_OPCODE_DO_BIND: u8 = 0x90;
pub const BIND_OPCODE_DO_BIND_ADD_ADDR_ULEB: u8 = 0xa0;
pub const BIND_OPCODE_DO_BIND_ADD_ADDR_IMM_SCALED: u8 = 0xb0;
pub const BIND_OPCODE_DO_BIND_ULEB_TIMES_SKIPPING_ULEB: u8 = 0xc0;
pub const BIND_OPCODE_THREADED: u8 = 0xd0;

// =============================================================================
// Export Symbol Flags (documented only; the trie is not decoded)
// =============================================================================

pub const EXPORT_SYMBOL_FLAGS_KIND_MASK: u64 = 0x03;
pub const EXPORT_SYMBOL_FLAGS_KIND_REGULAR: u64 = 0x00;
pub const EXPORT_SYMBOL_FLAGS_KIND_THREAD_LOCAL: u64 = 0x01;
pub const EXPORT_SYMBOL_FLAGS_KIND_ABSOLUTE: u64 = 0x02;
pub const EXPORT_SYMBOL_FLAGS_WEAK_DEFINITION: u64 = 0x04;
pub const EXPORT_SYMBOL_FLAGS_REEXPORT: u64 = 0x08;
pub const EXPORT_SYMBOL_FLAGS_STUB_AND_RESOLVER: u64 = 0x10;

// =============================================================================
// Code Signing Blob Magic Numbers (LC_CODE_SIGNATURE payload)
// =============================================================================

/// SuperBlob containing all signature components (embedded signature)
pub const CSMAGIC_EMBEDDED_SIGNATURE: u32 = 0xfade0cc0;

/// CodeDirectory blob magic
pub const CSMAGIC_CODEDIRECTORY: u32 = 0xfade0c02;

/// Requirements blob magic
pub const CSMAGIC_REQUIREMENTS: u32 = 0xfade0c01;

/// Embedded entitlements (XML plist format)
pub const CSMAGIC_EMBEDDED_ENTITLEMENTS: u32 = 0xfade7171;

/// Embedded DER entitlements (ASN.1 DER format)
pub const CSMAGIC_EMBEDDED_DER_ENTITLEMENTS: u32 = 0xfade7172;

/// CMS signature wrapper blob
pub const CSMAGIC_BLOBWRAPPER: u32 = 0xfade0b01;
