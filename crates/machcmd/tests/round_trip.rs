//! Byte-exact round trips of individual load commands.

use machcmd::commands::{
    fixed_name, DylibCommand, Empty, Record, Section64, SectionFields, Segment64,
    SegmentCommand64,
};
use machcmd::constants::*;
use machcmd::{Error, LoadCommand, ReadOptions};

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_name(out: &mut Vec<u8>, name: &[u8]) {
    out.extend_from_slice(&fixed_name(name));
}

/// `LC_SEGMENT_64` for `__TEXT` with a single `__text` section.
fn text_segment_bytes() -> Vec<u8> {
    let mut out = Vec::new();
    put_u32(&mut out, LC_SEGMENT_64);
    put_u32(&mut out, 152);
    put_name(&mut out, b"__TEXT");
    put_u64(&mut out, 0x1_0000_0000);
    put_u64(&mut out, 0x48000);
    put_u64(&mut out, 0);
    put_u64(&mut out, 0x48000);
    put_u32(&mut out, 7);
    put_u32(&mut out, 5);
    put_u32(&mut out, 1);
    put_u32(&mut out, 0);

    put_name(&mut out, b"__text");
    put_name(&mut out, b"__TEXT");
    put_u64(&mut out, 0x1_0000_0400);
    put_u64(&mut out, 448);
    put_u32(&mut out, 0x4000);
    put_u32(&mut out, 2);
    put_u32(&mut out, 0);
    put_u32(&mut out, 0);
    put_u32(&mut out, S_REGULAR | S_ATTR_PURE_INSTRUCTIONS | S_ATTR_SOME_INSTRUCTIONS);
    put_u32(&mut out, 0);
    put_u32(&mut out, 0);
    put_u32(&mut out, 0);
    assert_eq!(out.len(), 152);
    out
}

#[test]
fn test_text_segment_reads_and_writes_back() {
    let bytes = text_segment_bytes();
    let mut source = bytes.as_slice();
    let command = LoadCommand::read(&mut source).unwrap();
    assert!(source.is_empty());

    let segment = match &command {
        LoadCommand::Segment64(segment) => segment,
        other => panic!("expected a 64-bit segment, got {other:?}"),
    };
    assert_eq!(segment.cmdsize(), 152);
    assert_eq!(segment.name(), b"__TEXT");
    assert_eq!(segment.fields().vmaddr, 0x1_0000_0000);
    assert_eq!(segment.fields().maxprot, VM_PROT_READ | VM_PROT_WRITE | VM_PROT_EXECUTE);
    assert_eq!(segment.fields().initprot, VM_PROT_READ | VM_PROT_EXECUTE);
    assert_eq!(segment.sections().len(), 1);

    let text = segment.section(b"__text").unwrap();
    assert_eq!(text.segment_name(), b"__TEXT");
    assert_eq!(text.addr, 0x1_0000_0400);
    assert_eq!(text.size, 448);
    assert_eq!(text.offset, 0x4000);
    assert_eq!(text.align, 2);
    assert_eq!(text.flags & SECTION_TYPE, S_REGULAR);

    assert_eq!(command.to_bytes().unwrap(), bytes);
}

#[test]
fn test_text_segment_built_from_fields_matches() {
    let fields = SegmentCommand64 {
        segname: fixed_name(b"__TEXT"),
        vmaddr: 0x1_0000_0000,
        vmsize: 0x48000,
        fileoff: 0,
        filesize: 0x48000,
        maxprot: 7,
        initprot: 5,
        nsects: 0,
        flags: 0,
    };
    let section = Section64 {
        sectname: fixed_name(b"__text"),
        segname: fixed_name(b"__TEXT"),
        addr: 0x1_0000_0400,
        size: 448,
        offset: 0x4000,
        align: 2,
        flags: S_REGULAR | S_ATTR_PURE_INSTRUCTIONS | S_ATTR_SOME_INSTRUCTIONS,
        ..Default::default()
    };
    let command = LoadCommand::Segment64(Segment64::new(fields, vec![section]).unwrap());
    assert_eq!(command.cmdsize(), 152);
    assert_eq!(command.to_bytes().unwrap(), text_segment_bytes());
}

#[test]
fn test_load_dylib_usr_is_32_bytes() {
    let command = LoadCommand::dylib(LC_LOAD_DYLIB, "/usr", 2, 0x0501_0000, 0x0001_0000).unwrap();
    let bytes = command.to_bytes().unwrap();

    let mut expected = Vec::new();
    put_u32(&mut expected, LC_LOAD_DYLIB);
    put_u32(&mut expected, 32);
    put_u32(&mut expected, 24);
    put_u32(&mut expected, 2);
    put_u32(&mut expected, 0x0501_0000);
    put_u32(&mut expected, 0x0001_0000);
    expected.extend_from_slice(b"/usr\0\0\0\0");
    assert_eq!(bytes, expected);

    let reread = LoadCommand::read(&mut bytes.as_slice()).unwrap();
    assert!(reread.structurally_eq(&command));
    assert_eq!(reread.dylib_path(), Some(&b"/usr"[..]));
}

#[test]
fn test_unknown_tag_round_trips_opaquely() {
    let mut bytes = Vec::new();
    put_u32(&mut bytes, 0x7fff_0001);
    put_u32(&mut bytes, 20);
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef, 1, 2, 3, 4, 5, 6, 7, 8]);

    let command = LoadCommand::read(&mut bytes.as_slice()).unwrap();
    assert!(command.is_unknown());
    assert_eq!(command.cmd(), 0x7fff_0001);
    match &command {
        LoadCommand::Unknown(record) => assert_eq!(record.tail().len(), 12),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(command.to_bytes().unwrap(), bytes);
}

#[test]
fn test_obsolete_tags_keep_their_layouts() {
    let cases: &[(u32, usize, fn(&LoadCommand) -> bool)] = &[
        (LC_SYMSEG, 8, |c| matches!(c, LoadCommand::Symseg(r) if r.fields().size == 0x0909_0909)),
        (LC_LOADFVMLIB, 12, |c| matches!(c, LoadCommand::LoadFvmlib(_))),
        (LC_IDFVMLIB, 12, |c| matches!(c, LoadCommand::IdFvmlib(_))),
        (LC_IDENT, 0, |c| matches!(c, LoadCommand::Ident(r) if r.tail().len() == 8)),
        (LC_FVMFILE, 8, |c| matches!(c, LoadCommand::Fvmfile(r) if r.fields().header_addr == 0x0909_0909)),
        (LC_PREPAGE, 0, |c| matches!(c, LoadCommand::Prepage(_))),
    ];
    for &(cmd, _, expected) in cases {
        let mut bytes = Vec::new();
        put_u32(&mut bytes, cmd);
        put_u32(&mut bytes, 16);
        bytes.extend_from_slice(&[9; 8]);

        let command = LoadCommand::read(&mut bytes.as_slice()).unwrap();
        assert!(!command.is_unknown(), "{}", cmd_to_str(cmd));
        assert!(expected(&command), "{}: {command:?}", cmd_to_str(cmd));
        assert_eq!(command.to_bytes().unwrap(), bytes);
    }
}

#[test]
fn test_equality_is_tag_sensitive() {
    let fields = DylibCommand {
        name_offset: 24,
        timestamp: 2,
        current_version: 0,
        compatibility_version: 0,
    };
    let load = Record::with_string(LC_LOAD_DYLIB, fields, b"/usr").unwrap();
    let weak = Record::with_string(LC_LOAD_WEAK_DYLIB, fields, b"/usr").unwrap();

    let load = LoadCommand::Dylib(load);
    let weak = LoadCommand::Dylib(weak);
    assert!(!load.structurally_eq(&weak));
    assert!(load.structurally_eq(&load.clone()));

    let unknown = LoadCommand::Unknown(Record::new(LC_LOAD_DYLIB, Empty, load.to_bytes().unwrap()[8..].to_vec()).unwrap());
    assert_eq!(unknown.to_bytes().unwrap(), load.to_bytes().unwrap());
    assert!(!unknown.structurally_eq(&load));
}

#[test]
fn test_trailing_bytes_after_fixed_fields_survive() {
    let mut bytes = Vec::new();
    put_u32(&mut bytes, LC_UUID);
    put_u32(&mut bytes, 32);
    bytes.extend_from_slice(&[0x42; 16]);
    bytes.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);

    let command = LoadCommand::read(&mut bytes.as_slice()).unwrap();
    assert!(matches!(command, LoadCommand::Uuid(_)));
    assert_eq!(command.to_bytes().unwrap(), bytes);
}

#[test]
fn test_segment_surplus_survives() {
    let mut bytes = text_segment_bytes();
    bytes[4..8].copy_from_slice(&160u32.to_le_bytes());
    bytes.extend_from_slice(&[0xab; 8]);

    let command = LoadCommand::read(&mut bytes.as_slice()).unwrap();
    match &command {
        LoadCommand::Segment64(segment) => assert_eq!(segment.surplus(), &[0xab; 8]),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(command.to_bytes().unwrap(), bytes);
}

#[test]
fn test_segment_with_too_many_sections_is_rejected() {
    let mut bytes = text_segment_bytes();
    // nsects = 2, but only one section fits in cmdsize 152.
    bytes[64..68].copy_from_slice(&2u32.to_le_bytes());
    assert!(matches!(
        LoadCommand::read(&mut bytes.as_slice()),
        Err(Error::InvalidRecordSize {
            cmdsize: 152,
            minimum: 232,
            ..
        })
    ));
}

#[test]
fn test_truncated_streams_yield_nothing() {
    let bytes = text_segment_bytes();
    for len in [0, 4, 7, 8, 72, 151] {
        assert!(
            matches!(
                LoadCommand::read(&mut &bytes[..len]),
                Err(Error::TruncatedStream)
            ),
            "length {len}"
        );
    }
}

#[test]
fn test_strict_mode_rejects_unpadded_records() {
    let mut bytes = Vec::new();
    put_u32(&mut bytes, LC_RPATH);
    put_u32(&mut bytes, 20);
    put_u32(&mut bytes, 12);
    bytes.extend_from_slice(b"/usr\0\0\0\0");

    assert!(LoadCommand::read(&mut bytes.as_slice()).is_ok());
    let strict = ReadOptions::new().strict_alignment(true);
    assert!(matches!(
        LoadCommand::read_with(&mut bytes.as_slice(), &strict),
        Err(Error::MisalignedRecord {
            cmd: LC_RPATH,
            cmdsize: 20,
            alignment: 8
        })
    ));
}

/// Every dispatched tag with the size of its fixed fields and the
/// alternative it must decode into.
const DISPATCH: &[(u32, usize, fn(&LoadCommand) -> bool)] = &[
    (LC_SEGMENT, 48, |c| matches!(c, LoadCommand::Segment32(_))),
    (LC_SEGMENT_64, 64, |c| matches!(c, LoadCommand::Segment64(_))),
    (LC_SYMTAB, 16, |c| matches!(c, LoadCommand::Symtab(_))),
    (LC_DYSYMTAB, 72, |c| matches!(c, LoadCommand::Dysymtab(_))),
    (LC_THREAD, 0, |c| matches!(c, LoadCommand::Thread(_))),
    (LC_UNIXTHREAD, 0, |c| matches!(c, LoadCommand::Thread(_))),
    (LC_LOAD_DYLIB, 16, |c| matches!(c, LoadCommand::Dylib(_))),
    (LC_LOAD_WEAK_DYLIB, 16, |c| matches!(c, LoadCommand::Dylib(_))),
    (LC_REEXPORT_DYLIB, 16, |c| matches!(c, LoadCommand::Dylib(_))),
    (LC_LAZY_LOAD_DYLIB, 16, |c| matches!(c, LoadCommand::Dylib(_))),
    (LC_LOAD_UPWARD_DYLIB, 16, |c| matches!(c, LoadCommand::Dylib(_))),
    (LC_ID_DYLIB, 16, |c| matches!(c, LoadCommand::IdDylib(_))),
    (LC_LOAD_DYLINKER, 4, |c| matches!(c, LoadCommand::LoadDylinker(_))),
    (LC_ID_DYLINKER, 4, |c| matches!(c, LoadCommand::IdDylinker(_))),
    (LC_DYLD_ENVIRONMENT, 4, |c| matches!(c, LoadCommand::DyldEnvironment(_))),
    (LC_PREBOUND_DYLIB, 12, |c| matches!(c, LoadCommand::PreboundDylib(_))),
    (LC_ROUTINES, 32, |c| matches!(c, LoadCommand::Routines32(_))),
    (LC_ROUTINES_64, 64, |c| matches!(c, LoadCommand::Routines64(_))),
    (LC_SUB_FRAMEWORK, 4, |c| matches!(c, LoadCommand::SubFramework(_))),
    (LC_SUB_UMBRELLA, 4, |c| matches!(c, LoadCommand::SubUmbrella(_))),
    (LC_SUB_CLIENT, 4, |c| matches!(c, LoadCommand::SubClient(_))),
    (LC_SUB_LIBRARY, 4, |c| matches!(c, LoadCommand::SubLibrary(_))),
    (LC_TWOLEVEL_HINTS, 8, |c| matches!(c, LoadCommand::TwolevelHints(_))),
    (LC_PREBIND_CKSUM, 4, |c| matches!(c, LoadCommand::PrebindCksum(_))),
    (LC_UUID, 16, |c| matches!(c, LoadCommand::Uuid(_))),
    (LC_RPATH, 4, |c| matches!(c, LoadCommand::Rpath(_))),
    (LC_CODE_SIGNATURE, 8, |c| matches!(c, LoadCommand::LinkeditData(_))),
    (LC_SEGMENT_SPLIT_INFO, 8, |c| matches!(c, LoadCommand::LinkeditData(_))),
    (LC_FUNCTION_STARTS, 8, |c| matches!(c, LoadCommand::LinkeditData(_))),
    (LC_DATA_IN_CODE, 8, |c| matches!(c, LoadCommand::LinkeditData(_))),
    (LC_DYLIB_CODE_SIGN_DRS, 8, |c| matches!(c, LoadCommand::LinkeditData(_))),
    (LC_LINKER_OPTIMIZATION_HINT, 8, |c| matches!(c, LoadCommand::LinkeditData(_))),
    (LC_DYLD_EXPORTS_TRIE, 8, |c| matches!(c, LoadCommand::LinkeditData(_))),
    (LC_DYLD_CHAINED_FIXUPS, 8, |c| matches!(c, LoadCommand::LinkeditData(_))),
    (LC_ATOM_INFO, 8, |c| matches!(c, LoadCommand::LinkeditData(_))),
    (LC_ENCRYPTION_INFO, 12, |c| matches!(c, LoadCommand::EncryptionInfo32(_))),
    (LC_ENCRYPTION_INFO_64, 16, |c| matches!(c, LoadCommand::EncryptionInfo64(_))),
    (LC_DYLD_INFO, 40, |c| matches!(c, LoadCommand::DyldInfo(_))),
    (LC_DYLD_INFO_ONLY, 40, |c| matches!(c, LoadCommand::DyldInfo(_))),
    (LC_VERSION_MIN_MACOSX, 8, |c| matches!(c, LoadCommand::VersionMin(_))),
    (LC_VERSION_MIN_IPHONEOS, 8, |c| matches!(c, LoadCommand::VersionMin(_))),
    (LC_VERSION_MIN_TVOS, 8, |c| matches!(c, LoadCommand::VersionMin(_))),
    (LC_VERSION_MIN_WATCHOS, 8, |c| matches!(c, LoadCommand::VersionMin(_))),
    (LC_MAIN, 16, |c| matches!(c, LoadCommand::EntryPoint(_))),
    (LC_SOURCE_VERSION, 8, |c| matches!(c, LoadCommand::SourceVersion(_))),
    (LC_LINKER_OPTION, 4, |c| matches!(c, LoadCommand::LinkerOption(_))),
    (LC_NOTE, 32, |c| matches!(c, LoadCommand::Note(_))),
    (LC_BUILD_VERSION, 16, |c| matches!(c, LoadCommand::BuildVersion(_))),
    (LC_FILESET_ENTRY, 24, |c| matches!(c, LoadCommand::FilesetEntry(_))),
    (LC_SYMSEG, 8, |c| matches!(c, LoadCommand::Symseg(_))),
    (LC_LOADFVMLIB, 12, |c| matches!(c, LoadCommand::LoadFvmlib(_))),
    (LC_IDFVMLIB, 12, |c| matches!(c, LoadCommand::IdFvmlib(_))),
    (LC_IDENT, 0, |c| matches!(c, LoadCommand::Ident(_))),
    (LC_FVMFILE, 8, |c| matches!(c, LoadCommand::Fvmfile(_))),
    (LC_PREPAGE, 0, |c| matches!(c, LoadCommand::Prepage(_))),
];

/// Byte offset of `nsects` within the fixed fields of a segment tag.
fn nsects_offset(cmd: u32) -> Option<usize> {
    match cmd {
        LC_SEGMENT => Some(40),
        LC_SEGMENT_64 => Some(56),
        _ => None,
    }
}

#[test]
fn test_every_dispatched_tag_round_trips() {
    for &(cmd, fixed, expected) in DISPATCH {
        let cmdsize = (8 + fixed + 8 + 7) & !7;
        let mut bytes = Vec::new();
        put_u32(&mut bytes, cmd);
        put_u32(&mut bytes, cmdsize as u32);
        bytes.extend((0..fixed).map(|i| (i as u8).wrapping_mul(13) | 1));
        if let Some(offset) = nsects_offset(cmd) {
            bytes[8 + offset..12 + offset].copy_from_slice(&0u32.to_le_bytes());
        }
        bytes.resize(cmdsize, 0);
        bytes[8 + fixed..8 + fixed + 4].copy_from_slice(b"tail");

        let command = LoadCommand::read(&mut bytes.as_slice()).unwrap();
        let name = cmd_to_str(cmd);
        assert!(expected(&command), "{name} decoded as {command:?}");
        assert!(!command.is_unknown(), "{name}");
        assert_eq!(command.cmd(), cmd, "{name}");
        assert_eq!(command.cmdsize() as usize, cmdsize, "{name}");
        assert_eq!(command.to_bytes().unwrap(), bytes, "{name}");

        // One byte short of the fixed fields is too small for any layout.
        if fixed > 0 {
            let mut short = bytes[..8 + fixed - 1].to_vec();
            short[4..8].copy_from_slice(&((8 + fixed - 1) as u32).to_le_bytes());
            assert!(
                matches!(
                    LoadCommand::read(&mut short.as_slice()),
                    Err(Error::InvalidRecordSize { .. })
                ),
                "{name}"
            );
        }
    }
}

/// xorshift64, so failures reproduce from the seed.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

#[test]
fn test_random_frames_reencode_identically() {
    let mut tags: Vec<u32> = DISPATCH.iter().map(|&(cmd, _, _)| cmd).collect();
    tags.extend([0x7fff_0001, 0x4242, LC_REQ_DYLD | 0x77]);

    let mut rng = Rng(0x9e37_79b9_7f4a_7c15);
    let mut accepted = 0;
    for round in 0..20_000 {
        let cmd = tags[rng.below(tags.len())];
        let cmdsize = 8 + rng.below(200);
        let mut bytes = Vec::with_capacity(cmdsize);
        put_u32(&mut bytes, cmd);
        put_u32(&mut bytes, cmdsize as u32);
        bytes.extend((8..cmdsize).map(|_| rng.next() as u8));
        if let Some(offset) = nsects_offset(cmd) {
            if bytes.len() >= 12 + offset {
                let nsects = rng.below(3) as u32;
                bytes[8 + offset..12 + offset].copy_from_slice(&nsects.to_le_bytes());
            }
        }

        if let Ok(command) = LoadCommand::read(&mut bytes.as_slice()) {
            accepted += 1;
            assert_eq!(command.cmd(), cmd, "round {round}");
            assert_eq!(command.cmdsize() as usize, cmdsize, "round {round}");
            assert_eq!(command.to_bytes().unwrap(), bytes, "round {round}");
        }
    }
    assert!(accepted > 10_000, "only {accepted} frames accepted");
}
