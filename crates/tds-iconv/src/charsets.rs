//! Canonical character set names, byte widths, and alias resolution.
//!
//! The canonical names are the ones GNU iconv documents; every other
//! spelling an operating system or a Sybase/Microsoft server might use is
//! mapped onto one canonical entry. Lookup is a case-insensitive exact
//! match.
//!
//! The canonical table is split in two tiers: charsets whose byte widths
//! have been verified, and charsets whose widths are provisional. Consumers
//! only read the widths, so both tiers resolve identically.

/// A canonical charset descriptor.
#[derive(Debug, PartialEq, Eq)]
pub struct CharsetInfo {
    /// Canonical (GNU iconv) name.
    pub name: &'static str,
    /// Minimum bytes per character.
    pub min_bytes_per_char: u8,
    /// Maximum bytes per character.
    pub max_bytes_per_char: u8,
}

const fn cs(name: &'static str, min: u8, max: u8) -> CharsetInfo {
    CharsetInfo {
        name,
        min_bytes_per_char: min,
        max_bytes_per_char: max,
    }
}

/// Charsets with verified byte widths.
pub static CANONIC_CHARSETS: &[CharsetInfo] = &[
    cs("ANSI_X3.4-1968", 1, 1),
    cs("UTF-8", 1, 4),
    cs("ISO-10646-UCS-2", 2, 2),
    cs("UCS-2BE", 2, 2),
    cs("UCS-2LE", 2, 2),
    cs("UCS-4BE", 4, 4),
    cs("UCS-4LE", 4, 4),
    cs("UTF-16", 2, 4),
    cs("UTF-16BE", 2, 4),
    cs("UTF-16LE", 2, 4),
    cs("UTF-32", 4, 4),
    cs("UTF-32BE", 4, 4),
    cs("UTF-32LE", 4, 4),
    cs("ISO-8859-1", 1, 1),
    cs("ISO-8859-2", 1, 1),
    cs("ISO-8859-3", 1, 1),
    cs("ISO-8859-4", 1, 1),
    cs("CYRILLIC", 1, 1),
    cs("ARABIC", 1, 1),
    cs("ECMA-118", 1, 1),
    cs("HEBREW", 1, 1),
    cs("ISO-8859-9", 1, 1),
    cs("ISO-8859-10", 1, 1),
    cs("ISO-8859-13", 1, 1),
    cs("ISO-8859-14", 1, 1),
    cs("ISO-8859-15", 1, 1),
    cs("ISO-8859-16", 1, 1),
    cs("KOI8-R", 1, 1),
    cs("KOI8-U", 1, 1),
    cs("CP1250", 1, 1),
    cs("CP1251", 1, 1),
    cs("CP1252", 1, 1),
    cs("CP1253", 1, 1),
    cs("CP1254", 1, 1),
    cs("CP1255", 1, 1),
    cs("CP1256", 1, 1),
    cs("CP1257", 1, 1),
    cs("CP1258", 1, 1),
    cs("850", 1, 1),
    cs("862", 1, 1),
    cs("866", 1, 1),
    cs("MAC", 1, 1),
    cs("MACCYRILLIC", 1, 1),
    cs("MACGREEK", 1, 1),
    cs("MACTURKISH", 1, 1),
    cs("HP-ROMAN8", 1, 1),
    cs("CP874", 1, 1),
];

/// Charsets carried past the verified tier; widths are as inherited, not
/// independently verified.
pub static PROVISIONAL_CHARSETS: &[CharsetInfo] = &[
    cs("VISCII", 1, 1),
    cs("TCVN", 1, 1),
    cs("EUC-JP", 1, 1),
    cs("MS_KANJI", 1, 1),
    cs("CP932", 1, 1),
    cs("ISO-2022-JP", 1, 1),
    cs("CN-GB", 1, 1),
    cs("CP936", 1, 1),
    cs("GB18030", 1, 1),
    cs("EUC-TW", 1, 1),
    cs("BIG-5", 1, 1),
    cs("CP950", 1, 1),
    cs("BIG5-HKSCS", 1, 1),
    cs("EUC-KR", 1, 1),
    cs("CP949", 1, 1),
    cs("CP1361", 1, 1),
    cs("ISO-2022-KR", 1, 1),
];

/// OS and vendor spellings, each mapping to one canonical entry.
static ALIASES: &[(&str, &str)] = &[
    ("ASCII", "ANSI_X3.4-1968"),
    ("US-ASCII", "ANSI_X3.4-1968"),
    ("ISO646-US", "ANSI_X3.4-1968"),
    ("ISO-IR-6", "ANSI_X3.4-1968"),
    ("CP367", "ANSI_X3.4-1968"),
    ("UTF8", "UTF-8"),
    ("UCS-2", "ISO-10646-UCS-2"),
    ("UCS2", "ISO-10646-UCS-2"),
    ("UCS-4", "UCS-4BE"),
    ("UTF16", "UTF-16"),
    ("UTF32", "UTF-32"),
    ("ISO8859-1", "ISO-8859-1"),
    ("ISO_8859-1", "ISO-8859-1"),
    ("ISO_8859-1:1987", "ISO-8859-1"),
    ("ISO-IR-100", "ISO-8859-1"),
    ("LATIN1", "ISO-8859-1"),
    ("L1", "ISO-8859-1"),
    ("CP819", "ISO-8859-1"),
    ("IBM819", "ISO-8859-1"),
    ("ISO8859-2", "ISO-8859-2"),
    ("ISO_8859-2", "ISO-8859-2"),
    ("ISO-IR-101", "ISO-8859-2"),
    ("LATIN2", "ISO-8859-2"),
    ("ISO8859-3", "ISO-8859-3"),
    ("ISO-IR-109", "ISO-8859-3"),
    ("LATIN3", "ISO-8859-3"),
    ("ISO8859-4", "ISO-8859-4"),
    ("ISO-IR-110", "ISO-8859-4"),
    ("LATIN4", "ISO-8859-4"),
    ("ISO-8859-5", "CYRILLIC"),
    ("ISO8859-5", "CYRILLIC"),
    ("ISO-IR-144", "CYRILLIC"),
    ("ISO-8859-6", "ARABIC"),
    ("ISO8859-6", "ARABIC"),
    ("ISO-IR-127", "ARABIC"),
    ("ISO-8859-7", "ECMA-118"),
    ("ISO8859-7", "ECMA-118"),
    ("GREEK", "ECMA-118"),
    ("ISO-IR-126", "ECMA-118"),
    ("ISO-8859-8", "HEBREW"),
    ("ISO8859-8", "HEBREW"),
    ("ISO-IR-138", "HEBREW"),
    ("ISO8859-9", "ISO-8859-9"),
    ("ISO-IR-148", "ISO-8859-9"),
    ("LATIN5", "ISO-8859-9"),
    ("ISO8859-10", "ISO-8859-10"),
    ("ISO-IR-157", "ISO-8859-10"),
    ("ISO8859-13", "ISO-8859-13"),
    ("ISO-IR-179", "ISO-8859-13"),
    ("ISO8859-14", "ISO-8859-14"),
    ("ISO-IR-199", "ISO-8859-14"),
    ("ISO8859-15", "ISO-8859-15"),
    ("ISO-IR-203", "ISO-8859-15"),
    ("LATIN-9", "ISO-8859-15"),
    ("ISO8859-16", "ISO-8859-16"),
    ("ISO-IR-226", "ISO-8859-16"),
    ("WINDOWS-1250", "CP1250"),
    ("MS-EE", "CP1250"),
    ("WINDOWS-1251", "CP1251"),
    ("MS-CYRL", "CP1251"),
    ("WINDOWS-1252", "CP1252"),
    ("MS-ANSI", "CP1252"),
    ("WINDOWS-1253", "CP1253"),
    ("MS-GREEK", "CP1253"),
    ("WINDOWS-1254", "CP1254"),
    ("MS-TURK", "CP1254"),
    ("WINDOWS-1255", "CP1255"),
    ("MS-HEBR", "CP1255"),
    ("WINDOWS-1256", "CP1256"),
    ("MS-ARAB", "CP1256"),
    ("WINDOWS-1257", "CP1257"),
    ("WINBALTRIM", "CP1257"),
    ("WINDOWS-1258", "CP1258"),
    ("CP850", "850"),
    ("IBM850", "850"),
    ("CP862", "862"),
    ("IBM862", "862"),
    ("CP866", "866"),
    ("IBM866", "866"),
    ("MACINTOSH", "MAC"),
    ("MACROMAN", "MAC"),
    ("CSMACINTOSH", "MAC"),
    ("MAC-CYRILLIC", "MACCYRILLIC"),
    ("ROMAN8", "HP-ROMAN8"),
    ("R8", "HP-ROMAN8"),
    ("WINDOWS-874", "CP874"),
    ("TIS-620", "CP874"),
    ("TIS620", "CP874"),
    ("SHIFT_JIS", "CP932"),
    ("SHIFT-JIS", "CP932"),
    ("SJIS", "CP932"),
    ("WINDOWS-31J", "CP932"),
    ("EUCJP", "EUC-JP"),
    ("UJIS", "EUC-JP"),
    ("GB2312", "CN-GB"),
    ("EUC-CN", "CN-GB"),
    ("GBK", "CP936"),
    ("WINDOWS-936", "CP936"),
    ("BIG5", "BIG-5"),
    ("BIGFIVE", "BIG-5"),
    ("BIG-FIVE", "BIG-5"),
    ("EUCKR", "EUC-KR"),
    ("KSC5601", "EUC-KR"),
    ("KS_C_5601-1987", "EUC-KR"),
    ("WINDOWS-949", "CP949"),
    ("JOHAB", "CP1361"),
];

/// Sybase server-side charset names, each paired with its canonical entry.
///
/// `ascii_8` is first and deliberately skipped when mapping back from a
/// canonical name, so `iso_1` is the spelling sent to a server.
static SYBASE_NAMES: &[(&str, &str)] = &[
    ("ascii_8", "ISO-8859-1"),
    ("iso_1", "ISO-8859-1"),
    ("iso88592", "ISO-8859-2"),
    ("iso88595", "CYRILLIC"),
    ("iso88596", "ARABIC"),
    ("iso88597", "ECMA-118"),
    ("iso88598", "HEBREW"),
    ("iso88599", "ISO-8859-9"),
    ("iso15", "ISO-8859-15"),
    ("cp850", "850"),
    ("cp866", "866"),
    ("cp874", "CP874"),
    ("cp932", "CP932"),
    ("cp936", "CP936"),
    ("cp949", "CP949"),
    ("cp950", "CP950"),
    ("cp1250", "CP1250"),
    ("cp1251", "CP1251"),
    ("cp1252", "CP1252"),
    ("cp1253", "CP1253"),
    ("cp1254", "CP1254"),
    ("cp1255", "CP1255"),
    ("cp1256", "CP1256"),
    ("cp1257", "CP1257"),
    ("cp1258", "CP1258"),
    ("koi8", "KOI8-R"),
    ("mac", "MAC"),
    ("mac_cyr", "MACCYRILLIC"),
    ("macgreek", "MACGREEK"),
    ("macturk", "MACTURKISH"),
    ("roman8", "HP-ROMAN8"),
    ("sjis", "CP932"),
    ("eucjis", "EUC-JP"),
    ("eucgb", "CN-GB"),
    ("eucksc", "EUC-KR"),
    ("big5", "BIG-5"),
    ("tis620", "CP874"),
    ("utf8", "UTF-8"),
    ("unicode", "UCS-2LE"),
];

fn find_canonical(name: &str) -> Option<&'static CharsetInfo> {
    CANONIC_CHARSETS
        .iter()
        .chain(PROVISIONAL_CHARSETS)
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Resolve any spelling (canonical, OS alias, or Sybase name) to its
/// charset descriptor.
#[must_use]
pub fn charset_info(name: &str) -> Option<&'static CharsetInfo> {
    if let Some(c) = find_canonical(name) {
        return Some(c);
    }
    let canonical = ALIASES
        .iter()
        .chain(SYBASE_NAMES)
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|&(_, canonical)| canonical)?;
    find_canonical(canonical)
}

/// Resolve any spelling to the canonical charset name, or `None` when the
/// name is unknown.
#[must_use]
pub fn canonical_charset_name(name: &str) -> Option<&'static str> {
    charset_info(name).map(|c| c.name)
}

/// The name Sybase servers use for a charset, given any spelling of it.
#[must_use]
pub fn sybase_charset_name(name: &str) -> Option<&'static str> {
    let canonical = canonical_charset_name(name)?;
    // Index 0 is ascii_8; the reverse lookup starts past it so iso_1 wins.
    SYBASE_NAMES[1..]
        .iter()
        .find(|&&(_, canon)| canon == canonical)
        .map(|&(sybase, _)| sybase)
}
