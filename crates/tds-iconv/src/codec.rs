//! Per-charset codecs: decode one character, encode one character.
//!
//! Working one character at a time keeps the chunk contract exact: the
//! caller learns precisely how many input bytes were consumed, an input that
//! ends mid-sequence is reported as incomplete rather than invalid, and no
//! decoder state survives between calls.

use encoding_rs::{DecoderResult, Encoding, EncoderResult};

/// How one decode step ended.
pub(crate) enum DecodeOne {
    /// A character and the input bytes it consumed.
    Char(char, usize),
    /// Input ends in the middle of a multi-byte sequence.
    Incomplete,
    /// The bytes are not valid in the source charset.
    Invalid,
}

/// How one encode step ended.
pub(crate) enum EncodeOne {
    /// Bytes written to the output.
    Written(usize),
    /// The character does not fit the remaining output.
    TooBig,
    /// The charset cannot represent the character.
    Unmappable,
}

/// A conversion handle for one charset.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Codec {
    /// UTF-8, handled through the standard library's validator.
    Utf8,
    /// UTF-16 / UCS-2 in either byte order.
    Wide {
        /// Big-endian byte order.
        big_endian: bool,
    },
    /// Anything `encoding_rs` can drive.
    Rs {
        /// The encoding.
        encoding: &'static Encoding,
        /// Maximum bytes per character, bounding the incomplete-sequence
        /// probe.
        max_bytes: usize,
    },
}

/// Resolve a canonical charset name to its codec, `None` when no converter
/// is available for it.
pub(crate) fn codec_for_canonical(name: &str) -> Option<Codec> {
    let rs = |label: &str, max_bytes: usize| {
        Encoding::for_label(label.as_bytes()).map(|encoding| Codec::Rs { encoding, max_bytes })
    };
    match name {
        "UTF-8" => Some(Codec::Utf8),
        "UCS-2LE" | "UTF-16LE" => Some(Codec::Wide { big_endian: false }),
        "UCS-2BE" | "UTF-16BE" | "UTF-16" | "ISO-10646-UCS-2" => {
            Some(Codec::Wide { big_endian: true })
        }
        // The WHATWG single-byte repertoire; ASCII rides on windows-1252.
        "ANSI_X3.4-1968" => rs("windows-1252", 1),
        "ISO-8859-1" => rs("windows-1252", 1),
        "CYRILLIC" => rs("iso-8859-5", 1),
        "ARABIC" => rs("iso-8859-6", 1),
        "ECMA-118" => rs("iso-8859-7", 1),
        "HEBREW" => rs("iso-8859-8", 1),
        "CP1250" | "CP1251" | "CP1252" | "CP1253" | "CP1254" | "CP1255" | "CP1256" | "CP1257"
        | "CP1258" => {
            let label = format!("windows-{}", &name[2..]);
            rs(&label, 1)
        }
        "866" => rs("ibm866", 1),
        "MAC" => rs("macintosh", 1),
        "MACCYRILLIC" => rs("x-mac-cyrillic", 1),
        "CP874" => rs("windows-874", 1),
        "CP932" | "MS_KANJI" => rs("shift_jis", 2),
        "EUC-JP" => rs("euc-jp", 3),
        "CN-GB" | "CP936" => rs("gbk", 2),
        "GB18030" => rs("gb18030", 4),
        "BIG-5" | "CP950" | "BIG5-HKSCS" => rs("big5", 2),
        "EUC-KR" | "CP949" => rs("euc-kr", 2),
        // Plain ISO-8859-x spellings resolve as encoding_rs labels.
        n if n.starts_with("ISO-8859-") => rs(n, 1),
        n if n.starts_with("KOI8-") => rs(n, 1),
        _ => None,
    }
}

impl Codec {
    /// Decode one character from the head of `bytes`.
    pub(crate) fn decode_one(self, bytes: &[u8]) -> DecodeOne {
        if bytes.is_empty() {
            return DecodeOne::Incomplete;
        }
        match self {
            Codec::Utf8 => utf8_one(bytes),
            Codec::Wide { big_endian } => wide_one(bytes, big_endian),
            Codec::Rs {
                encoding,
                max_bytes,
            } => rs_one(encoding, max_bytes, bytes),
        }
    }

    /// Encode one character into the head of `out`, returning how many
    /// bytes were written.
    pub(crate) fn encode_one(self, ch: char, out: &mut [u8]) -> EncodeOne {
        match self {
            Codec::Utf8 => {
                let mut buf = [0u8; 4];
                let encoded = ch.encode_utf8(&mut buf);
                if encoded.len() > out.len() {
                    return EncodeOne::TooBig;
                }
                out[..encoded.len()].copy_from_slice(encoded.as_bytes());
                EncodeOne::Written(encoded.len())
            }
            Codec::Wide { big_endian } => {
                let mut units = [0u16; 2];
                let units = ch.encode_utf16(&mut units);
                let needed = units.len() * 2;
                if needed > out.len() {
                    return EncodeOne::TooBig;
                }
                for (i, unit) in units.iter().enumerate() {
                    let b = if big_endian {
                        unit.to_be_bytes()
                    } else {
                        unit.to_le_bytes()
                    };
                    out[i * 2..i * 2 + 2].copy_from_slice(&b);
                }
                EncodeOne::Written(needed)
            }
            Codec::Rs { encoding, .. } => {
                let mut utf8 = [0u8; 4];
                let encoded = ch.encode_utf8(&mut utf8);
                let mut encoder = encoding.new_encoder();
                let (result, _read, written) =
                    encoder.encode_from_utf8_without_replacement(encoded, out, true);
                match result {
                    EncoderResult::InputEmpty => EncodeOne::Written(written),
                    EncoderResult::OutputFull => EncodeOne::TooBig,
                    EncoderResult::Unmappable(_) => EncodeOne::Unmappable,
                }
            }
        }
    }
}

fn utf8_one(bytes: &[u8]) -> DecodeOne {
    let prefix = &bytes[..bytes.len().min(4)];
    match std::str::from_utf8(prefix) {
        Ok(s) => match s.chars().next() {
            Some(ch) => DecodeOne::Char(ch, ch.len_utf8()),
            None => DecodeOne::Incomplete,
        },
        Err(e) if e.valid_up_to() > 0 => {
            // The head is a whole character; the error is further in.
            let s = match std::str::from_utf8(&prefix[..e.valid_up_to()]) {
                Ok(s) => s,
                Err(_) => return DecodeOne::Invalid,
            };
            match s.chars().next() {
                Some(ch) => DecodeOne::Char(ch, ch.len_utf8()),
                None => DecodeOne::Invalid,
            }
        }
        // error_len() of None means the input ended inside a sequence that
        // could still become valid: that is EINVAL, not EILSEQ.
        Err(e) if e.error_len().is_none() && bytes.len() < 4 => DecodeOne::Incomplete,
        Err(_) => DecodeOne::Invalid,
    }
}

fn wide_one(bytes: &[u8], big_endian: bool) -> DecodeOne {
    let unit = |i: usize| {
        if big_endian {
            u16::from_be_bytes([bytes[i], bytes[i + 1]])
        } else {
            u16::from_le_bytes([bytes[i], bytes[i + 1]])
        }
    };
    if bytes.len() < 2 {
        return DecodeOne::Incomplete;
    }
    let u0 = unit(0);
    if (0xd800..0xdc00).contains(&u0) {
        if bytes.len() < 4 {
            return DecodeOne::Incomplete;
        }
        let u1 = unit(2);
        if !(0xdc00..0xe000).contains(&u1) {
            return DecodeOne::Invalid;
        }
        let c = 0x10000 + ((u32::from(u0) - 0xd800) << 10) + (u32::from(u1) - 0xdc00);
        match char::from_u32(c) {
            Some(ch) => DecodeOne::Char(ch, 4),
            None => DecodeOne::Invalid,
        }
    } else if (0xdc00..0xe000).contains(&u0) {
        DecodeOne::Invalid
    } else {
        match char::from_u32(u32::from(u0)) {
            Some(ch) => DecodeOne::Char(ch, 2),
            None => DecodeOne::Invalid,
        }
    }
}

/// Probe prefixes of increasing length until one decodes cleanly; if none
/// does and the input is shorter than the charset's widest character, the
/// sequence may complete in the next chunk.
fn rs_one(encoding: &'static Encoding, max_bytes: usize, bytes: &[u8]) -> DecodeOne {
    let limit = bytes.len().min(max_bytes);
    for n in 1..=limit {
        let mut decoder = encoding.new_decoder_without_bom_handling();
        let mut buf = [0u8; 8];
        let (result, read, written) =
            decoder.decode_to_utf8_without_replacement(&bytes[..n], &mut buf, true);
        if matches!(result, DecoderResult::InputEmpty) && read == n && written > 0 {
            let s = match std::str::from_utf8(&buf[..written]) {
                Ok(s) => s,
                Err(_) => return DecodeOne::Invalid,
            };
            let mut chars = s.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                return DecodeOne::Char(ch, n);
            }
        }
    }
    if bytes.len() < max_bytes {
        DecodeOne::Incomplete
    } else {
        DecodeOne::Invalid
    }
}
