//! # tds-iconv
//!
//! Per-connection character set conversion for TDS clients.
//!
//! A connection negotiates a client charset and a server charset; a
//! [`TdsIconv`] descriptor binds the two into a pair of directional
//! conversion handles. Conversion is a classic streaming interface:
//! consume as much input as fits the output, report how far each side got,
//! and surface the error class directly in the returned [`IconvOutcome`]
//! instead of through a side channel.
//!
//! Large values are converted in chunks. To keep one oversized or
//! malformed value from flooding diagnostics, the caller owns a
//! [`Suppress`] state for the duration of one logical value: the layer
//! emits at most one diagnostic per error class while the same state is
//! passed back in, and callers pre-set flags for classes they expect and
//! handle themselves.
//!
//! ```rust
//! use tds_iconv::{Direction, Suppress, TdsIconv};
//!
//! let conv = TdsIconv::new("UTF-8", "UCS-2LE")?;
//! let mut out = [0u8; 16];
//! let mut suppress = Suppress::default();
//! let res = conv.convert(Direction::ToServer, b"ab", &mut out, &mut suppress);
//! assert_eq!((res.consumed, res.written), (2, 4));
//! assert_eq!(&out[..4], &[0x61, 0x00, 0x62, 0x00]);
//! # Ok::<(), tds_iconv::IconvSetupError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod charsets;
mod codec;

use thiserror::Error;

pub use charsets::{
    CANONIC_CHARSETS, CharsetInfo, PROVISIONAL_CHARSETS, canonical_charset_name, charset_info,
    sybase_charset_name,
};
use codec::{Codec, DecodeOne, EncodeOne};

/// Which of a descriptor's two conversion handles to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Client charset to server charset.
    ToServer,
    /// Server charset to client charset.
    FromServer,
}

/// Error classes a conversion call can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IconvError {
    /// Output exhausted before the input; supply more output and continue.
    #[error("output buffer exhausted before input")]
    TooBig,
    /// An input byte sequence is not valid in the source charset.
    #[error("invalid byte sequence in source character set")]
    InvalidSequence,
    /// Input ends in the middle of a multi-byte sequence; expected on every
    /// chunk of a value except the last.
    #[error("incomplete character at end of input")]
    Incomplete,
}

/// Sticky per-value diagnostic state, owned by the caller.
///
/// A set flag means the diagnostic for that class has already been emitted
/// (or is not wanted) for the value currently being converted; the layer
/// sets a flag after emitting once. Reset it between logical values.
#[derive(Debug, Clone, Default)]
pub struct Suppress {
    /// Suppress the output-exhausted diagnostic.
    pub e2big: bool,
    /// Suppress the invalid-sequence diagnostic.
    pub eilseq: bool,
    /// Suppress the incomplete-sequence diagnostic.
    pub einval: bool,
}

/// Result of one conversion call.
///
/// `consumed` and `written` report partial progress even when `error` is
/// set; unconsumed input starts at `input[consumed..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconvOutcome {
    /// Input bytes consumed.
    pub consumed: usize,
    /// Output bytes produced.
    pub written: usize,
    /// Why conversion stopped early, if it did.
    pub error: Option<IconvError>,
}

/// Errors building a descriptor; these are connection-setup failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IconvSetupError {
    /// The name resolves to no canonical charset.
    #[error("unknown character set {0:?}")]
    UnknownCharset(String),
    /// The charset is known but no converter is available for it.
    #[error("no conversion available for character set {0:?}")]
    UnsupportedCharset(&'static str),
}

/// A per-connection conversion descriptor: one handle per direction plus a
/// fast-path flag for byte-identical charset pairs.
///
/// The descriptor itself is immutable after construction and freely
/// shareable; all per-value state lives in the caller's [`Suppress`].
#[derive(Debug)]
pub struct TdsIconv {
    client: &'static CharsetInfo,
    server: &'static CharsetInfo,
    client_codec: Codec,
    server_codec: Codec,
    /// Client and server charsets are byte-for-byte identical; conversion
    /// degenerates to a bounded copy.
    identical: bool,
}

impl TdsIconv {
    /// Build a descriptor for a client/server charset pair.
    ///
    /// Either name may be any recognized spelling; resolution failures and
    /// charsets without converters are reported as setup errors.
    pub fn new(client_charset: &str, server_charset: &str) -> Result<Self, IconvSetupError> {
        let client = charset_info(client_charset)
            .ok_or_else(|| IconvSetupError::UnknownCharset(client_charset.to_owned()))?;
        let server = charset_info(server_charset)
            .ok_or_else(|| IconvSetupError::UnknownCharset(server_charset.to_owned()))?;
        let client_codec = codec::codec_for_canonical(client.name)
            .ok_or(IconvSetupError::UnsupportedCharset(client.name))?;
        let server_codec = codec::codec_for_canonical(server.name)
            .ok_or(IconvSetupError::UnsupportedCharset(server.name))?;
        Ok(Self {
            client,
            server,
            client_codec,
            server_codec,
            identical: client.name == server.name,
        })
    }

    /// The resolved client charset.
    #[must_use]
    pub fn client_charset(&self) -> &'static CharsetInfo {
        self.client
    }

    /// The resolved server charset.
    #[must_use]
    pub fn server_charset(&self) -> &'static CharsetInfo {
        self.server
    }

    /// Whether conversion is a raw copy.
    #[must_use]
    pub fn is_fast_path(&self) -> bool {
        self.identical
    }

    /// Convert as much of `input` as fits in `output`.
    ///
    /// Reading from the server, an invalid input sequence is replaced with
    /// `?` and conversion continues; writing to the server it is terminal
    /// for the value. Either way the diagnostic is emitted at most once per
    /// [`Suppress`] lifetime.
    pub fn convert(
        &self,
        direction: Direction,
        input: &[u8],
        output: &mut [u8],
        suppress: &mut Suppress,
    ) -> IconvOutcome {
        if self.identical {
            let len = input.len().min(output.len());
            output[..len].copy_from_slice(&input[..len]);
            return IconvOutcome {
                consumed: len,
                written: len,
                error: (input.len() > output.len()).then_some(IconvError::TooBig),
            };
        }

        let (src_codec, dst_codec) = match direction {
            Direction::ToServer => (self.client_codec, self.server_codec),
            Direction::FromServer => (self.server_codec, self.client_codec),
        };

        let mut consumed = 0;
        let mut written = 0;
        let mut error = None;

        while consumed < input.len() {
            match src_codec.decode_one(&input[consumed..]) {
                DecodeOne::Char(ch, n) => match dst_codec.encode_one(ch, &mut output[written..]) {
                    EncodeOne::Written(m) => {
                        consumed += n;
                        written += m;
                    }
                    EncodeOne::TooBig => {
                        self.diag_e2big(suppress);
                        error = Some(IconvError::TooBig);
                        break;
                    }
                    EncodeOne::Unmappable => {
                        self.diag_eilseq(direction, suppress, &input[consumed..consumed + n]);
                        if direction == Direction::ToServer {
                            error = Some(IconvError::InvalidSequence);
                            break;
                        }
                        // Reading from the server there is a defined
                        // replacement policy: emit `?` and move on.
                        match dst_codec.encode_one('?', &mut output[written..]) {
                            EncodeOne::Written(m) => {
                                consumed += n;
                                written += m;
                            }
                            _ => {
                                error = Some(IconvError::TooBig);
                                break;
                            }
                        }
                    }
                },
                DecodeOne::Incomplete => {
                    if !suppress.einval {
                        tracing::debug!(
                            charset = self.source_charset(direction).name,
                            "input ends inside a multi-byte character"
                        );
                        suppress.einval = true;
                    }
                    error = Some(IconvError::Incomplete);
                    break;
                }
                DecodeOne::Invalid => {
                    let bad = &input[consumed..];
                    self.diag_eilseq(direction, suppress, &bad[..bad.len().min(4)]);
                    if direction == Direction::ToServer {
                        error = Some(IconvError::InvalidSequence);
                        break;
                    }
                    // Skip one input unit and substitute.
                    let skip = self.skip_width(direction, bad);
                    match dst_codec.encode_one('?', &mut output[written..]) {
                        EncodeOne::Written(m) => {
                            consumed += skip;
                            written += m;
                        }
                        _ => {
                            error = Some(IconvError::TooBig);
                            break;
                        }
                    }
                }
            }
        }

        IconvOutcome {
            consumed,
            written,
            error,
        }
    }

    fn source_charset(&self, direction: Direction) -> &'static CharsetInfo {
        match direction {
            Direction::ToServer => self.client,
            Direction::FromServer => self.server,
        }
    }

    /// How many bytes one unrecoverable input unit spans.
    fn skip_width(&self, direction: Direction, rest: &[u8]) -> usize {
        let min = usize::from(self.source_charset(direction).min_bytes_per_char.max(1));
        min.min(rest.len()).max(1)
    }

    fn diag_e2big(&self, suppress: &mut Suppress) {
        if suppress.e2big {
            return;
        }
        suppress.e2big = true;
        tracing::debug!(
            client = self.client.name,
            server = self.server.name,
            "output buffer exhausted during character set conversion"
        );
    }

    fn diag_eilseq(&self, direction: Direction, suppress: &mut Suppress, bad: &[u8]) {
        if suppress.eilseq {
            return;
        }
        suppress.eilseq = true;
        tracing::warn!(
            source = self.source_charset(direction).name,
            bytes = ?bad,
            "invalid byte sequence during character set conversion"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_path_copy() {
        let conv = TdsIconv::new("CP1252", "cp1252").unwrap();
        assert!(conv.is_fast_path());
        let mut out = [0u8; 3];
        let mut sup = Suppress::default();
        let res = conv.convert(Direction::ToServer, b"abcd", &mut out, &mut sup);
        assert_eq!(res.consumed, 3);
        assert_eq!(res.written, 3);
        assert_eq!(res.error, Some(IconvError::TooBig));
        assert_eq!(&out, b"abc");
    }

    #[test]
    fn test_utf8_to_ucs2() {
        let conv = TdsIconv::new("UTF-8", "UCS-2LE").unwrap();
        let mut out = [0u8; 16];
        let mut sup = Suppress::default();
        let res = conv.convert(Direction::ToServer, "aé".as_bytes(), &mut out, &mut sup);
        assert_eq!(res.error, None);
        assert_eq!(res.consumed, 3);
        assert_eq!(res.written, 4);
        assert_eq!(&out[..4], &[0x61, 0x00, 0xe9, 0x00]);
    }

    #[test]
    fn test_ucs2_to_client_charset() {
        let conv = TdsIconv::new("CP1251", "UCS-2LE").unwrap();
        // "Пр" as UCS-2LE from the server.
        let wire = [0x1f, 0x04, 0x40, 0x04];
        let mut out = [0u8; 8];
        let mut sup = Suppress::default();
        let res = conv.convert(Direction::FromServer, &wire, &mut out, &mut sup);
        assert_eq!(res.error, None);
        assert_eq!(&out[..res.written], &[0xcf, 0xf0]);
    }

    #[test]
    fn test_incomplete_tail_reported() {
        let conv = TdsIconv::new("UTF-8", "UCS-2LE").unwrap();
        let bytes = "é".as_bytes();
        let mut out = [0u8; 8];
        let mut sup = Suppress::default();
        let res = conv.convert(Direction::ToServer, &bytes[..1], &mut out, &mut sup);
        assert_eq!(res.consumed, 0);
        assert_eq!(res.error, Some(IconvError::Incomplete));
        // The flag latched: a second call will not log again.
        assert!(sup.einval);
    }

    #[test]
    fn test_output_exhaustion_partial_progress() {
        let conv = TdsIconv::new("UTF-8", "UCS-2LE").unwrap();
        let mut out = [0u8; 3];
        let mut sup = Suppress::default();
        let res = conv.convert(Direction::ToServer, b"abc", &mut out, &mut sup);
        assert_eq!(res.consumed, 1);
        assert_eq!(res.written, 2);
        assert_eq!(res.error, Some(IconvError::TooBig));
    }

    #[test]
    fn test_invalid_from_server_replaced() {
        let conv = TdsIconv::new("UTF-8", "UTF-8").unwrap();
        assert!(conv.is_fast_path());
        // Force the slow path with distinct charsets instead.
        let conv = TdsIconv::new("CP1252", "UTF-8").unwrap();
        // 0xC0 0x80 is an invalid UTF-8 sequence from the server.
        let mut out = [0u8; 8];
        let mut sup = Suppress::default();
        let res = conv.convert(Direction::FromServer, &[0x41, 0xc0, 0x80, 0x42], &mut out, &mut sup);
        assert_eq!(res.error, None);
        assert_eq!(&out[..res.written], b"A??B");
        assert!(sup.eilseq);
    }

    #[test]
    fn test_invalid_to_server_terminal() {
        let conv = TdsIconv::new("UTF-8", "CP1252").unwrap();
        let mut out = [0u8; 8];
        let mut sup = Suppress::default();
        let res = conv.convert(Direction::ToServer, &[0xff, 0x41], &mut out, &mut sup);
        assert_eq!(res.error, Some(IconvError::InvalidSequence));
        assert_eq!(res.consumed, 0);
    }

    #[test]
    fn test_unmappable_to_server_terminal() {
        let conv = TdsIconv::new("UTF-8", "CP1252").unwrap();
        let mut out = [0u8; 8];
        let mut sup = Suppress::default();
        let res = conv.convert(Direction::ToServer, "中".as_bytes(), &mut out, &mut sup);
        assert_eq!(res.error, Some(IconvError::InvalidSequence));
    }

    #[test]
    fn test_setup_errors() {
        assert_eq!(
            TdsIconv::new("no-such", "UTF-8").unwrap_err(),
            IconvSetupError::UnknownCharset("no-such".to_owned())
        );
        assert_eq!(
            TdsIconv::new("VISCII", "UTF-8").unwrap_err(),
            IconvSetupError::UnsupportedCharset("VISCII")
        );
    }

    #[test]
    fn test_directions_independent() {
        let conv = TdsIconv::new("CP1252", "UCS-2LE").unwrap();
        let mut out = [0u8; 8];
        let mut sup = Suppress::default();
        // Narrow to wide going out.
        let res = conv.convert(Direction::ToServer, b"A", &mut out, &mut sup);
        assert_eq!(&out[..res.written], &[0x41, 0x00]);
        // Wide to narrow coming back.
        let res = conv.convert(Direction::FromServer, &[0x41, 0x00], &mut out, &mut sup);
        assert_eq!(&out[..res.written], b"A");
    }
}
