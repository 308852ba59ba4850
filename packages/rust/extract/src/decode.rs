//! Text decoding with an ordered encoding fallback chain.

use std::borrow::Cow;

use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::debug;

use docsplit_shared::{DocsplitError, Result, TextEncoding};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Decode `bytes` with the first encoding in `chain` that accepts them.
///
/// Fails with [`DocsplitError::UnsupportedEncoding`] only if every encoding
/// in the chain rejects the input. Latin-1 and Windows-1252 map every byte,
/// so a chain containing either one always succeeds.
pub fn decode_text(bytes: &[u8], chain: &[TextEncoding]) -> Result<(String, TextEncoding)> {
    for &encoding in chain {
        if let Some(text) = try_decode(bytes, encoding) {
            debug!(%encoding, bytes = bytes.len(), "decoded text");
            return Ok((text, encoding));
        }
        debug!(%encoding, "decode failed, trying next encoding");
    }

    Err(DocsplitError::UnsupportedEncoding {
        tried: chain.iter().map(|e| e.label().to_string()).collect(),
    })
}

fn try_decode(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
    match encoding {
        TextEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
            UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned)
        }
        TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        TextEncoding::Windows1252 => WINDOWS_1252
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn utf8_first() {
        let (text, enc) = decode_text("naïve café".as_bytes(), &TextEncoding::DEFAULT_CHAIN)
            .expect("decode");
        assert_eq!(text, "naïve café");
        assert_eq!(enc, TextEncoding::Utf8);
    }

    #[test]
    fn utf8_bom_dropped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"hello");
        let (text, _) = decode_text(&bytes, &TextEncoding::DEFAULT_CHAIN).expect("decode");
        assert_eq!(text, "hello");
    }

    #[test]
    fn falls_back_to_latin1() {
        // 0xE9 is "é" in Latin-1 and invalid as a lone UTF-8 byte.
        let bytes = b"caf\xE9";
        let (text, enc) = decode_text(bytes, &TextEncoding::DEFAULT_CHAIN).expect("decode");
        assert_eq!(text, "café");
        assert_eq!(enc, TextEncoding::Latin1);
    }

    #[test]
    fn windows_1252_maps_smart_quotes() {
        let bytes = b"\x93quoted\x94";
        let (text, enc) =
            decode_text(bytes, &[TextEncoding::Utf8, TextEncoding::Windows1252]).expect("decode");
        assert_eq!(text, "\u{201C}quoted\u{201D}");
        assert_eq!(enc, TextEncoding::Windows1252);
    }

    #[test]
    fn utf8_only_chain_rejects_invalid_bytes() {
        let err = decode_text(b"\xFF\xFE\xFD", &[TextEncoding::Utf8]).unwrap_err();
        match err {
            DocsplitError::UnsupportedEncoding { tried } => assert_eq!(tried, vec!["utf-8"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_decodes_to_empty_text() {
        let (text, enc) = decode_text(b"", &TextEncoding::DEFAULT_CHAIN).expect("decode");
        assert!(text.is_empty());
        assert_eq!(enc, TextEncoding::Utf8);
    }
}
