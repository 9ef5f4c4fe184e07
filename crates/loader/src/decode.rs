use crate::error::{LoadError, Result};
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Text decoded from a source file and the label that decoded it
#[derive(Debug)]
pub struct DecodedText<'a> {
    pub text: Cow<'a, str>,
    pub encoding: &'static str,
}

/// Decode `bytes` with the first encoding in `labels` that accepts every byte.
///
/// Decoding never substitutes replacement characters: an encoding that meets
/// a malformed sequence is skipped. Unknown labels are skipped as well.
#[must_use]
pub fn decode_with_fallback<'a>(bytes: &'a [u8], labels: &[String]) -> Option<DecodedText<'a>> {
    for label in labels {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            log::warn!("Skipping unknown encoding label {label:?}");
            continue;
        };
        let input = if encoding == UTF_8 {
            bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
        } else {
            bytes
        };
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(input) {
            log::debug!("Decoded source as {}", encoding.name());
            return Some(DecodedText {
                text,
                encoding: encoding.name(),
            });
        }
        log::debug!("Source is not valid {}", encoding.name());
    }
    None
}

/// Read a file and decode it, failing when every encoding is exhausted
pub(crate) fn read_decoded(path: &Path, labels: &[String]) -> Result<String> {
    let bytes = std::fs::read(path)?;
    match decode_with_fallback(&bytes, labels) {
        Some(decoded) => Ok(decoded.text.into_owned()),
        None => {
            log::error!("Could not decode '{}' with common encodings", path.display());
            Err(LoadError::Undecodable {
                path: path.display().to_string(),
                tried: labels.join(", "),
            })
        }
    }
}
