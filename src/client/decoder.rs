//! QR symbol localization and decoding.
//!
//! [`QrDecoder`] wraps the `rqrr` crate. By default it does not retry on
//! an inverted-color copy of the frame — a speed-over-robustness trade-off
//! carried as an explicit [`DecoderConfig`] flag rather than a hard-coded
//! library default, since behavior differs if inversion is enabled.

use super::frame::Frame;

/// Integer pixel coordinate of a detected symbol corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal pixel offset.
    pub x: i32,
    /// Vertical pixel offset.
    pub y: i32,
}

/// A successfully decoded symbol: the payload text plus the four corner
/// coordinates of the detected quadrilateral.
///
/// The corners are used only for overlay annotation; they carry no
/// semantic weight for the dispatch decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Decoded payload text.
    pub text: String,
    /// Corner coordinates of the detected quadrilateral.
    pub corners: [Point; 4],
}

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderConfig {
    /// Whether to retry detection on an inverted-color copy of the frame
    /// when the direct pass finds nothing. Defaults to `false`.
    pub attempt_inversion: bool,
}

/// Per-frame symbol decoder.
///
/// Returning `None` means "no symbol in this frame" — the caller retries
/// on the next frame.
pub trait SymbolDecoder {
    /// Attempts to locate and decode a symbol in the frame.
    fn decode(&self, frame: &Frame) -> Option<DecodedSymbol>;
}

/// `rqrr`-backed QR decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrDecoder {
    config: DecoderConfig,
}

impl QrDecoder {
    /// Creates a decoder with the given configuration.
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Returns the decoder configuration.
    #[must_use]
    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    fn decode_pass(frame: &Frame, invert: bool) -> Option<DecodedSymbol> {
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            frame.width(),
            frame.height(),
            |x, y| {
                let luma = frame.sample(x, y);
                if invert { 255 - luma } else { luma }
            },
        );

        for grid in prepared.detect_grids() {
            if let Ok((_meta, text)) = grid.decode() {
                let corners = grid.bounds.map(|p| Point { x: p.x, y: p.y });
                return Some(DecodedSymbol { text, corners });
            }
        }
        None
    }
}

impl SymbolDecoder for QrDecoder {
    fn decode(&self, frame: &Frame) -> Option<DecodedSymbol> {
        if let Some(symbol) = Self::decode_pass(frame, false) {
            return Some(symbol);
        }
        if self.config.attempt_inversion {
            return Self::decode_pass(frame, true);
        }
        None
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_config_skips_inversion() {
        let decoder = QrDecoder::default();
        assert!(!decoder.config().attempt_inversion);
    }

    #[test]
    fn blank_frame_decodes_to_nothing() {
        let Ok(frame) = Frame::new(64, 64, vec![255; 64 * 64]) else {
            panic!("valid frame");
        };
        let decoder = QrDecoder::default();
        assert_eq!(decoder.decode(&frame), None);
    }

    #[test]
    fn blank_frame_with_inversion_still_decodes_to_nothing() {
        let Ok(frame) = Frame::new(64, 64, vec![0; 64 * 64]) else {
            panic!("valid frame");
        };
        let decoder = QrDecoder::new(DecoderConfig {
            attempt_inversion: true,
        });
        assert_eq!(decoder.decode(&frame), None);
    }
}
