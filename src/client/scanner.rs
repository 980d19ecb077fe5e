//! The scan-loop state machine.
//!
//! A [`ScanSession`] drives a [`FrameSource`] through a [`SymbolDecoder`]:
//!
//! ```text
//! Scanning ──decode success──▶ Detected ──next_scan──▶ Scanning
//!                                  │
//!                               finish
//!                                  ▼
//!                                Idle
//! ```
//!
//! Detection pauses the frame source before anything else happens, so no
//! second decode can trigger a concurrent dispatch. Both transitions out
//! of Detected are operator-driven; there is no automatic retry.

use super::ClientError;
use super::decoder::{DecodedSymbol, SymbolDecoder};
use super::frame::FrameSource;

/// Scan loop phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Continuously pulling frames and decoding each.
    Scanning,
    /// A symbol was decoded; the frame source is paused and the payload
    /// is held for the operator to act on.
    Detected,
    /// The session is finished and the frame source released.
    Idle,
}

/// One operator scanning session over a frame source and decoder.
#[derive(Debug)]
pub struct ScanSession<S, D> {
    source: S,
    decoder: D,
    phase: ScanPhase,
    symbol: Option<DecodedSymbol>,
}

impl<S: FrameSource, D: SymbolDecoder> ScanSession<S, D> {
    /// Starts a session in the Scanning phase.
    #[must_use]
    pub fn new(source: S, decoder: D) -> Self {
        Self {
            source,
            decoder,
            phase: ScanPhase::Scanning,
            symbol: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// The held symbol while in the Detected phase.
    #[must_use]
    pub fn detected(&self) -> Option<&DecodedSymbol> {
        self.symbol.as_ref()
    }

    /// Pulls and decodes the next frame.
    ///
    /// In the Scanning phase: on decode success the source is paused, the
    /// session moves to Detected, and the symbol is returned. A frame with
    /// no symbol (or no frame at all) returns `None` — call again on the
    /// next tick. Outside the Scanning phase this is a no-op returning the
    /// held symbol, if any.
    ///
    /// # Errors
    ///
    /// Propagates frame source failures.
    pub fn poll(&mut self) -> Result<Option<&DecodedSymbol>, ClientError> {
        if self.phase != ScanPhase::Scanning {
            return Ok(self.symbol.as_ref());
        }

        let Some(frame) = self.source.next_frame()? else {
            return Ok(None);
        };

        if let Some(symbol) = self.decoder.decode(&frame) {
            self.source.pause();
            self.phase = ScanPhase::Detected;
            self.symbol = Some(symbol);
            return Ok(self.symbol.as_ref());
        }

        Ok(None)
    }

    /// Operator control: discard the held result and return to Scanning.
    ///
    /// No-op once the session is Idle. Unconditionally resets the held
    /// state regardless of any still-pending dispatch; a since-reset
    /// session simply ignores whatever that dispatch eventually resolves
    /// to.
    pub fn next_scan(&mut self) {
        if self.phase == ScanPhase::Idle {
            return;
        }
        self.symbol = None;
        self.source.resume();
        self.phase = ScanPhase::Scanning;
    }

    /// Operator control: end the session and release the frame source.
    pub fn finish(&mut self) {
        self.symbol = None;
        self.source.close();
        self.phase = ScanPhase::Idle;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::client::decoder::{DecodedSymbol, Point};
    use crate::client::frame::{Frame, ReplayFrameSource};

    /// Decoder stub: reports a symbol whenever the frame's first sample
    /// is non-zero.
    #[derive(Debug)]
    struct MarkerDecoder;

    impl SymbolDecoder for MarkerDecoder {
        fn decode(&self, frame: &Frame) -> Option<DecodedSymbol> {
            (frame.sample(0, 0) > 0).then(|| DecodedSymbol {
                text: format!("hack:u{}", frame.sample(0, 0)),
                corners: [Point { x: 0, y: 0 }; 4],
            })
        }
    }

    fn frame(fill: u8) -> Frame {
        let Ok(frame) = Frame::new(2, 2, vec![fill; 4]) else {
            panic!("valid frame");
        };
        frame
    }

    #[test]
    fn detection_pauses_source_and_holds_symbol() {
        let source = ReplayFrameSource::new([frame(0), frame(5), frame(9)]);
        let mut session = ScanSession::new(source, MarkerDecoder);

        // First frame carries no symbol
        assert!(matches!(session.poll(), Ok(None)));
        assert_eq!(session.phase(), ScanPhase::Scanning);

        // Second frame decodes; source pauses, phase flips
        let Ok(Some(symbol)) = session.poll() else {
            panic!("expected detection");
        };
        assert_eq!(symbol.text, "hack:u5");
        assert_eq!(session.phase(), ScanPhase::Detected);

        // Further polls are no-ops returning the held symbol
        let Ok(Some(held)) = session.poll() else {
            panic!("expected held symbol");
        };
        assert_eq!(held.text, "hack:u5");
    }

    #[test]
    fn next_scan_resumes_for_another_detection() {
        let source = ReplayFrameSource::new([frame(5), frame(9)]);
        let mut session = ScanSession::new(source, MarkerDecoder);

        let first = session.poll();
        assert!(matches!(first, Ok(Some(_))));

        session.next_scan();
        assert_eq!(session.phase(), ScanPhase::Scanning);
        assert_eq!(session.detected(), None);

        let Ok(Some(symbol)) = session.poll() else {
            panic!("expected second detection");
        };
        assert_eq!(symbol.text, "hack:u9");
    }

    #[test]
    fn finish_releases_the_source() {
        let source = ReplayFrameSource::new([frame(5)]);
        let mut session = ScanSession::new(source, MarkerDecoder);

        session.finish();
        assert_eq!(session.phase(), ScanPhase::Idle);
        assert_eq!(session.detected(), None);

        // Idle is terminal: polling and next_scan are no-ops
        assert!(matches!(session.poll(), Ok(None)));
        session.next_scan();
        assert_eq!(session.phase(), ScanPhase::Idle);
    }

    #[test]
    fn no_automatic_retry_out_of_detected() {
        let source = ReplayFrameSource::new([frame(5), frame(9)]);
        let mut session = ScanSession::new(source, MarkerDecoder);

        let _ = session.poll();
        assert_eq!(session.phase(), ScanPhase::Detected);

        // Without an operator action the second frame is never consumed
        for _ in 0..3 {
            let Ok(Some(held)) = session.poll() else {
                panic!("expected held symbol");
            };
            assert_eq!(held.text, "hack:u5");
        }
    }
}
