//! Frame acquisition for the scanner pipeline.
//!
//! [`FrameSource`] is the seam in front of whatever produces live frames —
//! a hardware camera binding, a recorded capture, or a test fixture. The
//! contract mirrors a camera stream: frames flow while the source is
//! active, a paused source must not pull from the underlying stream, and
//! the stream handle is released deterministically on every exit path
//! (explicit close or drop).

use std::collections::VecDeque;

use super::ClientError;

/// One greyscale video frame: 8-bit luma samples in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    luma: Vec<u8>,
}

impl Frame {
    /// Creates a frame from raw luma samples.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::FrameGeometry`] if the buffer length does
    /// not equal `width * height`.
    pub fn new(width: usize, height: usize, luma: Vec<u8>) -> Result<Self, ClientError> {
        if luma.len() != width * height {
            return Err(ClientError::FrameGeometry {
                width,
                height,
                len: luma.len(),
            });
        }
        Ok(Self {
            width,
            height,
            luma,
        })
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw luma buffer, row-major.
    #[must_use]
    pub fn luma(&self) -> &[u8] {
        &self.luma
    }

    /// Returns the luma sample at `(x, y)`, or 0 outside the frame.
    #[must_use]
    pub fn sample(&self, x: usize, y: usize) -> u8 {
        if x >= self.width {
            return 0;
        }
        self.luma
            .get(y.saturating_mul(self.width).saturating_add(x))
            .copied()
            .unwrap_or(0)
    }
}

/// A pausable stream of frames.
///
/// Implementations must release the underlying stream on [`close`] and on
/// drop, and must not pull frames while paused — pausing after a
/// detection is what prevents a second decode from triggering a
/// concurrent dispatch.
///
/// [`close`]: FrameSource::close
pub trait FrameSource {
    /// Returns the next frame, or `None` if the source is paused or
    /// currently has nothing to deliver.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SourceClosed`] if the source was closed.
    fn next_frame(&mut self) -> Result<Option<Frame>, ClientError>;

    /// Stops frame delivery without releasing the stream.
    fn pause(&mut self);

    /// Resumes frame delivery after a pause.
    fn resume(&mut self);

    /// Returns `true` while paused.
    fn is_paused(&self) -> bool;

    /// Releases the underlying stream. Idempotent.
    fn close(&mut self);
}

/// A frame source backed by an in-memory queue — recorded captures and
/// test fixtures.
#[derive(Debug, Default)]
pub struct ReplayFrameSource {
    frames: VecDeque<Frame>,
    paused: bool,
    closed: bool,
}

impl ReplayFrameSource {
    /// Creates a source that will replay the given frames in order.
    #[must_use]
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            paused: false,
            closed: false,
        }
    }

    /// Remaining undelivered frames.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ReplayFrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, ClientError> {
        if self.closed {
            return Err(ClientError::SourceClosed);
        }
        if self.paused {
            return Ok(None);
        }
        Ok(self.frames.pop_front())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn close(&mut self) {
        self.frames.clear();
        self.closed = true;
    }
}

impl Drop for ReplayFrameSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn frame(fill: u8) -> Frame {
        let Ok(frame) = Frame::new(4, 4, vec![fill; 16]) else {
            panic!("valid frame");
        };
        frame
    }

    #[test]
    fn frame_rejects_mismatched_buffer() {
        assert!(Frame::new(4, 4, vec![0; 15]).is_err());
    }

    #[test]
    fn sample_is_zero_outside_bounds() {
        let f = frame(7);
        assert_eq!(f.sample(0, 0), 7);
        assert_eq!(f.sample(4, 0), 0);
        assert_eq!(f.sample(0, 4), 0);
    }

    #[test]
    fn replay_delivers_in_order_then_runs_dry() {
        let mut source = ReplayFrameSource::new([frame(1), frame(2)]);
        let Ok(Some(first)) = source.next_frame() else {
            panic!("expected first frame");
        };
        assert_eq!(first.sample(0, 0), 1);
        let Ok(Some(second)) = source.next_frame() else {
            panic!("expected second frame");
        };
        assert_eq!(second.sample(0, 0), 2);
        assert_eq!(source.next_frame().ok(), Some(None));
    }

    #[test]
    fn paused_source_delivers_nothing() {
        let mut source = ReplayFrameSource::new([frame(1)]);
        source.pause();
        assert_eq!(source.next_frame().ok(), Some(None));
        assert_eq!(source.remaining(), 1);

        source.resume();
        assert!(matches!(source.next_frame(), Ok(Some(_))));
    }

    #[test]
    fn closed_source_errors_and_releases_frames() {
        let mut source = ReplayFrameSource::new([frame(1)]);
        source.close();
        assert_eq!(source.remaining(), 0);
        assert!(source.next_frame().is_err());
        // Idempotent
        source.close();
        assert!(source.next_frame().is_err());
    }
}
