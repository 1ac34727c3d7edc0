use trellis_core::CandidatePayload;

/// What the caller must do with a candidate it just pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateDisposition {
    /// Held until the remote description lands.
    Queued,
    /// The link is live; apply it to the media engine now.
    ApplyNow(CandidatePayload),
    /// The link is closed; the candidate is gone.
    Discarded,
}

#[derive(Debug)]
enum Mode {
    Buffering(Vec<CandidatePayload>),
    PassThrough,
    Closed,
}

/// Ordered holding pen for remote candidates that arrive before the
/// remote description. Candidates come back out in arrival order, each
/// exactly once, and never before `drain_on_remote_ready` has been
/// called.
#[derive(Debug)]
pub struct IceCandidateBuffer {
    mode: Mode,
}

impl IceCandidateBuffer {
    pub fn new() -> Self {
        Self {
            mode: Mode::Buffering(Vec::new()),
        }
    }

    pub fn push(&mut self, candidate: CandidatePayload) -> CandidateDisposition {
        match &mut self.mode {
            Mode::Buffering(queue) => {
                queue.push(candidate);
                CandidateDisposition::Queued
            }
            Mode::PassThrough => CandidateDisposition::ApplyNow(candidate),
            Mode::Closed => CandidateDisposition::Discarded,
        }
    }

    /// Flips the buffer to live mode and yields everything queued so
    /// far. A second call finds the queue already empty; a call on a
    /// closed buffer yields nothing.
    pub fn drain_on_remote_ready(&mut self) -> Vec<CandidatePayload> {
        match std::mem::replace(&mut self.mode, Mode::PassThrough) {
            Mode::Buffering(queue) => queue,
            Mode::PassThrough => Vec::new(),
            Mode::Closed => {
                self.mode = Mode::Closed;
                Vec::new()
            }
        }
    }

    /// Discards anything still queued. Terminal.
    pub fn close(&mut self) {
        self.mode = Mode::Closed;
    }
}

impl Default for IceCandidateBuffer {
    fn default() -> Self {
        Self::new()
    }
}
