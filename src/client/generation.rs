//! Single-flight generation state machine.

/// Where the try-on tool is in its generate cycle.
///
/// ```text
/// Idle ──start──▶ Requesting ──succeed──▶ Succeeded
///   ▲                  │                     │
///   │                  └──────fail──────▶ Failed
///   └────────────── invalidate ◀─────────────┘
/// ```
///
/// `start` is refused while `Requesting`, and only the [`InFlight`] token it
/// returns can leave that state. The phases are private so a `Requesting`
/// state cannot exist without its token.
///
/// ```compile_fail
/// let _state = tryon::client::GenerationState::Requesting;
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerationState {
    phase: Phase,
}

#[derive(Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    Requesting,
    Succeeded { result_image: String },
    Failed { message: String },
}

/// Proof that a generation was started. Spent by `succeed` or `fail`.
#[derive(Debug)]
#[must_use = "an in-flight generation must be resolved with succeed or fail"]
pub struct InFlight {
    _private: (),
}

impl GenerationState {
    /// Enters `Requesting`. Returns `None` if a request is already in flight.
    pub fn start(&mut self) -> Option<InFlight> {
        if self.is_requesting() {
            return None;
        }
        self.phase = Phase::Requesting;
        Some(InFlight { _private: () })
    }

    /// Resolves the in-flight request with a result image.
    pub fn succeed(&mut self, _token: InFlight, result_image: impl Into<String>) {
        self.phase = Phase::Succeeded {
            result_image: result_image.into(),
        };
    }

    /// Resolves the in-flight request with a failure.
    pub fn fail(&mut self, _token: InFlight, message: impl Into<String>) {
        self.phase = Phase::Failed {
            message: message.into(),
        };
    }

    /// Drops a displayed result or failure because the inputs changed.
    /// A request in flight is left alone.
    pub fn invalidate(&mut self) {
        if !self.is_requesting() {
            self.phase = Phase::Idle;
        }
    }

    /// True before the first request and after an invalidation.
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// True while a request is in flight.
    pub fn is_requesting(&self) -> bool {
        matches!(self.phase, Phase::Requesting)
    }

    /// The result on display, if the last request succeeded.
    pub fn result_image(&self) -> Option<&str> {
        match &self.phase {
            Phase::Succeeded { result_image } => Some(result_image),
            _ => None,
        }
    }

    /// Why the last request failed, if it did.
    pub fn failure(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { message } => Some(message),
            _ => None,
        }
    }
}
