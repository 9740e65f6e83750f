//! The upload-and-generate tool.

use crate::client::api::{Generated, TryOnApi};
use crate::client::generation::{GenerationState, InFlight};
use crate::client::history::TryOnResult;
use crate::client::notify::Notification;
use crate::client::slot::{SlotKind, UploadSlot};
use crate::client::state::{Action, AppState};
use crate::error::Result;
use crate::media::ImageFile;

/// A started generation: the token plus the exact inputs sent.
#[derive(Debug)]
#[must_use = "a pending generation must be completed"]
pub struct PendingGeneration {
    token: InFlight,
    person_image: String,
    clothing_image: String,
}

impl PendingGeneration {
    /// Person image that was sent.
    pub fn person_image(&self) -> &str {
        &self.person_image
    }

    /// Garment image that was sent.
    pub fn clothing_image(&self) -> &str {
        &self.clothing_image
    }
}

/// Two upload slots and the generation cycle that consumes them.
///
/// Not `Clone`; the in-flight token has exactly one owner.
///
/// ```compile_fail
/// let tool = tryon::client::TryOnTool::new();
/// let _copy = tool.clone();
/// ```
#[derive(Debug)]
pub struct TryOnTool {
    person: UploadSlot,
    clothing: UploadSlot,
    generation: GenerationState,
}

impl Default for TryOnTool {
    fn default() -> Self {
        Self::new()
    }
}

impl TryOnTool {
    /// Both slots empty, nothing generated.
    pub fn new() -> Self {
        Self {
            person: UploadSlot::new(SlotKind::Person),
            clothing: UploadSlot::new(SlotKind::Clothing),
            generation: GenerationState::default(),
        }
    }

    /// Read access to one slot.
    pub fn slot(&self, kind: SlotKind) -> &UploadSlot {
        match kind {
            SlotKind::Person => &self.person,
            SlotKind::Clothing => &self.clothing,
        }
    }

    fn slot_mut(&mut self, kind: SlotKind) -> &mut UploadSlot {
        match kind {
            SlotKind::Person => &mut self.person,
            SlotKind::Clothing => &mut self.clothing,
        }
    }

    /// Where the generate cycle stands.
    pub fn generation(&self) -> &GenerationState {
        &self.generation
    }

    /// Result currently on display.
    pub fn result(&self) -> Option<&str> {
        self.generation.result_image()
    }

    /// True while a request is in flight.
    pub fn is_processing(&self) -> bool {
        self.generation.is_requesting()
    }

    /// Whether the generate trigger is enabled.
    pub fn can_generate(&self) -> bool {
        self.person.is_filled() && self.clothing.is_filled() && !self.is_processing()
    }

    /// Sets a slot from the file picker and clears the displayed result.
    pub fn select_file(&mut self, kind: SlotKind, file: &ImageFile) {
        self.slot_mut(kind).select_file(file);
        self.generation.invalidate();
    }

    /// Sets a slot from a drop. Non-image drops change nothing.
    pub fn drop_file(&mut self, kind: SlotKind, file: &ImageFile) -> bool {
        let accepted = self.slot_mut(kind).drop_file(file);
        if accepted {
            self.generation.invalidate();
        }
        accepted
    }

    /// Forwards drag feedback to a slot.
    pub fn drag_over(&mut self, kind: SlotKind) {
        self.slot_mut(kind).drag_over();
    }

    /// Clears drag feedback on a slot.
    pub fn drag_leave(&mut self, kind: SlotKind) {
        self.slot_mut(kind).drag_leave();
    }

    /// Empties a slot and clears the displayed result.
    pub fn remove(&mut self, kind: SlotKind) {
        if self.slot_mut(kind).remove() {
            self.generation.invalidate();
        }
    }

    /// Empties both slots and the result.
    pub fn reset(&mut self) {
        self.person.remove();
        self.clothing.remove();
        self.generation.invalidate();
    }

    /// Starts a generation. Returns `None` when a slot is empty or a
    /// generation is already in flight.
    pub fn begin(&mut self) -> Option<PendingGeneration> {
        if !self.can_generate() {
            return None;
        }
        let person_image = self.person.image()?.to_string();
        let clothing_image = self.clothing.image()?.to_string();
        let token = self.generation.start()?;
        Some(PendingGeneration {
            token,
            person_image,
            clothing_image,
        })
    }

    /// Applies the proxy's answer to a started generation.
    ///
    /// On success the result is displayed and exactly one history entry is
    /// dispatched to `app`. On failure neither happens and the slots are kept.
    pub fn complete(
        &mut self,
        pending: PendingGeneration,
        outcome: Result<Generated>,
        app: &mut AppState,
    ) -> Notification {
        let PendingGeneration {
            token,
            person_image,
            clothing_image,
        } = pending;

        match outcome {
            Ok(generated) => {
                let result_image = generated
                    .result_image
                    .unwrap_or_else(|| person_image.clone());
                self.generation.succeed(token, result_image.clone());
                app.dispatch(Action::RecordResult(TryOnResult::new(
                    person_image,
                    clothing_image,
                    result_image,
                )));
                tracing::info!(history = app.history().len(), "try-on complete");
                Notification::success()
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!("Error generating try-on: {message}");
                self.generation.fail(token, message.clone());
                Notification::failure(&message)
            }
        }
    }

    /// Runs one full generation against `api`. Returns `None` without
    /// calling the API when the trigger is disabled.
    pub async fn generate(
        &mut self,
        api: &dyn TryOnApi,
        app: &mut AppState,
    ) -> Option<Notification> {
        let pending = self.begin()?;
        let outcome = api
            .invoke(pending.person_image(), pending.clothing_image())
            .await;
        Some(self.complete(pending, outcome, app))
    }
}
