//! Headless model of the try-on page: upload slots, the single-flight
//! generation cycle, history, and page-level toggles.
//!
//! A UI renders from these types and feeds user events back in; nothing
//! here draws anything.

mod api;
mod generation;
mod history;
mod notify;
mod session;
mod slot;
mod state;

pub use api::{Generated, HttpTryOnApi, TryOnApi, DEFAULT_ENDPOINT};
pub use generation::{GenerationState, InFlight};
pub use history::{History, TryOnResult};
pub use notify::{Notification, Variant, GENERIC_FAILURE};
pub use session::{PendingGeneration, TryOnTool};
pub use slot::{SlotKind, UploadSlot};
pub use state::{Action, AppState};
