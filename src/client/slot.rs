//! Upload slots.

use crate::media::ImageFile;
use serde::{Deserialize, Serialize};

/// Which of the two inputs a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Photo of the user.
    Person,
    /// Garment image.
    Clothing,
}

impl SlotKind {
    /// Call to action shown on an empty slot.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Person => "Upload Your Photo",
            Self::Clothing => "Upload Clothing Image",
        }
    }

    /// Hint shown under the title.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Person => "Full-body photo for best results",
            Self::Clothing => "Any garment from any online store",
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Person => write!(f, "person"),
            Self::Clothing => write!(f, "clothing"),
        }
    }
}

/// Holder for at most one image payload.
#[derive(Debug, Clone)]
pub struct UploadSlot {
    kind: SlotKind,
    image: Option<String>,
    dragging: bool,
}

impl UploadSlot {
    /// Creates an empty slot.
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            image: None,
            dragging: false,
        }
    }

    /// Which input this slot holds.
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Current payload as a data URI.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// True when the slot holds an image.
    pub fn is_filled(&self) -> bool {
        self.image.is_some()
    }

    /// True while a drag hovers over the slot.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// A drag entered the slot.
    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    /// A drag left without dropping.
    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Handles a dropped file. Only files declaring an image type are
    /// accepted; returns whether the slot changed.
    pub fn drop_file(&mut self, file: &ImageFile) -> bool {
        self.dragging = false;
        if !file.declares_image() {
            tracing::debug!(slot = %self.kind, file = %file.name, "ignoring non-image drop");
            return false;
        }
        self.select_file(file);
        true
    }

    /// Handles a file chosen in the picker. No content-type gate.
    pub fn select_file(&mut self, file: &ImageFile) {
        tracing::debug!(slot = %self.kind, file = %file.name, bytes = file.bytes.len(), "image selected");
        self.image = Some(file.to_data_uri());
    }

    /// Empties the slot. Returns whether it held an image.
    pub fn remove(&mut self) -> bool {
        self.image.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImageFile {
        ImageFile::new("me.png", "image/png", b"png".to_vec())
    }

    #[test]
    fn test_drop_accepts_declared_images() {
        let mut slot = UploadSlot::new(SlotKind::Person);
        slot.drag_over();
        assert!(slot.is_dragging());

        assert!(slot.drop_file(&png()));
        assert!(!slot.is_dragging());
        assert_eq!(slot.image(), Some("data:image/png;base64,cG5n"));
    }

    #[test]
    fn test_drop_rejects_non_images() {
        let mut slot = UploadSlot::new(SlotKind::Clothing);
        slot.select_file(&png());
        slot.drag_over();

        let pdf = ImageFile::new("spec.pdf", "application/pdf", b"%PDF".to_vec());
        assert!(!slot.drop_file(&pdf));
        assert!(!slot.is_dragging());
        assert_eq!(slot.image(), Some("data:image/png;base64,cG5n"));
    }

    #[test]
    fn test_picker_has_no_type_gate() {
        let mut slot = UploadSlot::new(SlotKind::Person);
        slot.select_file(&ImageFile::new("blob", "", b"abc".to_vec()));
        assert_eq!(
            slot.image(),
            Some("data:application/octet-stream;base64,YWJj")
        );
    }

    #[test]
    fn test_replace_and_remove() {
        let mut slot = UploadSlot::new(SlotKind::Person);
        slot.select_file(&png());
        slot.select_file(&ImageFile::new("b.jpg", "image/jpeg", b"jpg".to_vec()));
        assert!(slot.image().unwrap().starts_with("data:image/jpeg"));

        assert!(slot.remove());
        assert!(!slot.is_filled());
        assert!(!slot.remove());
    }

    #[test]
    fn test_drag_leave() {
        let mut slot = UploadSlot::new(SlotKind::Clothing);
        slot.drag_over();
        slot.drag_leave();
        assert!(!slot.is_dragging());
    }

    #[test]
    fn test_slot_copy() {
        assert_eq!(SlotKind::Person.title(), "Upload Your Photo");
        assert_eq!(
            SlotKind::Clothing.description(),
            "Any garment from any online store"
        );
        assert_eq!(SlotKind::Clothing.to_string(), "clothing");
    }
}
