//! In-memory state for one user session. Nothing here outlives the process.

use crate::attachment::Attachment;
use crate::features::{Feature, FeatureState};
use crate::parser::StructuredResult;
use crate::types::ChatMessage;
use std::collections::HashSet;

/// Which side of the cross-reference comparison a document belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Slot::A => "A",
            Slot::B => "B",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrossRefSlots {
    pub a: Option<Attachment>,
    pub b: Option<Attachment>,
}

impl CrossRefSlots {
    pub fn get(&self, slot: Slot) -> Option<&Attachment> {
        match slot {
            Slot::A => self.a.as_ref(),
            Slot::B => self.b.as_ref(),
        }
    }

    pub fn both(&self) -> Option<(&Attachment, &Attachment)> {
        Some((self.a.as_ref()?, self.b.as_ref()?))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub uploaded: Vec<Attachment>,
    pub analysis: Option<StructuredResult>,
    pub translation: Option<StructuredResult>,
    pub cross_reference: Option<StructuredResult>,
    pub crossref: CrossRefSlots,
    /// Append-only, replayed in full on every chat call.
    pub chat_history: Vec<ChatMessage>,
    /// Raw output of earlier analyses, fed to chat as background.
    pub document_context: String,
    in_flight: HashSet<Feature>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_files(&mut self, files: impl IntoIterator<Item = Attachment>) {
        self.uploaded.extend(files);
    }

    /// Removes the file at `index`; out-of-range indices are ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<Attachment> {
        (index < self.uploaded.len()).then(|| self.uploaded.remove(index))
    }

    pub fn set_crossref(&mut self, slot: Slot, file: Attachment) {
        match slot {
            Slot::A => self.crossref.a = Some(file),
            Slot::B => self.crossref.b = Some(file),
        }
    }

    pub fn crossref_ready(&self) -> bool {
        self.crossref.both().is_some()
    }

    pub fn feature_state(&self, feature: Feature) -> FeatureState {
        if self.in_flight.contains(&feature) {
            FeatureState::InFlight
        } else {
            FeatureState::Idle
        }
    }

    pub fn is_in_flight(&self, feature: Feature) -> bool {
        self.feature_state(feature) == FeatureState::InFlight
    }

    pub fn begin(&mut self, feature: Feature) {
        self.in_flight.insert(feature);
    }

    pub fn finish(&mut self, feature: Feature) {
        self.in_flight.remove(&feature);
    }
}
