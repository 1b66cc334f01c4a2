//! Wire types shared with the drafting backend.

pub mod draft;
pub mod drawing;
pub mod project;

pub use draft::{
    Draft, DraftUpdate, GeneratedSection, GenerationRecord, Section, StartDraftRequest,
    StartedDraft,
};
pub use drawing::Drawing;
pub use project::Project;
