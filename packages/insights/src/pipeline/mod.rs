//! The insight extraction pipeline.
//!
//! - [`upload`] - upload flow: content derivation, persistence, trigger
//! - [`prompts`] - category preference mapping and prompt construction
//! - [`extract`] - the extraction function itself

pub mod extract;
pub mod prompts;
pub mod upload;

pub use extract::{run_extraction, ExtractionOutcome};
pub use prompts::{build_prompt, preferred_category, MAX_PROMPT_CONTENT_BYTES};
pub use upload::{derive_content, upload_document};
