//! vocatrack data model
//!
//! Types shared by the synthesis driver, the audio assembly engine and the CLI.
//! Nothing in this crate performs audio work; it describes *what* is assembled:
//!
//! - [`vocab`]: vocabulary entries and the `|`-separated word list loader
//! - [`pause`]: pause durations used between segments of the study track
//! - [`clip`]: clip slots and per-word clip references
//! - [`request`]: synthesis requests handed to a TTS backend
//! - [`config`]: JSON project configuration
//! - [`layout`]: the on-disk naming policy for synthesized versions
//! - [`validation`]: small reusable validators
//! - [`error`]: error types and the [`BackendError`] reporting trait
//!
//! # Example
//!
//! ```
//! use vocatrack_spec::{parse_vocabulary, VersionLayout};
//!
//! let words = parse_vocabulary("word|meaning\ncat|猫\n").unwrap();
//! let layout = VersionLayout::new("vocabulary_audio");
//! let refs = layout.references(&words, 1);
//! assert_eq!(refs.len(), 1);
//! assert!(refs[0].wordform.ends_with("cat_en.wav"));
//! ```

pub mod clip;
pub mod config;
pub mod error;
pub mod layout;
pub mod pause;
pub mod request;
pub mod validation;
pub mod vocab;

pub use clip::{ClipReference, Slot};
pub use config::{FormatSpec, ProjectConfig, SynthesizerConfig, SUPPORTED_BIT_DEPTHS};
pub use error::{BackendError, SpecError, SpecResult};
pub use layout::VersionLayout;
pub use pause::PauseConfig;
pub use request::SynthesisRequest;
pub use vocab::{load_vocabulary, parse_vocabulary, WordEntry};
