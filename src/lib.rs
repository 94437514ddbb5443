/*!
 * # cellscribe
 *
 * A Rust library that converts machine-generated timed captions into
 * speaker-attributed, sentence-level transcript cells.
 *
 * ## Features
 *
 * - Parses the caption output of speech transcription / diarization tools
 * - Repairs the header variant where an annotation wraps across two lines
 * - Extracts inline `[SPEAKER_NN]: ` diarization tags
 * - Re-segments cue-bounded text into true sentence boundaries, with a
 *   configurable title-abbreviation exception list
 * - Merges sentence fragments split across cues and splits cues that pack
 *   multiple sentences
 * - Best-effort parsing with non-fatal diagnostics instead of hard errors
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `caption_processor`: Caption parsing and cue-to-cell conversion
 * - `segmenter`: Sentence boundary detection with pluggable policies
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller and the cell handoff sink
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod caption_processor;
pub mod errors;
pub mod file_utils;
pub mod segmenter;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, JsonFileSink, TranscriptSink};
pub use caption_processor::{CaptionProcessor, Cell, Diagnostic, ParseOutcome, Speaker};
pub use errors::{AppError, CaptionError, ConfigError};
pub use segmenter::{BoundaryPolicy, SentenceSegmenter, TitleAbbreviationPolicy};
