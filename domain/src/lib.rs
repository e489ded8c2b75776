//! Business logic for the meeting-notes pipeline.
//!
//! Each stage of the pipeline lives in its own module: `upload` validates and
//! persists incoming audio, `transcription` and `summarization` call the
//! external AI providers through `gateway` clients, `export` renders Word
//! documents, and `pipeline` chains the stages for the one-shot processing
//! endpoint. The `web` crate consumes these modules and never talks to a
//! provider directly.

pub mod error;
pub mod export;
pub mod meeting_summary;
pub mod pipeline;
pub mod prompt;
pub mod summarization;
pub mod transcription;
pub mod upload;

pub mod gateway;
