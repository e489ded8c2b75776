//! End-to-end processing of one uploaded recording: validate and store the
//! audio, transcribe it, summarize the transcript and optionally render a
//! Word document.

use crate::error::Error;
use crate::export::{self, ExportMetadata};
use crate::meeting_summary::MeetingSummary;
use crate::summarization::{self, LlmProvider};
use crate::transcription;
use crate::upload::{self, StoredAudio};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::fmt;
use std::time::Instant;
use utoipa::ToSchema;

/// Lifecycle stages of one processing run, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    Transcribed,
    Summarized,
    Exported,
    Completed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::Transcribed => "transcribed",
            Stage::Summarized => "summarized",
            Stage::Exported => "exported",
            Stage::Completed => "completed",
        };
        write!(f, "{name}")
    }
}

/// Response shape requested by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Docx,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Docx => write!(f, "docx"),
        }
    }
}

/// Everything a successful run produced. `document` is set only for
/// [`OutputFormat::Docx`].
#[derive(Debug)]
pub struct PipelineOutcome {
    pub audio: StoredAudio,
    pub transcript: String,
    pub summary: MeetingSummary,
    pub document: Option<Vec<u8>>,
}

/// Run the full pipeline for one uploaded file.
///
/// Stages run strictly in order and the first failure aborts the run; a
/// transcript produced before a failed summarization is discarded rather
/// than returned partially.
pub async fn run(
    config: &Config,
    original_filename: Option<&str>,
    payload: &[u8],
    provider: LlmProvider,
    output: OutputFormat,
) -> Result<PipelineOutcome, Error> {
    let started = Instant::now();
    info!(
        "Process started | file={} | llm={provider} | output={output}",
        original_filename.unwrap_or("<unnamed>")
    );
    stage_completed(Stage::Received, &started, &format!("{} bytes", payload.len()));

    let audio = upload::store(config, original_filename, payload)
        .await
        .map_err(|e| fail(Stage::Validated, e))?;
    stage_completed(
        Stage::Validated,
        &started,
        &format!("saved as {}", audio.stored_filename),
    );

    let transcript = transcription::transcribe(config, &audio)
        .await
        .map_err(|e| fail(Stage::Transcribed, e))?;
    stage_completed(
        Stage::Transcribed,
        &started,
        &format!("{} chars", transcript.len()),
    );

    let summary = summarization::summarize(config, &transcript, provider)
        .await
        .map_err(|e| fail(Stage::Summarized, e))?;
    stage_completed(
        Stage::Summarized,
        &started,
        &format!("{} action items", summary.action_items.len()),
    );

    let document = match output {
        OutputFormat::Json => None,
        OutputFormat::Docx => {
            let metadata = ExportMetadata::new(
                Some(audio.original_filename.clone()),
                Some(provider.display_name().to_string()),
            );
            let bytes = export::render_docx(&summary, Some(&transcript), &metadata)
                .map_err(|e| fail(Stage::Exported, e))?;
            stage_completed(Stage::Exported, &started, &format!("{} bytes", bytes.len()));
            Some(bytes)
        }
    };

    info!(
        "Process completed successfully in {:.2}s",
        started.elapsed().as_secs_f64()
    );

    Ok(PipelineOutcome {
        audio,
        transcript,
        summary,
        document,
    })
}

/// Log the stage that did not complete, then hand the error back unchanged.
fn fail(stage: Stage, err: Error) -> Error {
    error!("Process failed | stage={stage} | {err}");
    err
}

fn stage_completed(stage: Stage, started: &Instant, detail: &str) {
    info!(
        "Stage {stage} | {} ms | {detail}",
        started.elapsed().as_millis()
    );
}
