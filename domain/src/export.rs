//! Rendering a meeting summary as a Word document.

use crate::error::Error;
use crate::meeting_summary::{ActionItem, MeetingSummary};
use chrono::{DateTime, Utc};
use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, Start, Table, TableCell, TableRow,
};
use log::*;
use std::io::Cursor;

/// MIME type for .docx downloads.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Fixed attachment filename for rendered documents.
pub const DOWNLOAD_FILENAME: &str = "meeting-notes.docx";

const BULLET_NUMBERING_ID: usize = 1;
const NONE_RECORDED: &str = "None recorded.";

const TITLE_SIZE: usize = 36;
const HEADING_SIZE: usize = 28;

/// Provenance details rendered into the document header block.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub original_filename: Option<String>,
    pub llm_provider: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl ExportMetadata {
    pub fn new(original_filename: Option<String>, llm_provider: Option<String>) -> Self {
        Self {
            original_filename,
            llm_provider,
            generated_at: Utc::now(),
        }
    }
}

/// Render a summary (and optional transcript appendix) to .docx bytes.
pub fn render_docx(
    summary: &MeetingSummary,
    transcript: Option<&str>,
    metadata: &ExportMetadata,
) -> Result<Vec<u8>, Error> {
    let docx = build_document(summary, transcript, metadata);

    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).map_err(|e| {
        error!("Failed to pack document archive: {e:?}");
        Error::internal("Failed to render document")
    })?;

    Ok(cursor.into_inner())
}

/// Assemble the document tree. Public so tests can inspect the structure
/// without unzipping rendered bytes.
pub fn build_document(
    summary: &MeetingSummary,
    transcript: Option<&str>,
    metadata: &ExportMetadata,
) -> Docx {
    let mut docx = Docx::new()
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
            Level::new(
                0,
                Start::new(1),
                NumberFormat::new("bullet"),
                LevelText::new("•"),
                LevelJc::new("left"),
            ),
        ))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text("Meeting Notes").bold().size(TITLE_SIZE)),
        )
        .add_paragraph(body_text(&format!(
            "Generated: {}",
            metadata.generated_at.format("%Y-%m-%d %H:%M UTC")
        )));

    if let Some(provider) = &metadata.llm_provider {
        docx = docx.add_paragraph(body_text(&format!("Provider: {provider}")));
    }
    if let Some(filename) = &metadata.original_filename {
        docx = docx.add_paragraph(body_text(&format!("Source file: {filename}")));
    }

    docx = docx
        .add_paragraph(heading("Overview"))
        .add_paragraph(body_text(&summary.meeting_summary));

    docx = docx.add_paragraph(heading("Participants"));
    docx = add_bullet_list(docx, &summary.participants);

    docx = docx.add_paragraph(heading("Decisions"));
    docx = add_bullet_list(docx, &summary.decisions);

    docx = docx.add_paragraph(heading("Action Items"));
    if summary.action_items.is_empty() {
        docx = docx.add_paragraph(body_text(NONE_RECORDED));
    } else {
        docx = docx
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Task | Owner | Due date | Priority").bold()),
            )
            .add_table(action_items_table(&summary.action_items));
    }

    if let Some(text) = transcript {
        docx = docx.add_paragraph(heading("Transcript"));
        for line in text.lines() {
            docx = docx.add_paragraph(body_text(line));
        }
    }

    docx
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(HEADING_SIZE))
}

fn body_text(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn add_bullet_list(mut docx: Docx, items: &[String]) -> Docx {
    if items.is_empty() {
        return docx.add_paragraph(body_text(NONE_RECORDED));
    }
    for item in items {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(item))
                .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
        );
    }
    docx
}

/// One row per action item; absent fields render as blank cells.
fn action_items_table(items: &[ActionItem]) -> Table {
    let rows = items
        .iter()
        .map(|item| {
            TableRow::new(vec![
                table_cell(&item.task),
                table_cell(item.owner.as_deref().unwrap_or("")),
                table_cell(item.due_date.as_deref().unwrap_or("")),
                table_cell(item.priority.map(|p| p.as_str()).unwrap_or("")),
            ])
        })
        .collect();

    Table::new(rows)
}

fn table_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(body_text(text))
}
