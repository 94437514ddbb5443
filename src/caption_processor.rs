use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::segmenter::{BoundaryPolicy, SentenceSegmenter, TERMINAL_MARKS};

// @module: Caption parsing and cue-to-cell conversion

// @const: Inline diarization speaker tag, e.g. "[SPEAKER_01]: "
static SPEAKER_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[SPEAKER_(\d{1,2})\]: ").unwrap());

/// Number of header lines after normalization. Cues start right after.
const HEADER_LINES: usize = 4;

/// Lines occupied by one cue: marker, time range, text.
const CUE_LINES: usize = 3;

/// One sentence-level unit of the processed transcript.
///
/// The engine fills `text`, `time` and `speaker_id`; resolving the numeric
/// ID to a named speaker happens downstream, so `speaker` is always `None`
/// here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    // @field: Trimmed, non-empty sentence text
    pub text: String,

    // @field: Formatted start time, empty for cells after the first of a cue
    pub time: String,

    // @field: Diarized speaker ID, None when the cue carried no tag
    pub speaker_id: Option<u32>,

    // @field: Resolved speaker, populated by the consumer, never by the engine
    pub speaker: Option<Speaker>,
}

impl Cell {
    pub fn new(text: String, time: String, speaker_id: Option<u32>) -> Self {
        Cell {
            text,
            time,
            speaker_id,
            speaker: None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.speaker_id {
            Some(id) => write!(f, "[{}] {} {}", self.time, id, self.text),
            None => write!(f, "[{}] {}", self.time, self.text),
        }
    }
}

/// A diarized speaker as resolved by the consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Speaker {
    pub id: u32,
    pub name: String,
}

/// Non-fatal notes collected during a parse. The cell sequence is always
/// best-effort; diagnostics let callers decide whether to surface warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Line 3 opened a header annotation but no closing bracket was found
    /// on the following line; the header was left untouched.
    UnterminatedHeaderAnnotation { line: usize },

    /// A cue's text segmented to nothing but whitespace; no cell emitted.
    EmptyCueText { cue_index: usize },

    /// Lines after the last complete cue group were ignored.
    RaggedTrailingLines { count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::UnterminatedHeaderAnnotation { line } => {
                write!(f, "header annotation at line {} has no closing bracket", line)
            }
            Diagnostic::EmptyCueText { cue_index } => {
                write!(f, "cue {} has empty text, no cell emitted", cue_index)
            }
            Diagnostic::RaggedTrailingLines { count } => {
                write!(f, "{} trailing line(s) after the last complete cue ignored", count)
            }
        }
    }
}

/// Result of one parse pass: the cell sequence plus any non-fatal notes.
#[derive(Debug)]
pub struct ParseOutcome {
    pub cells: Vec<Cell>,
    pub diagnostics: Vec<Diagnostic>,
}

/// One cue after speaker extraction and segmentation, before merging.
#[derive(Debug, Clone)]
struct CueRecord {
    time: String,
    speaker_id: Option<u32>,
    candidates: Vec<String>,
}

/// Output buffer for the merge pass. Owns the only mutation the transducer
/// ever applies to already-emitted cells: extending the last one with a
/// continuation fragment.
struct CellBuffer {
    cells: Vec<Cell>,
}

impl CellBuffer {
    fn new() -> Self {
        CellBuffer { cells: Vec::new() }
    }

    fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Space-join a continuation fragment onto the most recently emitted
    /// cell. Time and speaker stay as they were. Returns false if there is
    /// no cell to extend yet.
    fn merge_into_last(&mut self, fragment: &str) -> bool {
        match self.cells.last_mut() {
            Some(cell) => {
                cell.text = format!("{} {}", cell.text.trim(), fragment);
                true
            }
            None => false,
        }
    }

    fn last_text(&self) -> Option<&str> {
        self.cells.last().map(|c| c.text.as_str())
    }
}

/// Converts machine-generated caption text into speaker-attributed,
/// sentence-level cells.
#[derive(Clone)]
pub struct CaptionProcessor {
    segmenter: SentenceSegmenter,
}

impl Default for CaptionProcessor {
    fn default() -> Self {
        CaptionProcessor {
            segmenter: SentenceSegmenter::default(),
        }
    }
}

impl CaptionProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with a custom sentence boundary policy.
    pub fn with_policy(policy: Arc<dyn BoundaryPolicy>) -> Self {
        CaptionProcessor {
            segmenter: SentenceSegmenter::new(policy),
        }
    }

    /// Parse a caption file into cells.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParseOutcome> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read caption file: {}", path.display()))?;
        Ok(self.parse_str(&content))
    }

    /// Parse caption content into cells. Best-effort and non-throwing:
    /// malformed input yields whatever cells could be recovered, with
    /// anomalies reported as diagnostics.
    pub fn parse_str(&self, content: &str) -> ParseOutcome {
        // Accept CRLF, LF, or bare CR line endings. CRLF is collapsed
        // first so it does not produce a phantom empty line per break.
        let mut lines: Vec<String> = content
            .replace("\r\n", "\n")
            .split(['\r', '\n'])
            .map(|l| l.to_string())
            .collect();

        let mut diagnostics = Vec::new();
        normalize_header(&mut lines, &mut diagnostics);

        let records = self.collect_cues(&lines, &mut diagnostics);
        let cells = merge_cues(records, &mut diagnostics);

        debug!(
            "Parsed {} cell(s) with {} diagnostic(s)",
            cells.len(),
            diagnostics.len()
        );
        ParseOutcome { cells, diagnostics }
    }

    /// First pass: walk the 3-line cue groups after the header and build
    /// one segmented record per cue.
    fn collect_cues(&self, lines: &[String], diagnostics: &mut Vec<Diagnostic>) -> Vec<CueRecord> {
        let mut records = Vec::new();
        let mut index = HEADER_LINES;

        while index + CUE_LINES <= lines.len() {
            // lines[index] is the cue marker, ignored
            let time_line = &lines[index + 1];
            let text_line = &lines[index + 2];

            let (speaker_id, message) = extract_speaker_tag(text_line);
            let candidates = self.segmenter.segment(message);

            records.push(CueRecord {
                time: extract_start_time(time_line),
                speaker_id,
                candidates,
            });
            index += CUE_LINES;
        }

        // A trailing newline leaves harmless empty lines behind; only a
        // partial cue group with real content is worth a note.
        let trailing_nonempty = lines[index.min(lines.len())..]
            .iter()
            .filter(|l| !l.trim().is_empty())
            .count();
        if trailing_nonempty > 0 {
            diagnostics.push(Diagnostic::RaggedTrailingLines {
                count: trailing_nonempty,
            });
        }

        records
    }
}

/// Repair the header variant where the technical annotation on line 3 is
/// wrapped across two physical lines. After this the header always spans
/// [`HEADER_LINES`] lines, which keeps cue offsets stable. Never fails;
/// unrecognized shapes are left alone.
fn normalize_header(lines: &mut Vec<String>, diagnostics: &mut Vec<Diagnostic>) {
    if lines.len() <= HEADER_LINES {
        return;
    }
    let annotation = &lines[3];
    let Some(open) = annotation.find("[A") else {
        return;
    };
    if annotation[open..].contains(']') {
        return;
    }
    if !lines[4].contains(']') {
        warn!("Header annotation opened on line 3 but never closed");
        diagnostics.push(Diagnostic::UnterminatedHeaderAnnotation { line: 3 });
        return;
    }

    let continuation = lines.remove(4);
    lines[3].push_str(&continuation);
}

/// Pull the start token out of a "start --> end" time range line.
///
/// The final two characters of the token are dropped: the upstream tool
/// emits a sub-unit suffix the editor never displays. This is a blunt,
/// format-specific transform, not a time parser.
pub fn extract_start_time(time_line: &str) -> String {
    let start = time_line
        .split("-->")
        .next()
        .unwrap_or("")
        .trim();
    let mut chars: Vec<char> = start.chars().collect();
    chars.truncate(chars.len().saturating_sub(2));
    chars.into_iter().collect()
}

/// Detect and strip an inline "[SPEAKER_NN]: " tag. Returns the numeric
/// speaker ID (leading zero stripped) and the remaining message; an
/// untagged line comes back unchanged with no ID.
pub fn extract_speaker_tag(text_line: &str) -> (Option<u32>, &str) {
    match SPEAKER_TAG_REGEX.captures(text_line) {
        Some(caps) => {
            let id = caps[1].parse::<u32>().ok();
            let rest = &text_line[caps.get(0).map_or(0, |m| m.end())..];
            (id, rest)
        }
        None => (None, text_line),
    }
}

/// Second pass: fold the segmented cue records into the final cell
/// sequence, carrying one flag across iterations — whether the previous
/// cue ended mid-sentence.
fn merge_cues(records: Vec<CueRecord>, diagnostics: &mut Vec<Diagnostic>) -> Vec<Cell> {
    let mut buffer = CellBuffer::new();
    let mut sentence_completed = true;

    for (cue_index, record) in records.into_iter().enumerate() {
        let mut candidates = record
            .candidates
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .peekable();

        if candidates.peek().is_none() {
            // Nothing to emit; the carry flag is left as the previous cue
            // set it.
            diagnostics.push(Diagnostic::EmptyCueText { cue_index });
            continue;
        }

        if !sentence_completed {
            // The previous cue ended mid-sentence: its continuation joins
            // the last emitted cell instead of opening a new one.
            if let Some(fragment) = candidates.next() {
                if !buffer.merge_into_last(fragment.trim()) {
                    // No previous cell to extend; recover by emitting it
                    // as a fresh cell with this cue's attribution.
                    buffer.push(Cell::new(
                        fragment.trim().to_string(),
                        record.time.clone(),
                        record.speaker_id,
                    ));
                }
            }
        }

        // The first non-continuation sentence carries the cue timestamp;
        // any further sentences packed into the same cue do not.
        if let Some(first) = candidates.next() {
            buffer.push(Cell::new(
                first.trim().to_string(),
                record.time.clone(),
                record.speaker_id,
            ));
        }
        for extra in candidates {
            buffer.push(Cell::new(
                extra.trim().to_string(),
                String::new(),
                record.speaker_id,
            ));
        }

        // A cell counts as complete if it contains terminal punctuation
        // anywhere in its text, not only at the end.
        sentence_completed = buffer
            .last_text()
            .is_some_and(|t| t.contains(TERMINAL_MARKS));
    }

    buffer.cells
}
