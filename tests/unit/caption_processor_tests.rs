/*!
 * Tests for caption parsing and cue-to-cell conversion
 */

use cellscribe::caption_processor::{
    CaptionProcessor, Diagnostic, extract_speaker_tag, extract_start_time,
};
use crate::common;

/// Test start-time extraction from a time-range line
#[test]
fn test_extract_start_time_withTimeRangeLine_shouldTruncateSuffix() {
    let time = extract_start_time("00:00:01.000 --> 00:00:03.000");
    assert_eq!(time, "00:00:01.0");
}

/// Test start-time extraction with surrounding whitespace
#[test]
fn test_extract_start_time_withPadding_shouldTrimBeforeTruncating() {
    let time = extract_start_time("  00:02:10.500   -->   00:02:12.000");
    assert_eq!(time, "00:02:10.5");
}

/// Test start-time extraction never panics on degenerate input
#[test]
fn test_extract_start_time_withShortToken_shouldReturnEmpty() {
    assert_eq!(extract_start_time("a --> b"), "");
    assert_eq!(extract_start_time(""), "");
}

/// Test speaker tag extraction with a tagged line
#[test]
fn test_extract_speaker_tag_withTag_shouldReturnIdAndMessage() {
    let (id, message) = extract_speaker_tag("[SPEAKER_01]: Hello there");
    assert_eq!(id, Some(1));
    assert_eq!(message, "Hello there");
}

/// Test speaker tag extraction with a two-digit ID
#[test]
fn test_extract_speaker_tag_withTwoDigitId_shouldParseFully() {
    let (id, message) = extract_speaker_tag("[SPEAKER_12]: over here");
    assert_eq!(id, Some(12));
    assert_eq!(message, "over here");
}

/// Test speaker tag extraction with an untagged line
#[test]
fn test_extract_speaker_tag_withoutTag_shouldReturnLineUnchanged() {
    let (id, message) = extract_speaker_tag("Hello there");
    assert_eq!(id, None);
    assert_eq!(message, "Hello there");
}

/// Test speaker tag extraction rejects tags not at the line start
#[test]
fn test_extract_speaker_tag_withMidLineTag_shouldNotMatch() {
    let (id, message) = extract_speaker_tag("well [SPEAKER_01]: Hello");
    assert_eq!(id, None);
    assert_eq!(message, "well [SPEAKER_01]: Hello");
}

/// Test that the wrapped header variant parses the same as the flat one
#[test]
fn test_parse_withWrappedHeader_shouldMatchFlatHeaderOutput() {
    let processor = CaptionProcessor::new();

    let flat = processor.parse_str(common::sample_caption());
    let wrapped = processor.parse_str(common::sample_caption_wrapped_header());

    assert_eq!(flat.cells, wrapped.cells);
    assert!(!flat.cells.is_empty());
}

/// Test that an unterminated header annotation is reported, not fatal
#[test]
fn test_parse_withUnterminatedAnnotation_shouldEmitDiagnostic() {
    let content = concat!(
        "WEBVTT\n",
        "Kind: captions\n",
        "Language: en\n",
        "[ASR\n",
        "no closing bracket here\n",
    );
    let outcome = CaptionProcessor::new().parse_str(content);

    assert!(
        outcome
            .diagnostics
            .contains(&Diagnostic::UnterminatedHeaderAnnotation { line: 3 })
    );
}

/// Test timestamp placement for a cue packing several sentences
#[test]
fn test_parse_withMultiSentenceCue_shouldPlaceTimestampOnFirstCell() {
    let content = concat!(
        "WEBVTT\n",
        "Kind: captions\n",
        "Language: en\n",
        "[ASR whisper-large-v2]\n",
        "\n",
        "00:00:01.000 --> 00:00:05.000\n",
        "[SPEAKER_00]: First thing. Second thing. Third thing.\n",
    );
    let outcome = CaptionProcessor::new().parse_str(content);

    assert_eq!(outcome.cells.len(), 3);
    assert_eq!(outcome.cells[0].time, "00:00:01.0");
    assert_eq!(outcome.cells[1].time, "");
    assert_eq!(outcome.cells[2].time, "");
    for cell in &outcome.cells {
        assert_eq!(cell.speaker_id, Some(0));
        assert!(cell.speaker.is_none());
    }
}

/// Test that joining one cue's cell texts reproduces its message
#[test]
fn test_parse_withMultiSentenceCue_shouldRoundTripMessageText() {
    let message = "First thing. Second thing. Third thing.";
    let content = format!(
        "WEBVTT\nKind: captions\nLanguage: en\n[ASR whisper-large-v2]\n\n00:00:01.000 --> 00:00:05.000\n{}\n",
        message
    );
    let outcome = CaptionProcessor::new().parse_str(&content);

    let joined = outcome
        .cells
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(joined, message);
}

/// Test that a whitespace-only cue emits nothing and is diagnosed
#[test]
fn test_parse_withEmptyCueText_shouldEmitNoCell() {
    let content = concat!(
        "WEBVTT\n",
        "Kind: captions\n",
        "Language: en\n",
        "[ASR whisper-large-v2]\n",
        "\n",
        "00:00:01.000 --> 00:00:02.000\n",
        "   \n",
        "\n",
        "00:00:02.000 --> 00:00:03.000\n",
        "[SPEAKER_00]: Still here.\n",
    );
    let outcome = CaptionProcessor::new().parse_str(content);

    assert_eq!(outcome.cells.len(), 1);
    assert_eq!(outcome.cells[0].text, "Still here.");
    assert!(
        outcome
            .diagnostics
            .contains(&Diagnostic::EmptyCueText { cue_index: 0 })
    );
}

/// Test that an empty cue leaves the continuation flag untouched
#[test]
fn test_parse_withEmptyCueBetweenFragments_shouldStillMerge() {
    let content = concat!(
        "WEBVTT\n",
        "Kind: captions\n",
        "Language: en\n",
        "[ASR whisper-large-v2]\n",
        "\n",
        "00:00:01.000 --> 00:00:02.000\n",
        "[SPEAKER_00]: the thought trails\n",
        "\n",
        "00:00:02.000 --> 00:00:03.000\n",
        "\n",
        "\n",
        "00:00:03.000 --> 00:00:04.000\n",
        "[SPEAKER_00]: off and returns.\n",
    );
    let outcome = CaptionProcessor::new().parse_str(content);

    assert_eq!(outcome.cells.len(), 1);
    assert_eq!(outcome.cells[0].text, "the thought trails off and returns.");
    assert_eq!(outcome.cells[0].time, "00:00:01.0");
}

/// Test that ragged trailing lines are ignored with a diagnostic
#[test]
fn test_parse_withRaggedTail_shouldIgnoreAndDiagnose() {
    let content = concat!(
        "WEBVTT\n",
        "Kind: captions\n",
        "Language: en\n",
        "[ASR whisper-large-v2]\n",
        "\n",
        "00:00:01.000 --> 00:00:02.000\n",
        "[SPEAKER_00]: Complete cue.\n",
        "\n",
        "00:00:02.000 --> 00:00:03.000",
    );
    let outcome = CaptionProcessor::new().parse_str(content);

    assert_eq!(outcome.cells.len(), 1);
    assert!(
        outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::RaggedTrailingLines { .. }))
    );
}

/// Test that input shorter than the header produces nothing, quietly
#[test]
fn test_parse_withShortNonCaptionInput_shouldEmitNoDiagnostics() {
    let processor = CaptionProcessor::new();

    for content in ["", "plain prose", "two\nlines", "three\nshort\nlines"] {
        let outcome = processor.parse_str(content);
        assert!(outcome.cells.is_empty(), "unexpected cells for {:?}", content);
        assert!(
            outcome.diagnostics.is_empty(),
            "unexpected diagnostics for {:?}",
            content
        );
    }
}

/// Test that CRLF input parses the same as LF input
#[test]
fn test_parse_withCrlfLineEndings_shouldMatchLfOutput() {
    let processor = CaptionProcessor::new();
    let lf = common::sample_caption();
    let crlf = lf.replace('\n', "\r\n");

    let lf_outcome = processor.parse_str(lf);
    let crlf_outcome = processor.parse_str(&crlf);

    assert_eq!(lf_outcome.cells, crlf_outcome.cells);
}

/// Test every emitted cell carries non-empty trimmed text
#[test]
fn test_parse_withMixedContent_shouldNeverEmitEmptyCells() {
    let outcome = CaptionProcessor::new().parse_str(common::sample_caption());

    assert!(!outcome.cells.is_empty());
    for cell in &outcome.cells {
        assert!(!cell.text.trim().is_empty());
        assert_eq!(cell.text, cell.text.trim());
    }
}
