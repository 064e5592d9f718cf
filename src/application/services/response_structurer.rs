//! Turns a freeform model reply into a [`StructuredComplianceResponse`].
//!
//! The reply is only shaped by the prompt rubric, so parsing runs as a fixed
//! sequence of passes, each with a narrower idea of what a section marker is:
//!
//! 1. [`numbered_sections`]: `1.`..`5.` markers naming a rubric topic.
//! 2. [`heading_sections`]: markdown headings, bold lines and `Label:` paragraphs.
//! 3. [`whole_text_summary`]: the whole reply becomes the summary.
//!
//! The first pass that finds a section wins. None of them can fail; the worst
//! case is a response with every field empty and `raw_text` set.
//!
//! A label only opens a section when it is short and topic-led: the words
//! before its topic word must all be rubric qualifiers ("Key Legal
//! Obligations", "Recent Regulatory Changes"). Lines such as "3. Disclose
//! changes in ownership" or "The changes are as follows:" stay content.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{Citation, RawModelReply, StructuredComplianceResponse};

use super::text_normalizer::collapse_whitespace;

static NUMBERED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:#{1,6}\s*)?(?:\*\*|__)?\s*([1-5])[.)]\s+(.+)$").unwrap()
});

static MARKDOWN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#{1,6}\s+(?:\d{1,2}[.)]\s+)?(.+)$").unwrap());

static ITEM_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-*+•–—]\s+|\d{1,3}[.)]\s+|\(?[a-zA-Z]\)\s+|\[[ xX]\]\s+)").unwrap()
});

/// Labels longer than this are prose, not headings.
const MAX_HEADING_WORDS: usize = 8;
/// Stricter limit for labels without explicit heading markup.
const MAX_BARE_LABEL_WORDS: usize = 4;

/// Word limits for one kind of heading line.
#[derive(Clone, Copy)]
struct LabelRules {
    /// Limit for a label with no colon; zero means a colon is required.
    bare_words: usize,
    colon_words: usize,
}

const NUMBERED_LABEL: LabelRules = LabelRules {
    bare_words: MAX_BARE_LABEL_WORDS,
    colon_words: MAX_HEADING_WORDS,
};

const MARKUP_LABEL: LabelRules = LabelRules {
    bare_words: MAX_HEADING_WORDS,
    colon_words: MAX_HEADING_WORDS,
};

const PARAGRAPH_LABEL: LabelRules = LabelRules {
    bare_words: MAX_BARE_LABEL_WORDS,
    colon_words: MAX_BARE_LABEL_WORDS,
};

const INLINE_LABEL: LabelRules = LabelRules {
    bare_words: 0,
    colon_words: MAX_BARE_LABEL_WORDS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Summary,
    Obligations,
    RecentChanges,
    Citations,
    Risks,
    Jurisdiction,
}

const TOPIC_KEYWORDS: [(&str, Topic); 11] = [
    ("summary", Topic::Summary),
    ("obligation", Topic::Obligations),
    ("change", Topic::RecentChanges),
    ("amendment", Topic::RecentChanges),
    ("citation", Topic::Citations),
    ("source", Topic::Citations),
    ("reference", Topic::Citations),
    ("risk", Topic::Risks),
    ("penalt", Topic::Risks),
    ("jurisdiction", Topic::Jurisdiction),
    ("region", Topic::Jurisdiction),
];

/// Words allowed in front of the topic word of a section label.
const LABEL_QUALIFIERS: [&str; 20] = [
    "key",
    "main",
    "primary",
    "principal",
    "major",
    "important",
    "notable",
    "relevant",
    "applicable",
    "potential",
    "legal",
    "regulatory",
    "recent",
    "upcoming",
    "new",
    "compliance",
    "non",
    "requirements",
    "executive",
    "overall",
];

fn label_words(label: &str) -> impl Iterator<Item = String> + '_ {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

fn keyword_topic(word: &str) -> Option<Topic> {
    TOPIC_KEYWORDS
        .iter()
        .find(|(keyword, _)| word.starts_with(keyword))
        .map(|(_, topic)| *topic)
}

impl Topic {
    /// Case-insensitive word-prefix match; the earliest topic word in the
    /// label decides ("Recent changes to obligations" is a change section).
    pub fn classify(label: &str) -> Option<Topic> {
        label_words(label).find_map(|word| keyword_topic(&word))
    }

    /// Like [`Topic::classify`], but only words from the qualifier list may
    /// come before the topic word.
    pub fn classify_label(label: &str) -> Option<Topic> {
        for word in label_words(label) {
            if let Some(topic) = keyword_topic(&word) {
                return Some(topic);
            }
            if !LABEL_QUALIFIERS.contains(&word.as_str()) {
                return None;
            }
        }
        None
    }
}

/// One detected rubric section: its topic and the lines under its marker.
///
/// Text on the marker line after the label colon is the first body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub topic: Topic,
    pub body: Vec<String>,
}

/// Sections found by one pass, plus the lines before the first of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSplit {
    pub preamble: Vec<String>,
    pub sections: Vec<Section>,
}

struct Heading {
    topic: Topic,
    inline: String,
}

pub fn structure(reply: &RawModelReply) -> StructuredComplianceResponse {
    let text = reply.text.as_str();

    if let Some(split) = numbered_sections(text) {
        tracing::debug!(sections = split.sections.len(), "Structured reply from numbered sections");
        return assemble(split, text);
    }

    if let Some(split) = heading_sections(text) {
        tracing::debug!(sections = split.sections.len(), "Structured reply from headings");
        return assemble(split, text);
    }

    let mut structured = StructuredComplianceResponse::unstructured(text);
    structured.summary = whole_text_summary(text);
    if structured.summary.is_some() {
        tracing::debug!("No rubric structure found, reply kept as summary");
    }
    structured
}

/// Pass 1: splits on `1.`..`5.` markers whose label names a topic.
///
/// Marker numbers must increase, so a numbered list inside a section stays
/// part of that section. An unnumbered jurisdiction heading also opens a
/// section, since the rubric asks for it after the five numbered topics.
pub fn numbered_sections(text: &str) -> Option<SectionSplit> {
    let lines: Vec<&str> = text.lines().collect();
    let mut last_number = 0u8;

    split_sections(&lines, |index| {
        let line = lines[index];
        if let Some(caps) = NUMBERED_MARKER.captures(line) {
            let number: u8 = caps[1].parse().unwrap_or(0);
            if number > last_number {
                if let Some(heading) = parse_label(&caps[2], NUMBERED_LABEL) {
                    last_number = number;
                    return Some(heading);
                }
            }
            return None;
        }

        if ITEM_MARKER.is_match(line.trim()) {
            return None;
        }
        heading_line(&lines, index)
            .or_else(|| parse_label(line, INLINE_LABEL))
            .filter(|h| h.topic == Topic::Jurisdiction)
    })
}

/// Pass 2: splits on markdown headings, bold label lines and
/// paragraph-leading `Label:` lines.
pub fn heading_sections(text: &str) -> Option<SectionSplit> {
    let lines: Vec<&str> = text.lines().collect();
    split_sections(&lines, |index| heading_line(&lines, index))
}

/// Pass 3: the whole reply, whitespace-collapsed, as a summary.
pub fn whole_text_summary(text: &str) -> Option<String> {
    let summary = collapse_whitespace(text);
    (!summary.is_empty()).then_some(summary)
}

fn split_sections(
    lines: &[&str],
    mut detect: impl FnMut(usize) -> Option<Heading>,
) -> Option<SectionSplit> {
    let mut preamble: Vec<String> = Vec::new();
    let mut sections: Vec<Section> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if let Some(heading) = detect(index) {
            let mut body = Vec::new();
            if !heading.inline.is_empty() {
                body.push(heading.inline);
            }
            sections.push(Section {
                topic: heading.topic,
                body,
            });
        } else if let Some(current) = sections.last_mut() {
            current.body.push((*line).to_string());
        } else {
            preamble.push((*line).to_string());
        }
    }

    (!sections.is_empty()).then_some(SectionSplit { preamble, sections })
}

fn heading_line(lines: &[&str], index: usize) -> Option<Heading> {
    let line = lines[index].trim();
    if line.is_empty() {
        return None;
    }

    if let Some(caps) = MARKDOWN_HEADING.captures(line) {
        return parse_label(&caps[1], MARKUP_LABEL);
    }

    if line.starts_with("**") || line.starts_with("__") {
        return parse_label(line, MARKUP_LABEL);
    }

    let starts_paragraph = index == 0 || lines[index - 1].trim().is_empty();
    if starts_paragraph && !ITEM_MARKER.is_match(line) {
        return parse_label(line, PARAGRAPH_LABEL);
    }

    None
}

fn is_markup(c: char) -> bool {
    c == '*' || c == '_' || c == '#' || c.is_whitespace()
}

/// Reads `Label: inline text` or a bare `Label`, stripping emphasis markup.
///
/// A label without a colon must not read like a sentence.
fn parse_label(rest: &str, rules: LabelRules) -> Option<Heading> {
    let (label, inline, has_colon) = match rest.find(':') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..], true),
        None => (rest, "", false),
    };

    let label = label.trim_matches(is_markup);
    if label.is_empty() {
        return None;
    }

    let word_limit = if has_colon {
        rules.colon_words
    } else {
        rules.bare_words
    };
    if label.split_whitespace().count() > word_limit {
        return None;
    }
    if !has_colon && label.ends_with(['.', '!', '?']) {
        return None;
    }

    let topic = Topic::classify_label(label)?;
    let inline = inline.trim_start_matches(is_markup).trim_end().to_string();

    Some(Heading { topic, inline })
}

fn assemble(split: SectionSplit, raw_text: &str) -> StructuredComplianceResponse {
    let mut structured = StructuredComplianceResponse::unstructured(raw_text);
    let has_summary_section = split.sections.iter().any(|s| s.topic == Topic::Summary);

    for section in split.sections {
        match section.topic {
            Topic::Summary => append_prose(&mut structured.summary, &section.body),
            Topic::Jurisdiction => append_prose(&mut structured.jurisdictional_notes, &section.body),
            Topic::Obligations => structured.obligations.extend(list_items(&section.body)),
            Topic::RecentChanges => structured.recent_changes.extend(list_items(&section.body)),
            Topic::Risks => structured.risks.extend(list_items(&section.body)),
            Topic::Citations => structured.citations.extend(
                list_items(&section.body)
                    .iter()
                    .map(|item| parse_citation(item)),
            ),
        }
    }

    if !has_summary_section {
        let preamble: Vec<String> = split.preamble.iter().map(|l| preamble_line(l)).collect();
        append_prose(&mut structured.summary, &preamble);
    }

    structured
}

/// Text before the first section stands in for a missing summary. A leading
/// `1. Some Label:` whose label names no topic is dropped down to its text.
fn preamble_line(line: &str) -> String {
    let Some(caps) = NUMBERED_MARKER.captures(line) else {
        return line.to_string();
    };
    let rest = caps[2].trim();

    match rest.split_once(':') {
        Some((label, text)) if is_unknown_label(label) => {
            text.trim_matches(is_markup).to_string()
        }
        _ => rest.trim_matches(is_markup).to_string(),
    }
}

fn is_unknown_label(label: &str) -> bool {
    let label = label.trim_matches(is_markup);
    !label.is_empty()
        && label.split_whitespace().count() <= MAX_HEADING_WORDS
        && !label.ends_with(['.', '!', '?'])
}

fn append_prose(target: &mut Option<String>, body: &[String]) {
    let text = collapse_whitespace(&body.join(" "));
    if text.is_empty() || is_placeholder(&text) {
        return;
    }

    match target {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(&text);
        }
        None => *target = Some(text),
    }
}

/// One item per non-empty line, with bullet and numbering markers removed.
///
/// Lines that only say there is nothing to report ("None", "N/A",
/// "No changes identified") are dropped, so an explicit "none" and a missing
/// section look the same.
pub fn list_items<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !is_rule(line))
        .map(|line| ITEM_MARKER.replace(line, "").trim().to_string())
        .filter(|item| !item.is_empty() && !is_placeholder(item))
        .collect()
}

/// Splits a citation line into source and text.
///
/// Recognized shapes, in order: `source: text`, `source — text`, and
/// `text (source)`. Anything else is all text with an empty source.
pub fn parse_citation(item: &str) -> Citation {
    let item = item.trim();

    if let Some((source, text)) = item.split_once(": ") {
        return citation_parts(text, source, item);
    }

    for dash in [" — ", " – ", "—"] {
        if let Some((source, text)) = item.split_once(dash) {
            return citation_parts(text, source, item);
        }
    }

    if let Some(without_paren) = item.strip_suffix(')') {
        if let Some(open) = without_paren.rfind('(') {
            let text = &without_paren[..open];
            let source = &without_paren[open + 1..];
            if !text.trim().is_empty() {
                return citation_parts(text, source, item);
            }
        }
    }

    Citation::new(item, "")
}

fn citation_parts(text: &str, source: &str, whole: &str) -> Citation {
    let clean = |s: &str| s.trim().trim_matches(|c: char| c == '*' || c == '_').trim().to_string();
    let text = clean(text);
    let source = clean(source);

    match (text.is_empty(), source.is_empty()) {
        (false, _) => Citation::new(text, source),
        (true, false) => Citation::new(source, ""),
        (true, true) => Citation::new(whole, ""),
    }
}

fn is_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| matches!(c, '-' | '*' | '_' | '='))
}

fn is_placeholder(text: &str) -> bool {
    let normalized = text
        .trim()
        .trim_end_matches(['.', '!'])
        .trim()
        .to_lowercase();

    matches!(
        normalized.as_str(),
        "none" | "n/a" | "na" | "not applicable" | "nothing to report"
    ) || (normalized.starts_with("none ") && normalized.split_whitespace().count() <= 3)
        || (normalized.starts_with("no ")
            && (normalized.ends_with(" found") || normalized.ends_with(" identified")))
}
