use std::fmt;
use serde::{Deserialize, Serialize};

// @module: Timed subtitle data model and its persisted record form

// @struct: Smallest timed unit
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    // @field: Displayed text
    pub text: String,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Recognition confidence in [0, 1]
    pub confidence: f64,
}

impl Word {
    /// Creates a new word
    pub fn new(text: impl Into<String>, start: f64, end: f64, confidence: f64) -> Self {
        Word {
            text: text.into(),
            start,
            end,
            confidence,
        }
    }
}

/// One displayed subtitle line
///
/// `start`/`end` are fixed when the segment is built from its words and are
/// never re-derived afterwards, so a later word correction may move a word
/// outside the segment's own range.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub words: Vec<Word>,
}

impl Segment {
    /// Creates a segment with explicit bounds
    pub fn new(start: f64, end: f64, text: impl Into<String>, words: Vec<Word>) -> Self {
        Segment {
            start,
            end,
            text: text.into(),
            words,
        }
    }

    /// Builds a segment whose bounds come from its first and last word and
    /// whose text is the words joined by a single space
    pub fn from_words(words: Vec<Word>) -> Option<Self> {
        let start = words.first()?.start;
        let end = words.last()?.end;
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Some(Segment { start, end, text, words })
    }

    /// Duration of the segment in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the creation-time invariant still holds: bounds match the
    /// outer words and words are ordered by non-decreasing start
    pub fn is_consistent(&self) -> bool {
        let (Some(first), Some(last)) = (self.words.first(), self.words.last()) else {
            return true;
        };

        first.start == self.start
            && last.end == self.end
            && self.words.windows(2).all(|pair| pair[0].start <= pair[1].start)
    }
}

/// Ordered collection of segments covering a media timeline
///
/// Serializes through its record form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "SubtitleRecord", into = "SubtitleRecord")]
pub struct SubtitleSet {
    segments: Vec<Segment>,
}

impl SubtitleSet {
    /// Create an empty subtitle set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a subtitle set from already ordered segments
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        SubtitleSet { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Mutable access to the segments, used by the correction applier
    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Look up a word by its (segment, word) address
    pub fn word(&self, segment_index: usize, word_index: usize) -> Option<&Word> {
        self.segments.get(segment_index)?.words.get(word_index)
    }

    /// Total number of words across all segments
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }

    /// End of the last segment, or zero for an empty set
    pub fn total_duration(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.end)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Convert to the plain record form used for persistence
    pub fn to_record(&self) -> SubtitleRecord {
        SubtitleRecord {
            segments: self.segments.iter().map(SegmentRecord::from).collect(),
        }
    }

    /// Rebuild a subtitle set from its record form
    pub fn from_record(record: SubtitleRecord) -> Self {
        SubtitleSet {
            segments: record.segments.into_iter().map(Segment::from).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SubtitleSet {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for SubtitleSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Set")?;
        writeln!(f, "Segments: {}", self.len())?;
        writeln!(f, "Words: {}", self.word_count())?;
        writeln!(f, "Duration: {:.1}s", self.total_duration())?;
        Ok(())
    }
}

/// Persisted form of a word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Word text
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// Persisted form of a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub words: Vec<WordRecord>,
}

/// Persisted form of a whole subtitle set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtitleRecord {
    pub segments: Vec<SegmentRecord>,
}

impl From<&Word> for WordRecord {
    fn from(word: &Word) -> Self {
        WordRecord {
            word: word.text.clone(),
            start: word.start,
            end: word.end,
            confidence: word.confidence,
        }
    }
}

impl From<WordRecord> for Word {
    fn from(record: WordRecord) -> Self {
        Word {
            text: record.word,
            start: record.start,
            end: record.end,
            confidence: record.confidence,
        }
    }
}

impl From<&Segment> for SegmentRecord {
    fn from(segment: &Segment) -> Self {
        SegmentRecord {
            start: segment.start,
            end: segment.end,
            text: segment.text.clone(),
            words: segment.words.iter().map(WordRecord::from).collect(),
        }
    }
}

impl From<SegmentRecord> for Segment {
    fn from(record: SegmentRecord) -> Self {
        Segment {
            start: record.start,
            end: record.end,
            text: record.text,
            words: record.words.into_iter().map(Word::from).collect(),
        }
    }
}

impl From<SubtitleRecord> for SubtitleSet {
    fn from(record: SubtitleRecord) -> Self {
        SubtitleSet::from_record(record)
    }
}

impl From<SubtitleSet> for SubtitleRecord {
    fn from(set: SubtitleSet) -> Self {
        set.to_record()
    }
}

/// Round a time value to one decimal place
///
/// Rounds the exact binary value, with exact ties going to the even digit,
/// so `0.35` (stored just below the tie) becomes `0.3` and `0.25` becomes `0.2`.
pub fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}
