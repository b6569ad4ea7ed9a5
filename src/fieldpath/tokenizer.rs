//! Field name tokenizer.

use super::ast::{FieldPath, PathSegment};

/// Tokenizer for bracket-notation field names.
///
/// Names never fail to tokenize: characters that do not form a bracket group
/// stay part of the surrounding key, and empty pieces (`a..b`, a leading `.`)
/// are dropped.
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    piece: String,
    segments: Vec<PathSegment>,
}

impl Tokenizer {
    /// Creates a tokenizer for the given field name.
    pub fn new(name: &str) -> Self {
        Self {
            input: name.chars().collect(),
            position: 0,
            piece: String::new(),
            segments: Vec::new(),
        }
    }

    /// Tokenizes a field name into a path.
    ///
    /// A name without brackets or dots yields a single key. `x[]` yields
    /// `[Key(x), Append]`. The empty name yields an empty path.
    pub fn tokenize(name: &str) -> FieldPath {
        let mut tokenizer = Tokenizer::new(name);
        tokenizer.run();
        FieldPath::new(tokenizer.segments)
    }

    fn run(&mut self) {
        while let Some(ch) = self.next() {
            match ch {
                '.' => self.flush(),
                '[' => self.bracket(),
                other => self.piece.push(other),
            }
        }
        self.flush();
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Handles the text after an opening bracket.
    ///
    /// `[]` becomes an append marker. `[text]` starts a new piece holding
    /// `text` (itself split on dots); trailing characters after the closing
    /// bracket continue that piece, so `a[b]c` reads as `a.bc`. A bracket
    /// that is never closed is kept literally.
    fn bracket(&mut self) {
        if self.peek() == Some(']') {
            self.next();
            self.flush();
            self.segments.push(PathSegment::Append);
            return;
        }

        let close = self.input[self.position..]
            .iter()
            .position(|&ch| ch == ']')
            .map(|offset| self.position + offset);

        match close {
            Some(end) => {
                self.flush();
                let text: Vec<char> = self.input[self.position..end].to_vec();
                for ch in text {
                    if ch == '.' {
                        self.flush();
                    } else {
                        self.piece.push(ch);
                    }
                }
                self.position = end + 1;
            }
            None => self.piece.push('['),
        }
    }

    /// Turns the accumulated piece into a segment.
    fn flush(&mut self) {
        if self.piece.is_empty() {
            return;
        }
        let piece = std::mem::take(&mut self.piece);
        self.segments.push(classify(piece));
    }
}

/// Digit-only pieces are sequence positions, everything else is a key.
fn classify(piece: String) -> PathSegment {
    if piece.chars().all(|ch| ch.is_ascii_digit()) {
        if let Ok(index) = piece.parse::<usize>() {
            return PathSegment::Index(index);
        }
    }
    PathSegment::Key(piece)
}
