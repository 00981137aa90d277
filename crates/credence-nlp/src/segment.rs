//! Sentence segmentation
//!
//! Splits on terminal punctuation followed by whitespace, and on blank lines.
//! A period does not end a sentence when it closes a known abbreviation or a
//! single-letter initial, or when the next word starts in lowercase.

use credence_domain::traits::Sentence;

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "e.g", "i.e", "inc", "corp",
    "ltd", "co", "no", "gen", "gov", "sen", "rep", "col", "lt", "sgt", "capt", "u.s", "u.k",
    "a.m", "p.m", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov",
    "dec", "approx", "est", "dept", "fig", "mt",
];

/// Split `text` into trimmed sentences with byte offsets into `text`
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];

        if c == '\n' && is_paragraph_break(&chars, i) {
            push_span(text, start, pos, &mut sentences);
            start = pos;
            i += 1;
            continue;
        }

        if matches!(c, '.' | '!' | '?') {
            // Swallow runs like "?!", "..." and closing quotes or brackets
            let mut j = i + 1;
            while j < chars.len()
                && (matches!(chars[j].1, '.' | '!' | '?') || is_closing(chars[j].1))
            {
                j += 1;
            }
            let end = chars.get(j).map_or(text.len(), |(p, _)| *p);
            let followed_by_space = chars.get(j).map_or(true, |(_, n)| n.is_whitespace());
            let abbreviation = c == '.' && j == i + 1 && is_abbreviation(text, pos);

            if followed_by_space && !abbreviation && !next_word_is_lowercase(&chars, j) {
                push_span(text, start, end, &mut sentences);
                start = end;
            }
            i = j;
            continue;
        }

        i += 1;
    }

    push_span(text, start, text.len(), &mut sentences);
    sentences
}

fn push_span(text: &str, start: usize, end: usize, out: &mut Vec<Sentence>) {
    let slice = &text[start..end];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let offset = start + (slice.len() - slice.trim_start().len());
    out.push(Sentence {
        text: trimmed.to_string(),
        start: offset,
        end: offset + trimmed.len(),
    });
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

/// A newline followed (after horizontal whitespace) by another newline
fn is_paragraph_break(chars: &[(usize, char)], i: usize) -> bool {
    chars[i + 1..]
        .iter()
        .map(|(_, c)| *c)
        .find(|c| *c != ' ' && *c != '\t' && *c != '\r')
        == Some('\n')
}

fn next_word_is_lowercase(chars: &[(usize, char)], from: usize) -> bool {
    chars[from..]
        .iter()
        .map(|(_, c)| *c)
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| c.is_lowercase())
}

/// Whether the word ending at the period at `dot` is an abbreviation or initial
fn is_abbreviation(text: &str, dot: usize) -> bool {
    let word = text[..dot]
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        return first.is_uppercase();
    }

    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}
