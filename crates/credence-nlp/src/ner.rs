//! Rule-based named-entity recognition
//!
//! Dates are found first with patterns and masked out. Remaining runs of
//! capitalized words are then classified using the lexicon, keyword cues
//! (organization and event suffixes, personal titles, reporting verbs) and
//! the shape of the run.

use crate::{Lexicon, NlpError};
use credence_domain::traits::Sentence;
use credence_domain::{Entity, EntityLabel};
use regex::Regex;
use std::collections::HashSet;

const MONTHS: &str = "January|February|March|April|June|July|August|September|October|November|December";

/// Capitalized words that do not begin a name
const NON_NAME_WORDS: &[&str] = &[
    "The", "A", "An", "This", "That", "These", "Those", "It", "Its", "He", "She", "They", "We",
    "You", "I", "In", "On", "At", "After", "Before", "However", "But", "And", "Or", "So", "Yet",
    "Many", "Some", "Several", "Few", "All", "Every", "Everyone", "Everybody", "Most", "No",
    "According", "When", "While", "If", "As", "For", "With", "From", "By", "Our", "Their",
    "His", "Her", "My", "Your", "There", "Here", "What", "Who", "Why", "How", "Where", "Which",
    "Despite", "Although", "Because", "Since", "Meanwhile", "Also", "Still", "Then", "Now",
    "Later", "Earlier", "Recently", "Separately", "Instead", "Finally", "Moreover", "Thus",
    "Experts", "Officials", "Researchers", "Scientists", "People", "Critics", "Analysts",
];

/// Lowercase words allowed inside a multi-word name
const CONNECTORS: &[&str] = &["of", "the", "for", "de", "van", "von", "la", "del", "&"];

const TITLES: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Professor", "President", "Senator", "Sen", "Rep",
    "Representative", "Governor", "Gov", "Judge", "Justice", "Minister", "Chancellor", "King",
    "Queen", "Prince", "Princess", "Pope", "Sir", "Dame", "CEO", "Chairman", "Chairwoman",
    "Secretary", "Gen", "Captain", "Capt", "Coach", "Mayor",
];

const REPORTING_VERBS: &[&str] = &[
    "said", "says", "told", "added", "explained", "wrote", "argued", "claimed", "announced",
    "stated", "noted", "reported",
];

const ORG_KEYWORDS: &[&str] = &[
    "Inc", "Corp", "Corporation", "Company", "Co", "Ltd", "LLC", "Group", "Bank", "University",
    "College", "Institute", "Association", "Agency", "Department", "Ministry", "Council",
    "Committee", "Foundation", "Party", "Commission", "Organization", "Organisation", "Society",
    "Times", "News", "Post", "Federation", "Union", "Authority", "Board", "Court", "Parliament",
    "Police", "Army", "Navy", "Laboratory", "Labs", "Hospital", "School", "Airlines", "Motors",
    "Technologies", "Systems", "Holdings", "Partners", "Network", "Club", "Reserve",
];

const EVENT_SUFFIXES: &[&str] = &[
    "War", "Olympics", "Games", "Summit", "Festival", "Championship", "Championships", "Cup",
    "Conference", "Election", "Revolution", "Crisis", "Expo", "Marathon", "Tournament",
    "Awards", "Fair", "Bowl", "Pandemic",
];

const EVENT_PREFIXES: &[&str] = &["Battle", "Hurricane", "Operation", "Siege", "Treaty", "Storm"];

const LOCATION_SUFFIXES: &[&str] = &[
    "City", "County", "River", "Lake", "Mountain", "Mountains", "Island", "Islands", "Valley",
    "Province", "Bay", "Ocean", "Sea", "Street", "Avenue", "Park", "Republic", "Kingdom",
    "Coast", "Desert", "Peninsula", "Region", "District",
];

const LOCATION_PREFIXES: &[&str] = &[
    "Bay", "Gulf", "Lake", "Mount", "Cape", "Port", "Isle", "Strait",
];

const LOCATION_PREPOSITIONS: &[&str] = &["in", "from", "across", "near", "throughout", "to"];

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl Token<'_> {
    fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    fn is_acronym(&self) -> bool {
        let letters = self.text.chars().filter(|c| c.is_alphabetic()).count();
        (2..=6).contains(&letters)
            && self
                .text
                .chars()
                .all(|c| c.is_uppercase() || c.is_ascii_digit() || c == '.' || c == '&')
    }
}

/// Recognizes the five supported entity labels in English text
pub struct EntityRecognizer {
    lexicon: Lexicon,
    date_patterns: Vec<Regex>,
    token_pattern: Regex,
}

impl EntityRecognizer {
    /// Create a recognizer backed by `lexicon`
    pub fn new(lexicon: Lexicon) -> Result<Self, NlpError> {
        Ok(Self {
            lexicon,
            date_patterns: Self::build_date_patterns()?,
            token_pattern: Regex::new(r"[\p{L}\p{N}]+(?:['’.&\-][\p{L}\p{N}]+)*")?,
        })
    }

    fn build_date_patterns() -> Result<Vec<Regex>, NlpError> {
        let patterns = [
            // March 3, 2024 / March 2024 / March
            format!(r"\b(?:{MONTHS})(?:\s+\d{{1,2}}(?:st|nd|rd|th)?)?(?:,?\s+\d{{4}})?\b"),
            // May needs a day or year to be told apart from the verb
            r"\bMay(?:\s+\d{1,2}(?:st|nd|rd|th)?(?:,?\s+\d{4})?|,?\s+\d{4})\b".to_string(),
            // 3 March 2024
            format!(r"\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS}|May)(?:,?\s+\d{{4}})?\b"),
            r"\b(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b".to_string(),
            r"\b\d{4}-\d{2}-\d{2}\b".to_string(),
            r"\b\d{1,2}/\d{1,2}/\d{2,4}\b".to_string(),
            r"\b(?:1[6-9]\d{2}|20\d{2})s?\b".to_string(),
            concat!(
                r"(?i)\b(?:yesterday|today|tomorrow",
                r"|(?:last|next|this|past)\s+(?:week|month|year|decade|century|weekend|spring|summer|fall|autumn|winter)",
                r"|(?:\d+|two|three|four|five|six|seven|eight|nine|ten)\s+(?:days|weeks|months|years|decades)\s+ago)\b"
            )
            .to_string(),
        ];

        patterns
            .iter()
            .map(|p| Regex::new(p).map_err(NlpError::from))
            .collect()
    }

    /// Recognize entities in `text`, using `sentences` for sentence-start context
    ///
    /// Entities are returned in order of first appearance; repeated mentions
    /// of the same surface text are reported once.
    pub fn recognize(&self, text: &str, sentences: &[Sentence]) -> Vec<Entity> {
        let mut found: Vec<(usize, String, EntityLabel)> = Vec::new();

        for sentence in sentences {
            let body = &text[sentence.start..sentence.end];
            let dates = self.find_dates(body, sentence.start);
            for (start, end) in &dates {
                found.push((*start, text[*start..*end].to_string(), EntityLabel::Date));
            }

            let tokens: Vec<Token> = self
                .token_pattern
                .find_iter(body)
                .map(|m| Token {
                    text: m.as_str(),
                    start: sentence.start + m.start(),
                    end: sentence.start + m.end(),
                })
                .filter(|t| !dates.iter().any(|(s, e)| t.start < *e && t.end > *s))
                .collect();

            for (first, last) in self.name_runs(text, &tokens) {
                if let Some((start, name, label)) = self.classify(text, &tokens, first, last) {
                    found.push((start, name, label));
                }
            }
        }

        found.sort_by_key(|(start, _, _)| *start);

        let mut seen = HashSet::new();
        found
            .into_iter()
            .filter(|(_, name, _)| seen.insert(name.clone()))
            .map(|(_, name, label)| Entity::new(name, label))
            .collect()
    }

    /// Non-overlapping date spans (absolute byte offsets), longest match first
    fn find_dates(&self, body: &str, offset: usize) -> Vec<(usize, usize)> {
        let mut spans: Vec<(usize, usize)> = self
            .date_patterns
            .iter()
            .flat_map(|p| p.find_iter(body).map(|m| (offset + m.start(), offset + m.end())))
            .collect();
        spans.sort_by(|a, b| a.0.cmp(&b.0).then((b.1 - b.0).cmp(&(a.1 - a.0))));

        let mut kept: Vec<(usize, usize)> = Vec::new();
        for span in spans {
            if kept.last().map_or(true, |last| span.0 >= last.1) {
                kept.push(span);
            }
        }
        kept
    }

    /// Inclusive token index ranges of capitalized runs
    fn name_runs(&self, text: &str, tokens: &[Token]) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut current: Option<(usize, usize)> = None;

        for (i, token) in tokens.iter().enumerate() {
            let adjacent = i > 0 && text[tokens[i - 1].end..token.start].trim().is_empty();
            let continues = adjacent && current.is_some_and(|(_, last)| last + 1 == i);

            if token.is_capitalized() {
                current = match current.take() {
                    Some((first, _)) if continues => Some((first, i)),
                    Some(run) => {
                        runs.push(run);
                        Some((i, i))
                    }
                    None => Some((i, i)),
                };
            } else if continues
                && CONNECTORS.contains(&token.text)
                && tokens.get(i + 1).is_some_and(|next| {
                    next.is_capitalized() && text[token.end..next.start].trim().is_empty()
                })
            {
                // Connector is kept only when a capitalized word follows
                current = current.map(|(first, _)| (first, i));
            } else if let Some(run) = current.take() {
                runs.push(run);
            }
        }
        if let Some(run) = current {
            runs.push(run);
        }
        runs
    }

    fn classify(
        &self,
        text: &str,
        tokens: &[Token],
        first: usize,
        last: usize,
    ) -> Option<(usize, String, EntityLabel)> {
        let mut first = first;
        let mut last = last;
        let mut titled = first > 0 && is_title(tokens[first - 1].text);

        // Drop leading function words and titles, trailing connectors
        while first <= last
            && (NON_NAME_WORDS.contains(&tokens[first].text) || is_title(tokens[first].text))
        {
            titled |= is_title(tokens[first].text);
            first += 1;
        }
        while last >= first && CONNECTORS.contains(&tokens[last].text) {
            if last == 0 {
                return None;
            }
            last -= 1;
        }
        if first > last {
            return None;
        }

        let start = tokens[first].start;
        let name = strip_possessive(&text[start..tokens[last].end]);
        let run = &tokens[first..=last];
        let words: Vec<&str> = run.iter().map(|t| strip_possessive(t.text)).collect();
        let previous = first.checked_sub(1).map(|i| tokens[i].text.to_lowercase());
        let next = tokens.get(last + 1).map(|t| t.text.to_lowercase());

        if let Some(label) = self.lexicon.lookup(name) {
            return Some((start, name.to_string(), label));
        }

        let sentence_initial = first == 0;
        let single = run.len() == 1;

        let label = if EVENT_PREFIXES.contains(&words[0])
            || (!single && words.last().is_some_and(|w| EVENT_SUFFIXES.contains(w)))
        {
            EntityLabel::Event
        } else if words.iter().any(|w| ORG_KEYWORDS.contains(w)) && !single {
            EntityLabel::Organization
        } else if !single
            && (LOCATION_PREFIXES.contains(&words[0])
                || words.last().is_some_and(|w| LOCATION_SUFFIXES.contains(w)))
        {
            EntityLabel::Location
        } else if titled {
            EntityLabel::Person
        } else if run.iter().all(Token::is_acronym) {
            EntityLabel::Organization
        } else if previous
            .as_deref()
            .is_some_and(|p| LOCATION_PREPOSITIONS.contains(&p))
            && run.len() <= 3
            && !next.as_deref().is_some_and(|n| REPORTING_VERBS.contains(&n))
            && (!single || !sentence_initial)
        {
            EntityLabel::Location
        } else if run.len() <= 3
            && next.as_deref().is_some_and(|n| REPORTING_VERBS.contains(&n))
            && (!single || !sentence_initial)
        {
            EntityLabel::Person
        } else if (2..=3).contains(&run.len()) && words.iter().all(|w| is_titlecase_word(w)) {
            EntityLabel::Person
        } else if run.len() > 3 {
            EntityLabel::Organization
        } else {
            return None;
        };

        Some((start, name.to_string(), label))
    }
}

fn is_title(word: &str) -> bool {
    TITLES.contains(&word)
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("’s"))
        .unwrap_or(word)
}

/// Uppercase initial followed by lowercase letters (connectors allowed)
fn is_titlecase_word(word: &str) -> bool {
    if CONNECTORS.contains(&word) {
        return true;
    }
    let mut chars = word.chars();
    chars.next().is_some_and(char::is_uppercase)
        && chars.all(|c| c.is_lowercase() || c == '-' || c == '\'' || c == '’')
}
