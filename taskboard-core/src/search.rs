use chrono::{Datelike, Duration, Local, NaiveDate};
use regex::Regex;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::types::{Board, ColumnType, Priority, Task};

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub use_regex: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    Any,
    None,
    Overdue,
    Today,
    Week,
    Future,
}

/// One task as seen by the search engine, with the context it lives in.
pub struct SearchDocument<'a> {
    pub board_title: &'a str,
    pub column_title: &'a str,
    pub column_type: ColumnType,
    pub task: &'a Task,
}

impl SearchDocument<'_> {
    /// Past due and not sitting in a done column.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.column_type != ColumnType::Done && self.task.is_past_due(today)
    }
}

#[derive(Debug)]
enum SearchTerm {
    Text(String),
    Board(String),
    Column(String),
    ColumnType(ColumnType),
    Priority(Priority),
    Assignee(String),
    Unassigned,
    Creator(String),
    Due(DueFilter),
    DueDate(NaiveDate),
    Regex(Regex),
}

#[derive(Debug)]
struct ParsedTerm {
    negate: bool,
    term: SearchTerm,
}

pub struct SearchEngine {
    terms: Vec<ParsedTerm>,
    regex_mode: Option<Regex>,
    regex_invalid: bool,
    case_sensitive: bool,
    today: NaiveDate,
    week_start: NaiveDate,
    week_end: NaiveDate,
}

impl SearchEngine {
    pub fn compile(raw_query: &str, options: SearchOptions) -> Self {
        Self::compile_at(raw_query, options, Local::now().date_naive())
    }

    /// Compile with an explicit notion of "today" for relative due filters.
    pub fn compile_at(raw_query: &str, options: SearchOptions, today: NaiveDate) -> Self {
        let query = raw_query.trim();
        let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let week_end = week_start + Duration::days(6);
        let mut engine = Self {
            terms: Vec::new(),
            regex_mode: None,
            regex_invalid: false,
            case_sensitive: options.case_sensitive,
            today,
            week_start,
            week_end,
        };

        if query.is_empty() {
            return engine;
        }

        if options.use_regex {
            match Regex::new(query) {
                Ok(regex) => engine.regex_mode = Some(regex),
                Err(_) => engine.regex_invalid = true,
            }
            return engine;
        }

        engine.terms = split_query_tokens(query)
            .into_iter()
            .filter_map(|token| parse_token(token, options.case_sensitive))
            .collect();
        engine
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.regex_mode.is_none() && !self.regex_invalid
    }

    pub fn matches(&self, doc: &SearchDocument<'_>) -> bool {
        if self.regex_invalid {
            return false;
        }

        if let Some(regex) = &self.regex_mode {
            return regex.is_match(&doc.task.title) || regex.is_match(&doc.task.description);
        }

        for parsed in &self.terms {
            let matched = self.matches_term(&parsed.term, doc);
            if parsed.negate {
                if matched {
                    return false;
                }
            } else if !matched {
                return false;
            }
        }
        true
    }

    fn matches_term(&self, term: &SearchTerm, doc: &SearchDocument<'_>) -> bool {
        let task = doc.task;
        match term {
            SearchTerm::Text(value) => {
                contains_text(&task.title, value, self.case_sensitive)
                    || contains_text(&task.description, value, self.case_sensitive)
            }
            SearchTerm::Board(value) => contains_text(doc.board_title, value, self.case_sensitive),
            SearchTerm::Column(value) => {
                contains_text(doc.column_title, value, self.case_sensitive)
            }
            SearchTerm::ColumnType(column_type) => doc.column_type == *column_type,
            SearchTerm::Priority(priority) => task.priority == *priority,
            SearchTerm::Assignee(value) => {
                task.is_assigned() && contains_text(&task.assigned_to, value, self.case_sensitive)
            }
            SearchTerm::Unassigned => !task.is_assigned(),
            SearchTerm::Creator(value) => {
                contains_text(&task.created_by, value, self.case_sensitive)
            }
            SearchTerm::Due(mode) => self.matches_due(*mode, doc),
            SearchTerm::DueDate(target) => task.due_date == Some(*target),
            SearchTerm::Regex(regex) => {
                regex.is_match(&task.title) || regex.is_match(&task.description)
            }
        }
    }

    fn matches_due(&self, mode: DueFilter, doc: &SearchDocument<'_>) -> bool {
        let due = doc.task.due_date;
        match mode {
            DueFilter::Any => due.is_some(),
            DueFilter::None => due.is_none(),
            DueFilter::Overdue => doc.is_overdue(self.today),
            DueFilter::Today => due == Some(self.today),
            DueFilter::Week => due
                .map(|d| d >= self.week_start && d <= self.week_end)
                .unwrap_or(false),
            DueFilter::Future => due.map(|d| d > self.today).unwrap_or(false),
        }
    }
}

/// A matching task with its location.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub board_id: String,
    pub board_title: String,
    pub column_id: String,
    pub column_title: String,
    pub task: Task,
}

/// Run `query` over every task of `boards`, in board/column/task order.
/// An empty query matches nothing.
pub fn search_tasks(boards: &[Board], query: &str, options: SearchOptions) -> Vec<SearchHit> {
    let engine = SearchEngine::compile(query, options);
    search_with(&engine, boards)
}

pub fn search_with(engine: &SearchEngine, boards: &[Board]) -> Vec<SearchHit> {
    if engine.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for board in boards {
        for column in &board.columns {
            for task in &column.tasks {
                let doc = SearchDocument {
                    board_title: &board.title,
                    column_title: &column.title,
                    column_type: column.column_type,
                    task,
                };
                if engine.matches(&doc) {
                    results.push(SearchHit {
                        board_id: board.id.clone(),
                        board_title: board.title.clone(),
                        column_id: column.id.clone(),
                        column_title: column.title.clone(),
                        task: task.clone(),
                    });
                }
            }
        }
    }
    results
}

/// Split on whitespace, honouring double quotes. A backslash escapes a quote,
/// a backslash or whitespace; before anything else it is kept. Tokens that
/// open with `/` (or `-/`) are regex terms and are copied verbatim up to the
/// next whitespace.
fn split_query_tokens(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_regex = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            in_regex = false;
            continue;
        }
        if in_regex {
            current.push(ch);
            continue;
        }
        if ch == '/' && !in_quotes && (current.is_empty() || current == "-") {
            in_regex = true;
            current.push(ch);
            continue;
        }
        if ch == '\\' {
            match chars.peek() {
                Some(&next) if next == '"' || next == '\\' || next.is_whitespace() => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push(ch),
            }
            continue;
        }
        if ch == '"' {
            in_quotes = !in_quotes;
            if !in_quotes && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_token(raw_token: String, case_sensitive: bool) -> Option<ParsedTerm> {
    let token = raw_token.trim();
    if token.is_empty() {
        return None;
    }

    let (negate, token) = match token.strip_prefix('-') {
        Some(rest) if !rest.is_empty() => (true, rest),
        _ => (false, token),
    };

    if let Some(name) = token.strip_prefix('@') {
        if !name.is_empty() {
            return Some(ParsedTerm {
                negate,
                term: SearchTerm::Assignee(normalize_case(name, case_sensitive)),
            });
        }
    }

    if token.starts_with('/') && token.ends_with('/') && token.len() > 2 {
        if let Ok(regex) = Regex::new(&token[1..token.len() - 1]) {
            return Some(ParsedTerm {
                negate,
                term: SearchTerm::Regex(regex),
            });
        }
    }

    if let Some((key_raw, value_raw)) = token.split_once(':') {
        let key = key_raw.to_ascii_lowercase();
        let value = value_raw.trim();
        if value.is_empty() {
            return None;
        }
        let term = match key.as_str() {
            "due" => parse_due_term(value),
            "board" => Some(SearchTerm::Board(normalize_case(value, case_sensitive))),
            "col" | "column" => Some(SearchTerm::Column(normalize_case(value, case_sensitive))),
            "type" => ColumnType::parse(value).map(SearchTerm::ColumnType),
            "p" | "prio" | "priority" => Priority::parse(value).map(SearchTerm::Priority),
            "assignee" | "assigned" | "to" => Some(match value.to_ascii_lowercase().as_str() {
                "none" | "nobody" => SearchTerm::Unassigned,
                _ => SearchTerm::Assignee(normalize_case(value, case_sensitive)),
            }),
            "by" | "creator" | "author" => {
                Some(SearchTerm::Creator(normalize_case(value, case_sensitive)))
            }
            _ => None,
        };
        if let Some(term) = term {
            return Some(ParsedTerm { negate, term });
        }
    }

    Some(ParsedTerm {
        negate,
        term: SearchTerm::Text(normalize_case(token, case_sensitive)),
    })
}

fn parse_due_term(value: &str) -> Option<SearchTerm> {
    match value.to_ascii_lowercase().as_str() {
        "any" => Some(SearchTerm::Due(DueFilter::Any)),
        "none" => Some(SearchTerm::Due(DueFilter::None)),
        "overdue" => Some(SearchTerm::Due(DueFilter::Overdue)),
        "today" => Some(SearchTerm::Due(DueFilter::Today)),
        "week" | "thisweek" => Some(SearchTerm::Due(DueFilter::Week)),
        "future" | "upcoming" => Some(SearchTerm::Due(DueFilter::Future)),
        _ => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .map(SearchTerm::DueDate),
    }
}

/// Unicode-aware normalization for search: lowercases, NFD-decomposes, and
/// strips combining marks (accents). This lets "resume" match "résumé".
fn normalize_for_search(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect()
}

fn normalize_case(value: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        value.to_string()
    } else {
        normalize_for_search(value)
    }
}

fn contains_text(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        haystack.contains(needle)
    } else {
        normalize_for_search(haystack).contains(&normalize_for_search(needle))
    }
}
