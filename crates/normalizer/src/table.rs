//! Uniformly-keyed tabular view over normalized records.

use crate::models::{CommitRecord, IssueRecord};

/// A record kind with a fixed, ordered column set.
pub trait Tabular {
    const COLUMNS: &'static [&'static str];

    /// One cell per column, in `COLUMNS` order. Absent values are empty.
    fn cells(&self) -> Vec<String>;
}

impl Tabular for CommitRecord {
    const COLUMNS: &'static [&'static str] = &["sha", "author", "email", "date", "message"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.sha.clone(),
            self.author.clone(),
            self.email.clone(),
            self.date.clone(),
            self.message.clone(),
        ]
    }
}

impl Tabular for IssueRecord {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "number",
        "title",
        "user",
        "state",
        "created_at",
        "closed_at",
        "open_duration_days",
        "comments",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.number.to_string(),
            self.title.clone(),
            self.user.clone(),
            self.state.to_string(),
            self.created_at.clone(),
            self.closed_at.clone().unwrap_or_default(),
            self.open_duration_days
                .map(|days| days.to_string())
                .unwrap_or_default(),
            self.comments.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame<R> {
    records: Vec<R>,
}

impl<R: Tabular> Frame<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records.iter().map(Tabular::cells)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Tabular> FromIterator<R> for Frame<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
