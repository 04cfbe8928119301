//! Strategies that turn a `Movie` into the text handed to the embedding model.
//!
//! Each strategy has a canonical name. The name ends up in index cache keys,
//! so renaming a variant's name invalidates every index built with it.

use std::fmt;
use std::str::FromStr;

use retrieval_core::types::Movie;
use retrieval_core::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextToEmbedFn {
    #[default]
    EnrichedText,
    PlainTitle,
    TitleAndOverview,
}

impl TextToEmbedFn {
    pub const ALL: [TextToEmbedFn; 3] = [
        TextToEmbedFn::EnrichedText,
        TextToEmbedFn::PlainTitle,
        TextToEmbedFn::TitleAndOverview,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextToEmbedFn::EnrichedText => "get_enriched_text",
            TextToEmbedFn::PlainTitle => "get_plain_title",
            TextToEmbedFn::TitleAndOverview => "get_title_and_overview",
        }
    }

    pub fn apply(self, movie: &Movie) -> String {
        match self {
            TextToEmbedFn::EnrichedText => get_enriched_text(movie),
            TextToEmbedFn::PlainTitle => get_plain_title(movie),
            TextToEmbedFn::TitleAndOverview => get_title_and_overview(movie),
        }
    }
}

impl fmt::Display for TextToEmbedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextToEmbedFn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s.trim())
            .ok_or_else(|| Error::UnknownFunction(s.to_string()))
    }
}

/// Labelled sections, one per line, skipping anything the record leaves empty:
///
/// ```text
/// Title: The Matrix
/// Year: 1999
/// Genres: Action, Science Fiction
/// Director: Lana Wachowski
/// Cast: Keanu Reeves, Carrie-Anne Moss
/// Keywords: simulation, hacker
/// Overview: A computer hacker learns ...
/// ```
///
/// An `original_title` that differs from `title` is appended in parentheses.
pub fn get_enriched_text(movie: &Movie) -> String {
    let mut sections = Vec::new();

    let title = movie.title.trim();
    match movie.original_title.as_deref().map(str::trim) {
        Some(original) if !original.is_empty() && original != title => {
            sections.push(format!("Title: {} ({})", title, original));
        }
        _ if !title.is_empty() => sections.push(format!("Title: {}", title)),
        _ => {}
    }
    if let Some(year) = movie.release_year {
        sections.push(format!("Year: {}", year));
    }
    push_list(&mut sections, "Genres", &movie.genres);
    if let Some(director) = movie.director.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        sections.push(format!("Director: {}", director));
    }
    push_list(&mut sections, "Cast", &movie.cast);
    push_list(&mut sections, "Keywords", &movie.keywords);
    let overview = movie.overview.trim();
    if !overview.is_empty() {
        sections.push(format!("Overview: {}", overview));
    }

    sections.join("\n")
}

pub fn get_plain_title(movie: &Movie) -> String {
    movie.title.trim().to_string()
}

pub fn get_title_and_overview(movie: &Movie) -> String {
    let title = movie.title.trim();
    let overview = movie.overview.trim();
    match (title.is_empty(), overview.is_empty()) {
        (_, true) => title.to_string(),
        (true, false) => overview.to_string(),
        (false, false) => format!("{}. {}", title.trim_end_matches('.'), overview),
    }
}

fn push_list(sections: &mut Vec<String>, label: &str, items: &[String]) {
    let items: Vec<&str> = items.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
    if !items.is_empty() {
        sections.push(format!("{}: {}", label, items.join(", ")));
    }
}
