//! Genre label to TMDB genre id table.

use std::collections::{BTreeMap, HashSet};

/// The built-in label table, keyed by the Chinese genre names the front end offers.
const STANDARD_GENRES: &[(&str, &[u32])] = &[
    ("动作", &[28]),
    ("冒险", &[12]),
    ("喜剧", &[35]),
    ("犯罪", &[80]),
    ("纪录片", &[99]),
    ("剧情", &[18]),
    ("家庭", &[10751]),
    ("奇幻", &[14]),
    ("历史", &[36]),
    ("恐怖", &[27]),
    ("音乐", &[10402]),
    ("悬疑", &[9648]),
    ("爱情", &[10749]),
    ("科幻", &[878]),
    ("惊悚", &[53]),
    ("战争", &[10752]),
    ("西部", &[37]),
];

/// Read-only mapping from human genre labels to upstream genre identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreMap {
    entries: BTreeMap<String, Vec<u32>>,
}

impl GenreMap {
    pub fn standard() -> Self {
        Self::from_entries(
            STANDARD_GENRES
                .iter()
                .map(|(label, ids)| (label.to_string(), ids.to_vec())),
        )
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, Vec<u32>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse a `{"label": [id, ...]}` JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: BTreeMap<String, Vec<u32>> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn get(&self, label: &str) -> Option<&[u32]> {
        self.entries.get(label).map(Vec::as_slice)
    }

    /// Resolve labels to a de-duplicated id list in first-seen order.
    /// Unknown labels contribute nothing.
    pub fn resolve<S: AsRef<str>>(&self, labels: &[S]) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for label in labels {
            let Some(found) = self.get(label.as_ref()) else {
                continue;
            };
            for &id in found {
                if seen.insert(id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// Labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GenreMap {
    fn default() -> Self {
        Self::standard()
    }
}
