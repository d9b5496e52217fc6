use std::collections::HashMap;

/// Song-name suggestions shown when the live search comes back empty.
/// Entries are plain names, never playable.
const DEFAULT_TABLE: &[(&str, &[&str])] = &[
    ("happy", &["Pharrell Williams - Happy", "Justin Timberlake - Can't Stop The Feeling"]),
    ("sad", &["Fix You - Coldplay", "Someone Like You - Adele"]),
    ("romantic", &["Perfect - Ed Sheeran", "Tum Hi Ho - Aashiqui 2"]),
    ("party", &["Uptown Funk", "Taki Taki"]),
    ("relaxing", &["Weightless - Marconi Union", "Let Her Go - Passenger"]),
];

#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    table: HashMap<String, Vec<String>>,
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        FallbackCatalog::from_pairs(DEFAULT_TABLE.iter().map(|(mood, songs)| {
            (mood.to_string(), songs.iter().map(|s| s.to_string()).collect())
        }))
    }
}

impl FallbackCatalog {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let table = pairs
            .into_iter()
            .map(|(mood, songs)| (mood.trim().to_lowercase(), songs))
            .collect();
        FallbackCatalog { table }
    }

    /// Empty for moods the table doesn't know.
    pub fn lookup(&self, mood: &str) -> Vec<String> {
        self.table
            .get(&mood.trim().to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}
