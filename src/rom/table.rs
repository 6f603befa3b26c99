use fxhash::FxHashMap;

use crate::vector::StrokeCode;

pub struct GlyphEntry {
    pub key: String,
    pub strokes: Vec<StrokeCode>,
}

/// Frozen character ROM: glyph stroke codes in load order, indexed by key.
///
/// Built once and shared read-only; nothing mutates a table after
/// construction, so one instance can serve any number of decode calls.
pub struct GlyphTable {
    glyphs: Vec<GlyphEntry>,
    lookup: FxHashMap<String, usize>,
}

impl GlyphTable {
    /// Build a table from `(key, words)` pairs. A repeated key replaces the
    /// earlier glyph in place, keeping its original position.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let mut glyphs: Vec<GlyphEntry> = Vec::new();
        let mut lookup: FxHashMap<String, usize> = FxHashMap::default();
        for (key, words) in entries {
            let strokes = words.into_iter().map(StrokeCode::new).collect();
            match lookup.get(&key) {
                Some(&index) => glyphs[index] = GlyphEntry { key, strokes },
                None => {
                    lookup.insert(key.clone(), glyphs.len());
                    glyphs.push(GlyphEntry { key, strokes });
                }
            }
        }
        Self { glyphs, lookup }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&[StrokeCode]> {
        self.lookup
            .get(key)
            .map(|&idx| self.glyphs[idx].strokes.as_slice())
    }

    /// Look up `key`, substituting the `fallback` glyph (usually the blank
    /// `" "`) when the ROM has no entry for it.
    pub fn get_or<'a>(&'a self, key: &str, fallback: &str) -> Option<&'a [StrokeCode]> {
        self.get(key).or_else(|| self.get(fallback))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(|entry| entry.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[StrokeCode])> {
        self.glyphs
            .iter()
            .map(|entry| (entry.key.as_str(), entry.strokes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Stroke count of the first glyph; listings keep every glyph the same length.
    pub fn glyph_len(&self) -> Option<usize> {
        self.glyphs.first().map(|entry| entry.strokes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GlyphTable {
        GlyphTable::from_entries(vec![
            ("A".to_string(), vec![0b01011, 0b00001]),
            (" ".to_string(), vec![0, 0]),
            ("B".to_string(), vec![0b1111_0000, 0b00101]),
        ])
    }

    #[test]
    fn test_lookup_and_order() {
        let table = sample();
        assert_eq!(table.len(), 3);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["A", " ", "B"]);
        assert_eq!(table.get("A").map(|g| g.len()), Some(2));
        assert!(table.get("Z").is_none());
        assert!(table.contains("B"));
        assert_eq!(table.glyph_len(), Some(2));
    }

    #[test]
    fn test_words_are_masked_on_load() {
        let table = sample();
        assert_eq!(table.get("B").unwrap()[0].bits(), 0b10000);
    }

    #[test]
    fn test_fallback_lookup() {
        let table = sample();
        let blank = table.get(" ").unwrap();
        assert_eq!(table.get_or("Z", " "), Some(blank));
        assert_eq!(table.get_or("A", " "), table.get("A"));
        assert!(table.get_or("Z", "Y").is_none());
    }

    #[test]
    fn test_repeated_key_replaces_in_place() {
        let table = GlyphTable::from_entries(vec![
            ("A".to_string(), vec![1]),
            ("B".to_string(), vec![2]),
            ("A".to_string(), vec![3]),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(table.get("A").unwrap()[0].bits(), 3);
    }

    #[test]
    fn test_empty_table() {
        let table = GlyphTable::from_entries(Vec::<(String, Vec<u8>)>::new());
        assert!(table.is_empty());
        assert_eq!(table.glyph_len(), None);
    }
}
