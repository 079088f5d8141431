use rivalscan_core::{Post, ThemeCount};

/// Keyword-frequency counter over a post collection.
///
/// A keyword is counted once per post (substring containment over the
/// lower-cased title + body), ranked descending by count; ties keep the
/// keyword declaration order. Keywords no post mentioned are dropped.
pub struct ThemeExtractor {
    keywords: Vec<String>,
    top_n: usize,
}

impl ThemeExtractor {
    pub fn new(keywords: &[String], top_n: usize) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            top_n,
        }
    }

    pub fn extract<'a, I>(&self, posts: I) -> Vec<ThemeCount>
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut counts = vec![0u32; self.keywords.len()];
        for post in posts {
            let text = post.combined_text().to_lowercase();
            for (i, keyword) in self.keywords.iter().enumerate() {
                if text.contains(keyword.as_str()) {
                    counts[i] += 1;
                }
            }
        }

        let mut themes: Vec<ThemeCount> = self
            .keywords
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(theme, count)| ThemeCount {
                theme: theme.clone(),
                count,
            })
            .collect();

        // sort_by is stable, so equal counts keep declaration order
        themes.sort_by(|a, b| b.count.cmp(&a.count));
        themes.truncate(self.top_n);
        themes
    }
}
