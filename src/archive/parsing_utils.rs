/// Marker that opens every post in the line format.
pub const POST_ID_MARKER: &str = "Post id: ";

/// Splits a line-format export into one group of lines per post.
/// A new group starts at every line beginning with [`POST_ID_MARKER`].
pub fn split_entries(content: &str) -> Vec<Vec<&str>> {
    let mut entries = vec![];
    let mut current: Vec<&str> = vec![];
    for line in content.lines() {
        if line.starts_with(POST_ID_MARKER) && !current.is_empty() {
            entries.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    if !current.is_empty() {
        entries.push(current);
    }
    entries
}

/// Suffix of the first line starting with `prefix`. Later duplicates are ignored.
pub fn line_starting_with<'a>(lines: &[&'a str], prefix: &str) -> Option<&'a str> {
    lines.iter()
        .find_map(|line| line.strip_prefix(prefix))
}

/// Lines from the first one starting with `left_prefix` (kept verbatim) up to,
/// but excluding, the next one starting with `right_prefix`. Without a right
/// prefix, or when it never shows up, collects to the end of the entry.
pub fn contents_between(lines: &[&str], left_prefix: &str, right_prefix: Option<&str>) -> String {
    let Some(start) = lines.iter().position(|line| line.starts_with(left_prefix)) else {
        return String::new();
    };

    let rest = &lines[start + 1..];
    let end = match right_prefix {
        Some(right) => rest.iter()
            .position(|line| line.starts_with(right))
            .unwrap_or(rest.len()),
        None => rest.len(),
    };

    lines[start..=start + end].join("\n")
}

#[cfg(test)]
mod tests {
    use crate::test_data::LEGACY_TEXTS;

    use super::*;

    #[test]
    fn test_split_round_trip() {
        for content in [LEGACY_TEXTS, "", "preamble\nPost id: 1\nDate: x", "Post id: 1\nPost id: 2\n\n"] {
            let entries = split_entries(content);
            let joined: Vec<&str> = entries.into_iter().flatten().collect();
            assert_eq!(joined, content.lines().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_split_entries() {
        let entries = split_entries("Post id: 1\nDate: a\nPost id: 2\nDate: b\nTags: x");
        assert_eq!(entries, vec![
            vec!["Post id: 1", "Date: a"],
            vec!["Post id: 2", "Date: b", "Tags: x"],
        ]);
        assert!(split_entries("").is_empty());
    }

    #[test]
    fn test_line_starting_with_first_wins() {
        let lines = ["Post id: 1", "Title: first", "Title: second"];
        assert_eq!(line_starting_with(&lines, "Title: "), Some("first"));
        assert_eq!(line_starting_with(&lines, "Tags: "), None);
        assert_eq!(line_starting_with(&[], "Tags: "), None);
    }

    #[test]
    fn test_contents_between() {
        let lines = ["Post id: 1", "Title: hi", "<p>one</p>", "<p>two</p>", "Tags: a, b", "trailing"];
        assert_eq!(contents_between(&lines, "Title: ", Some("Tags: ")), "Title: hi\n<p>one</p>\n<p>two</p>");
        assert_eq!(contents_between(&lines, "Tags: ", Some("Tags: ")), "Tags: a, b\ntrailing");
        assert_eq!(contents_between(&lines, "Nope: ", Some("Tags: ")), "");
    }

    #[test]
    fn test_contents_between_without_right_match() {
        let lines = ["Post id: 1", "Video player: <video>", "<source src=\"x\">", "</video>"];
        assert_eq!(contents_between(&lines, "Video player: ", Some("Tags: ")),
                   "Video player: <video>\n<source src=\"x\">\n</video>");
        assert_eq!(contents_between(&lines, "Video player: ", None),
                   "Video player: <video>\n<source src=\"x\">\n</video>");
    }
}
