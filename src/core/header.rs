/// Extract the header of a chapter: its first non-empty line, trimmed.
///
/// Lines are split on `\n`, `\r\n` and bare `\r`. Trimming removes Unicode
/// whitespace and the ASCII separator controls `\x1c`..=`\x1f`. Returns an
/// empty string when every line is blank.
///
/// # Examples
///
/// ```
/// use chapter_reconciler::core::header::extract_header;
///
/// assert_eq!(extract_header("\n\n  Chapter 3: The Road  \nIt was late."), "Chapter 3: The Road");
/// assert_eq!(extract_header("   \n\t\n"), "");
/// ```
#[must_use]
pub fn extract_header(text: &str) -> &str {
    text.split(['\n', '\r'])
        .map(|line| line.trim_matches(is_header_space))
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

fn is_header_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Canonicalize a header for comparison.
///
/// The header is lowercased, then every character that is not an ASCII
/// lowercase letter or digit is dropped. Nothing is substituted, so
/// `"Chapter 12 - Intro"` becomes `"chapter12intro"`.
///
/// # Examples
///
/// ```
/// use chapter_reconciler::core::header::normalize_header;
///
/// assert_eq!(normalize_header("Chapter 12 - Intro"), "chapter12intro");
/// assert_eq!(normalize_header("***"), "");
/// ```
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
