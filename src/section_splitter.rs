/*!
 * Section splitting for extracted document text.
 *
 * Partitions raw text into ordered sections using a line-prefix heuristic:
 * a line whose first non-whitespace character is an ASCII digit opens a new
 * section. This deliberately cannot tell a numbered heading apart from a line
 * that merely happens to start with a digit (a date, a statistic); that
 * ambiguity is a documented limitation of the heuristic, not a bug.
 */

/// Split text into sections delimited by digit-leading lines.
///
/// Lines are delimited by `\n`. A line opens a new section when its trimmed
/// form starts with one of '0'-'9'. Non-trigger lines are appended to the
/// currently open section with a single space separator. Text appearing
/// before the first digit-leading line is dropped.
///
/// Edge cases:
/// - empty input returns an empty vector
/// - input with no digit-leading lines becomes exactly one section,
///   the trimmed input
pub fn split_numbered_sections(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut opened = false;

    for line in text.split('\n') {
        let triggers = line
            .trim()
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());

        if triggers {
            if opened && !current.trim().is_empty() {
                sections.push(current.trim().to_string());
            }
            current.clear();
            opened = true;
        }

        current.push_str(line);
        current.push(' ');
    }

    if !opened {
        // No digit-leading line anywhere: the whole text is one section
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![trimmed.to_string()];
    }

    if !current.trim().is_empty() {
        sections.push(current.trim().to_string());
    }

    sections
}
