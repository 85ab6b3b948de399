use crate::parser::base::{ErrorContext, ParseError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Self {
        // padding must be at least 1
        Self(std::cmp::max(width, 1))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Self {
        Self(std::cmp::max(width, 1))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Self {
        // middle must be at least 2 (so we can hyphenate)
        Self(std::cmp::max(width, 2))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TotalWidth(pub(crate) usize);

/// Lays out help entries as a left column (the syntax), padding, and a wrapped middle column (the description).
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
}

// Target 95% of the total width, so the renderer doesn't use the full terminal.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Assuming the average word length is 5, 17 allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer that fits the middle column into the `total_width`, where possible.
    pub(crate) fn guided(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle = left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} and middle fit within the target total {target_total_width}.  Selecting middle: {guided_middle}.");
            }

            Self::new(padding, left, MiddleWidth::new(guided_middle))
        } else if non_middle < total_width.0 {
            let calculated_middle =
                std::cmp::max(total_width.0 - non_middle, MINIMUM_MIDDLE_WIDTH);

            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Columns {non_middle} fit within the total {}.  Selecting middle: {calculated_middle}.",
                    total_width.0
                );
            }

            Self::new(padding, left, MiddleWidth::new(calculated_middle))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Columns {non_middle} do not fit within the total {}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.",
                    total_width.0
                );
            }

            Self::new(padding, left, MiddleWidth::new(MINIMUM_MIDDLE_WIDTH))
        }
    }

    pub(crate) fn new(padding: PaddingWidth, left: LeftWidth, middle: MiddleWidth) -> Self {
        Self {
            padding,
            left,
            middle,
        }
    }

    /// Render one entry; the middle text wraps onto continuation lines under the middle column.
    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = self.padding.0;
        let left_column_width = std::cmp::max(self.left.0, left.chars().count());
        let middle_column_width = std::cmp::max(self.middle.0.saturating_sub(indent), 2);
        let mut out = Vec::default();

        for (i, part) in chunk(middle, middle_column_width).iter().enumerate() {
            if i == 0 {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{:padding$}{}",
                    "", left, "", part
                ));
            } else {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{:padding$}{}",
                    "", "", "", part
                ));
            }
        }

        if out.is_empty() {
            out.push(format!("{:indent$}{}", "", left));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// Split words longer than the width, leaving the remainder in `current`.
fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

/// The sink for the front-end's output.
pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_usage(&self, usage: String);
    fn print_error(&self, error: ParseError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_usage(&self, usage: String) {
        eprintln!("{usage}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("Parse error: {error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 5, vec![])]
    #[case("abc", 5, vec!["abc"])]
    #[case("abc def", 5, vec!["abc", "def"])]
    #[case("abc def", 7, vec!["abc def"])]
    #[case("  abc   def ", 7, vec!["abc def"])]
    #[case("abcdefgh", 5, vec!["abcd-", "efgh"])]
    #[case("abcdefghi", 5, vec!["abcd-", "efghi"])]
    #[case("abcdefghij", 5, vec!["abcd-", "efgh-", "ij"])]
    #[case("ab abcdefgh", 5, vec!["ab", "abcd-", "efgh"])]
    #[case("ünï cödé", 4, vec!["ünï", "cödé"])]
    fn chunk_paragraph(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }

    #[test]
    fn render_single_line() {
        // Setup
        let renderer = ColumnRenderer::new(
            PaddingWidth::new(2),
            LeftWidth::new(6),
            MiddleWidth::new(20),
        );

        // Execute
        let lines = renderer.render(1, "-v", "Be loud.");

        // Verify
        assert_eq!(lines, vec![" -v      Be loud."]);
    }

    #[test]
    fn render_wrapped() {
        // Setup
        let renderer = ColumnRenderer::new(
            PaddingWidth::new(1),
            LeftWidth::new(4),
            MiddleWidth::new(10),
        );

        // Execute
        let lines = renderer.render(0, "FILE", "The file to read from disk.");

        // Verify
        assert_eq!(
            lines,
            vec!["FILE The file", "     to read", "     from disk."]
        );
    }

    #[test]
    fn render_no_middle() {
        let renderer = ColumnRenderer::new(
            PaddingWidth::new(3),
            LeftWidth::new(10),
            MiddleWidth::new(10),
        );

        assert_eq!(renderer.render(1, "--quiet", ""), vec![" --quiet"]);
    }

    #[rstest]
    #[case(200, 40)]
    #[case(45, 35)]
    #[case(12, MINIMUM_MIDDLE_WIDTH)]
    #[case(8, MINIMUM_MIDDLE_WIDTH)]
    fn guided_middle(#[case] total: usize, #[case] expected: usize) {
        // Setup
        let renderer = ColumnRenderer::guided(
            PaddingWidth::new(2),
            LeftWidth::new(8),
            MiddleWidth::new(40),
            TotalWidth(total),
        );

        // Verify
        assert_eq!(renderer.middle.0, expected);
    }
}
