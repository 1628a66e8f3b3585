//! Line splitting and field tokenizing for bank CSV exports.
//!
//! Only the quoting subset banks actually emit is handled: `"` toggles a quoted
//! field, `""` inside quotes is a literal quote, and `,` outside quotes separates
//! fields. Unbalanced quotes are tolerated, the line just ends "inside quotes".

use crate::types::RawRow;

/// Split raw text into non-blank lines (LF or CRLF).
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|l| !l.trim().is_empty()).collect()
}

/// Split one CSV line into trimmed fields.
pub fn tokenize_line(line: &str) -> RawRow {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_skips_blank_and_handles_crlf() {
        let text = "Date,Amount\r\n\r\n2024-01-05,4.50\r\n   \n2024-01-06,1.00\n";
        assert_eq!(
            split_lines(text),
            vec!["Date,Amount", "2024-01-05,4.50", "2024-01-06,1.00"]
        );
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_plain_fields_are_trimmed() {
        assert_eq!(tokenize_line(" a , b,c "), vec!["a", "b", "c"]);
        assert_eq!(tokenize_line("a,,c"), vec!["a", "", "c"]);
        assert_eq!(tokenize_line("a,"), vec!["a", ""]);
    }

    #[test]
    fn test_quoted_comma_and_escaped_quote() {
        assert_eq!(
            tokenize_line(r#"2024-01-05,"ACME, Inc.","1,234.56""#),
            vec!["2024-01-05", "ACME, Inc.", "1,234.56"]
        );
        assert_eq!(
            tokenize_line(r#""Joe's ""Diner""",12.00"#),
            vec![r#"Joe's "Diner""#, "12.00"]
        );
    }

    #[test]
    fn test_unbalanced_quote_is_tolerated() {
        // everything after the stray quote lands in one field
        assert_eq!(tokenize_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_empty_line_is_single_empty_field() {
        assert_eq!(tokenize_line(""), vec![""]);
    }

    #[test]
    fn test_round_trip_against_csv_writer() {
        let originals = vec![
            "plain".to_string(),
            "with, comma".to_string(),
            r#"say "hi""#.to_string(),
            r#"both, "quoted" and, commas"#.to_string(),
            "".to_string(),
            "$1,234.56".to_string(),
        ];

        let mut wtr = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(vec![]);
        wtr.write_record(&originals).unwrap();
        let bytes = wtr.into_inner().unwrap();
        let line = String::from_utf8(bytes).unwrap();

        assert_eq!(tokenize_line(line.trim_end_matches(['\r', '\n'])), originals);
    }

    #[test]
    fn test_round_trip_always_quoted() {
        let originals = vec!["Coffee".to_string(), r#"12" sub, "extra""#.to_string()];

        let mut wtr = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(vec![]);
        wtr.write_record(&originals).unwrap();
        let line = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        assert_eq!(tokenize_line(line.trim_end_matches(['\r', '\n'])), originals);
    }
}
