//! Rendering of curated dialect vocabulary files into markdown.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static newline pattern"));

/// Curated vocabulary document (`{ dialect, terms: [...] }`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialectVocabulary {
    /// Dialect name; callers fall back to the file stem when absent.
    #[serde(default)]
    pub dialect: Option<String>,
    /// Vocabulary entries.
    #[serde(default)]
    pub terms: Vec<VocabularyTerm>,
}

/// Single vocabulary entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VocabularyTerm {
    /// Headword; entries without one are dropped.
    #[serde(default)]
    pub word: String,
    /// Gloss.
    #[serde(default)]
    pub meaning: String,
    /// Usage example.
    #[serde(default)]
    pub context: String,
}

/// Render vocabulary as markdown under a `# {dialect} Arabic` heading.
pub fn render_vocabulary(dialect: &str, vocabulary: &DialectVocabulary) -> String {
    let mut lines = vec![
        format!("# {dialect} Arabic\n"),
        format!("Vocabulary and phrases for {dialect} dialect.\n"),
        "## Vocabulary\n".to_string(),
    ];

    for term in &vocabulary.terms {
        let word = term.word.trim();
        if word.is_empty() {
            continue;
        }
        let meaning = term.meaning.trim();
        let context = term.context.trim();

        lines.push(format!("### {word}\n"));
        if !meaning.is_empty() {
            lines.push(format!("**Meaning:** {}\n", collapse_newlines(meaning)));
        }
        if !context.is_empty() && context != meaning {
            lines.push(format!("**Example:** {}\n", collapse_newlines(context)));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn collapse_newlines(text: &str) -> String {
    EXCESS_NEWLINES.replace_all(text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary(json: &str) -> DialectVocabulary {
        serde_json::from_str(json).expect("vocabulary json")
    }

    #[test]
    fn renders_terms_with_meaning_and_example() {
        let vocab = vocabulary(
            r#"{"dialect":"Khaleeji","terms":[
                {"word":"shlonik","meaning":"how are you","context":"shlonik ya akhoy?"},
                {"word":"  ","meaning":"ignored"}
            ]}"#,
        );
        let rendered = render_vocabulary("Khaleeji", &vocab);

        assert!(rendered.starts_with("# Khaleeji Arabic\n"));
        assert!(rendered.contains("## Vocabulary\n"));
        assert!(rendered.contains("### shlonik\n"));
        assert!(rendered.contains("**Meaning:** how are you\n"));
        assert!(rendered.contains("**Example:** shlonik ya akhoy?\n"));
        assert!(!rendered.contains("ignored"));
    }

    #[test]
    fn example_identical_to_meaning_is_omitted() {
        let vocab = vocabulary(r#"{"terms":[{"word":"yalla","meaning":"let's go","context":"let's go"}]}"#);
        let rendered = render_vocabulary("Levantine", &vocab);
        assert!(rendered.contains("**Meaning:** let's go"));
        assert!(!rendered.contains("**Example:**"));
    }

    #[test]
    fn excess_blank_lines_are_collapsed() {
        let vocab = vocabulary(r#"{"terms":[{"word":"habibi","meaning":"dear\n\n\n\nfriend"}]}"#);
        let rendered = render_vocabulary("Egyptian", &vocab);
        assert!(rendered.contains("**Meaning:** dear\n\nfriend\n"));
    }
}
