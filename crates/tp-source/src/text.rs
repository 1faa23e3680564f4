use std::path::Path;

use anyhow::{Context, Result};

/// Aplatit un texte sur une seule ligne : chaque fin de ligne devient un espace.
///
/// # Example
/// ```
/// use tp_source::text::flatten_text;
/// assert_eq!(flatten_text("ab\r\ncd\n"), "ab cd ");
/// ```
#[must_use]
pub fn flatten_text(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

/// Lit un fichier texte UTF-8 et l'aplatit.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn load_text(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire le texte {}", path.display()))?;
    let text = flatten_text(&raw);
    log::info!(
        "texte chargé depuis {} : {} caractères",
        path.display(),
        text.chars().count()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_text_flattens_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "première ligne\nseconde\n").unwrap();
        let text = load_text(file.path()).unwrap();
        assert_eq!(text, "première ligne seconde ");
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x66, 0xff, 0xfe]).unwrap();
        assert!(load_text(file.path()).is_err());
    }

    #[test]
    fn empty_text_stays_empty() {
        assert_eq!(flatten_text(""), "");
    }
}
