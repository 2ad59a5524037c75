pub mod categories;
pub mod movies;
pub mod users;

/// What an upsert actually did. Update-by-id falls back to an insert only when
/// no row matched, so callers can tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Updated,
    Inserted,
}

/// Escapes LIKE/ILIKE metacharacters so a search term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_terms_pass_through() {
        assert_eq!(escape_like("matrix"), "matrix");
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
    }
}
