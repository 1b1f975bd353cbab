/// Small English helpers for assembling clauses from lexical slots.

/// "are" for plural subjects, "is" otherwise.
pub fn copula(plural: bool) -> &'static str {
    if plural {
        "are"
    } else {
        "is"
    }
}

/// "many" for count nouns, "much" for mass nouns.
pub fn quantifier(plural: bool) -> &'static str {
    if plural {
        "many"
    } else {
        "much"
    }
}

/// Progressive form by suffixing the stem: "swarm" → "swarming".
pub fn progressive(verb: &str) -> String {
    format!("{verb}ing")
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalize a clause and close it with a period unless it already ends
/// in terminal punctuation.
pub fn sentence(clause: &str) -> String {
    let trimmed = clause.trim();
    let mut out = capitalize_first(trimmed);
    if !out.ends_with(&['.', '!', '?'][..]) {
        out.push('.');
    }
    out
}

/// Join non-empty words with single spaces.
pub fn join_words<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// "How many bees are in the garden?"
pub fn how_much_question(
    noun: &str,
    plural: bool,
    preposition: &str,
    location: &str,
) -> String {
    let mut q = join_words(["How", quantifier(plural), noun, copula(plural), preposition, location]);
    q.push('?');
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_keeps_rest() {
        assert_eq!(capitalize_first("the garden near Mary"), "The garden near Mary");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("élan"), "Élan");
    }

    #[test]
    fn sentence_adds_period_once() {
        assert_eq!(sentence("bees are swarming"), "Bees are swarming.");
        assert_eq!(sentence("Is it full?"), "Is it full?");
        assert_eq!(sentence(" done. "), "Done.");
    }

    #[test]
    fn join_skips_blanks() {
        assert_eq!(join_words(["", "bees", " ", "swarm"]), "bees swarm");
    }

    #[test]
    fn question() {
        assert_eq!(
            how_much_question("bees", true, "in", "the garden"),
            "How many bees are in the garden?"
        );
        assert_eq!(
            how_much_question("paint", false, "on", "the wall"),
            "How much paint is on the wall?"
        );
        assert_eq!(progressive("swarm"), "swarming");
    }
}
