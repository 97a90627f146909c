use crate::stop_words::StopWords;

/// Split `text` on the space character. Runs of spaces and leading or trailing
/// spaces never yield empty tokens. Tabs and newlines are ordinary characters.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Drop stop words, keeping the order of what remains.
pub fn filter_stop_words<'a>(tokens: Vec<&'a str>, stop_words: &StopWords) -> Vec<&'a str> {
    tokens.into_iter().filter(|t| !stop_words.is_stop_word(t)).collect()
}

/// Split and filter in one step; this is what both documents and queries go through.
pub fn tokenize<'a>(text: &'a str, stop_words: &StopWords) -> Vec<&'a str> {
    filter_stop_words(split_into_words(text), stop_words)
}
