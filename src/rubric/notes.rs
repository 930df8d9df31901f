//! Flattening structured answers into the notes string the scorers read

/// Join answers as `part: text` lines; missing answers become empty text
pub fn flatten_notes<'a, I>(answers: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    answers
        .into_iter()
        .map(|(part, text)| format!("{}: {}", part, text.unwrap_or("")))
        .collect::<Vec<_>>()
        .join("\n")
}
