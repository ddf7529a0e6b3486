//! Suggested file name for audio returned by the endpoint.

use crate::document::{TextElement, outline};

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("spanish", "espanol"),
    ("english", "english"),
    ("french", "frances"),
    ("german", "aleman"),
    ("italian", "italiano"),
    ("polish", "polaco"),
    ("portuguese", "portugues"),
    ("arabic", "arabe"),
    ("hindi", "hindi"),
    ("japanese", "japones"),
    ("korean", "coreano"),
    ("chinese", "chino"),
    ("turkish", "turco"),
    ("romanian", "rumano"),
    ("dutch", "holandes"),
    ("greek", "griego"),
    ("vietnamese", "vietnamita"),
    ("bulgarian", "bulgaro"),
    ("finnish", "finlandes"),
    ("croatian", "croata"),
    ("swedish", "sueco"),
    ("norwegian", "noruego"),
    ("danish", "danes"),
];

/// File-name stem for a language, `audio` when the language is unknown.
pub fn language_stem(language: &str) -> &'static str {
    let language = language.trim().to_ascii_lowercase();
    LANGUAGE_NAMES
        .iter()
        .find(|(name, _)| *name == language)
        .map_or("audio", |&(_, stem)| stem)
}

/// Name the audio file after what kind of blocks were applied.
///
/// Intro paragraphs alone give `_intro`, titles alone give `_titulos`, a mix
/// gives `_contenido`, and other paragraphs give `_parrafos`. An empty
/// selection counts as titles only.
pub fn audio_filename(elements: &[TextElement], language: &str) -> String {
    let stem = language_stem(language);
    let first_title = outline::first_title_index(elements);

    let applied = || elements.iter().enumerate().filter(|(_, el)| el.applied);
    let has_intro = applied()
        .any(|(index, el)| el.is_paragraph() && first_title.is_none_or(|first| index < first));
    let has_titles = applied().any(|(_, el)| el.is_title());
    let has_paragraphs = applied().any(|(_, el)| el.is_paragraph());

    let suffix = if has_intro && !has_titles {
        "intro"
    } else if !has_paragraphs {
        "titulos"
    } else if has_titles {
        "contenido"
    } else {
        "parrafos"
    };
    format!("{stem}_{suffix}.mp3")
}
