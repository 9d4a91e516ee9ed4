//! A miniature database written to disk for the store tests.

use std::fs;
use std::path::Path;

use celex_protocol::Variant;

/// `(id, head, class)` with homonymous `bank` entries.
pub const LEMMAS: [(u32, &str, &str); 3] = [(1, "abandon", "4"), (2, "bank", "1"), (3, "bank", "4")];

/// `(id, word, lemma, flect)`, deliberately not grouped by lemma.
pub const WORDFORMS: [(u32, &str, u32, &str); 5] = [
    (1, "abandon", 1, "i"),
    (2, "bank", 2, "S"),
    (3, "abandoned", 1, "a"),
    (4, "bank", 3, "i"),
    (5, "banks", 2, "P"),
];

/// Column index of `Trans_V` in the syntax file's flag block.
const TRANS_V: usize = 11;

pub fn efl_line(id: u32, head: &str) -> String {
    format!(r"{id}\{head}\{cob}\0\10\1.00\{cob}\10\1.00\0\0\0.00", cob = id * 10)
}

pub fn esl_line(id: u32, head: &str, class: &str) -> String {
    let mut fields = vec![id.to_string(), head.to_string(), (id * 10).to_string(), class.to_string()];
    let transitive = class == "4";
    fields.extend((0..43).map(|i| if transitive && i == TRANS_V { "Y" } else { "N" }.to_string()));
    fields.join("\\")
}

pub fn eml_line(id: u32, head: &str) -> String {
    let parse = [
        "N", "N", "N", "N", "Y", head, "x", "S", "N", "N", "N", "", "N", "N", "S", head, "N", "N", "N",
    ]
    .join("\\");
    format!(r"{id}\{head}\{}\M\\1\{parse}", id * 10)
}

pub fn epl_line(id: u32, head: &str) -> String {
    format!(r"{id}\{head}\{}\1\P\'{head}\CVC\[{head}]", id * 10)
}

pub fn efw_line(id: u32, word: &str, lemma: u32) -> String {
    format!(r"{id}\{word}\{lemma}\{id}\0\1\0.30\{id}\1\0.30\0\0\0.00")
}

pub fn emw_line(id: u32, word: &str, lemma: u32, flect: &str) -> String {
    format!(r"{id}\{word}\{id}\{lemma}\{flect}\@")
}

pub fn epw_line(id: u32, word: &str, lemma: u32) -> String {
    format!(r"{id}\{word}\{id}\{lemma}\1\P\'{word}\CVC\[{word}]")
}

pub fn write_variant(root: &Path, variant: Variant, lines: &[String]) {
    let path = variant.path(root);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(path, text).unwrap();
}

/// Writes all seven variant files for [`LEMMAS`] and [`WORDFORMS`].
pub fn write_database(root: &Path) {
    let lemma_files: [(Variant, fn(u32, &str, &str) -> String); 4] = [
        (Variant::Efl, |id, head, _| efl_line(id, head)),
        (Variant::Esl, esl_line),
        (Variant::Eml, |id, head, _| eml_line(id, head)),
        (Variant::Epl, |id, head, _| epl_line(id, head)),
    ];
    for (variant, line) in lemma_files {
        let lines: Vec<String> = LEMMAS.iter().map(|&(id, head, class)| line(id, head, class)).collect();
        write_variant(root, variant, &lines);
    }

    let wordform_files: [(Variant, fn(u32, &str, u32, &str) -> String); 3] = [
        (Variant::Efw, |id, word, lemma, _| efw_line(id, word, lemma)),
        (Variant::Emw, emw_line),
        (Variant::Epw, |id, word, lemma, _| epw_line(id, word, lemma)),
    ];
    for (variant, line) in wordform_files {
        let lines: Vec<String> = WORDFORMS
            .iter()
            .map(|&(id, word, lemma, flect)| line(id, word, lemma, flect))
            .collect();
        write_variant(root, variant, &lines);
    }
}
