#![no_main]

use borm_syntax::{collect_bad, parse, tokenize, Position};
use libfuzzer_sys::fuzz_target;

const MAX_SOURCE_BYTES: usize = 4096;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fuzz_target!(|data: &[u8]| {
    let (seed, source) = match data.split_first() {
        Some((&seed, rest)) => (seed, decode_source(rest)),
        None => (0, String::new()),
    };

    let tree = parse("fuzz.borm", &source);
    assert_eq!(tree, parse("fuzz.borm", &source), "builds are deterministic");

    let leaves: Vec<_> = tree
        .preorder()
        .skip(1)
        .filter(|&id| tree.node(id).children().is_empty())
        .map(|id| tree.node(id).text_range())
        .collect();
    for pair in leaves.windows(2) {
        assert!(pair[0].end() <= pair[1].start(), "leaves {pair:?} overlap");
    }
    let leaf_text: String = leaves
        .iter()
        .flat_map(|&range| source[range].chars())
        .filter(|c| !matches!(c, ' ' | '\n'))
        .collect();
    let token_text: String = tokenize(&source)
        .iter()
        .map(|token| token.text.as_str())
        .collect();
    assert_eq!(leaf_text, token_text, "leaves drop or repeat tokens");

    for id in collect_bad(&tree) {
        assert!(!tree.node(id).diagnostics().is_empty());
    }

    let line = u32::from(seed % 16);
    let column = u32::from(seed / 16);
    let (id, matched) = tree.find_at(Position::new(line, column));
    if matched {
        assert!(tree.node(id).span().contains(Position::new(line, column)));
    }
});
