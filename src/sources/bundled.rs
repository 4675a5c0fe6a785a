//! Tables shipped with the crate

use super::{parse_table, SourceError, TokenSource};
use crate::tables::{GlobalTable, RawSource, TokenTable, GLOBAL_KEY};
use std::collections::BTreeSet;

const BUNDLED: &[(&str, &str)] = &[
    ("de", include_str!("../../tokens/de.json")),
    ("en", include_str!("../../tokens/en.json")),
    ("es", include_str!("../../tokens/es.json")),
    ("et", include_str!("../../tokens/et.json")),
    ("fr", include_str!("../../tokens/fr.json")),
    ("nl", include_str!("../../tokens/nl.json")),
];

/// Every character expected in Japanese address text.
const JAPANESE: &str = concat!(
    r"\x{1100}-\x{11FF}\x{2E80}-\x{2EFF}\x{3000}-\x{318F}\x{31C0}-\x{4DBF}",
    r"\x{4E00}-\x{9FFF}\x{F900}-\x{FAFF}\x{FE30}-\x{FE4F}",
);

/// The embedded tables, plus a generated global table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl BundledSource {
    pub fn new() -> Self {
        BundledSource
    }
}

impl TokenSource for BundledSource {
    fn language_codes(&self) -> Result<BTreeSet<String>, SourceError> {
        Ok(BUNDLED.iter().map(|(code, _)| code.to_string()).collect())
    }

    fn load(&self, code: &str) -> Result<Option<RawSource>, SourceError> {
        if code == GLOBAL_KEY {
            return Ok(Some(RawSource::generator(global_rules)));
        }
        BUNDLED
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(code, json)| parse_table(code, json))
            .transpose()
    }
}

/// Structural rewrites applied before token matching.
///
/// Japanese addresses written as `<area><block>-<building>` keep the area,
/// drop the building number and move the block number to the end.
fn global_rules() -> TokenTable {
    let mut rules = GlobalTable::new();
    rules.insert(
        format!(
            r"^([{JAPANESE}](?:[{JAPANESE}0-9\x{{FF10}}-\x{{FF19}}\s]*[{JAPANESE}])?)(?:\s*)([0-9]+)-(?:[0-9]+)(.*)$"
        ),
        "$1$3 $2",
    );
    TokenTable::Global(rules)
}
