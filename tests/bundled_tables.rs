//! Every bundled table has to pass the schema and boundary checks

use geocoder_abbreviations::compiling::{is_language_code, CompileOptions, Compiler};
use geocoder_abbreviations::sources::{BundledSource, TokenSource};
use geocoder_abbreviations::validation::audit;
use geocoder_abbreviations::{TokenTable, GLOBAL_KEY};

fn unfiltered() -> Compiler {
    Compiler::new().with_options(CompileOptions {
        include_singletons: true,
        advanced: true,
        parallel: false,
    })
}

#[test]
fn test_bundled_language_codes() {
    let codes = BundledSource.language_codes().unwrap();
    assert!(!codes.is_empty());
    assert!(codes.iter().all(|code| is_language_code(code)));
}

#[test]
fn test_bundled_tables_pass_audit() {
    let compiler = unfiltered();
    for code in BundledSource.language_codes().unwrap() {
        let table = compiler.compile_language(&code).unwrap();
        assert!(matches!(table, TokenTable::Advanced(ref groups) if !groups.is_empty()));

        let findings: Vec<String> = audit(&table).iter().map(ToString::to_string).collect();
        assert!(findings.is_empty(), "{}: {:#?}", code, findings);
    }
}

#[test]
fn test_bundled_global_rules_compile() {
    let tables = unfiltered().compile_all().unwrap();
    let global = &tables[GLOBAL_KEY];
    assert!(global.is_global());
    assert!(audit(global).is_empty());
}

#[test]
fn test_bundled_tokens_are_normalized() {
    let compiler = unfiltered();
    for code in BundledSource.language_codes().unwrap() {
        let TokenTable::Advanced(groups) = compiler.compile_language(&code).unwrap() else {
            panic!("{}: expected advanced table", code);
        };
        for group in groups {
            for token in &group.tokens {
                assert_eq!(token, &token.to_lowercase(), "{}: {}", code, token);
                assert!(!token.contains(['.', '\'']), "{}: {}", code, token);
            }
            for field in [&group.canonical, &group.full] {
                let field = field.as_ref().unwrap();
                assert!(group.tokens.contains(field), "{}: {:?}", code, group);
            }
        }
    }
}
