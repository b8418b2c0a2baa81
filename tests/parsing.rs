use std::fs;
use std::path::PathBuf;

use chisel_json_value::lexer::{Lexer, Token};
use chisel_json_value::{
    parse_bytes, parse_document, parse_or_null, parse_value, to_text, Details, Encoding, Parser,
    Stage, Value,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures/json")
        .join(name)
}

#[test]
fn should_lex_a_fixture_file_completely() {
    let source = fs::read_to_string(fixture("valid/simple_structure.json")).unwrap();
    let mut chars = source.chars();
    let mut lexer = Lexer::new(&mut chars);
    let mut strings = 0;
    let mut count = 0;
    loop {
        let (token, span) = lexer.consume().unwrap();
        if token == Token::EndOfInput {
            break;
        }
        assert!(span.start <= span.end);
        if matches!(token, Token::Str(_)) {
            strings += 1;
        }
        count += 1;
    }
    assert_eq!(strings, 10);
    assert_eq!(count, 31);
}

#[test]
fn should_parse_the_simple_structure_fixture() {
    let parsed = parse_bytes(&fs::read(fixture("valid/simple_structure.json")).unwrap()).unwrap();
    let root = parsed.get_object().unwrap();
    assert_eq!(root.member("name").unwrap().get_string().unwrap(), "chisel");
    assert_eq!(root.member("version").unwrap(), &Value::Integer(3));
    assert_eq!(root.member("ratio").unwrap().get_real().unwrap(), 0.75);
    assert!(root.member("enabled").unwrap().get_boolean().unwrap());
    assert!(root.member("parent").unwrap().is_null());
    assert_eq!(
        to_text(root.member("tags").unwrap()),
        "[\"json\",\"parser\",\"dom\"]"
    );
}

#[test]
fn should_decode_escapes_at_parse_time() {
    let parsed = parse_bytes(&fs::read(fixture("valid/unicode_strings.json")).unwrap()).unwrap();
    let root = parsed.get_object().unwrap();
    assert_eq!(root.member("degree").unwrap().get_string().unwrap(), "\u{b0}");
    assert_eq!(
        root.member("degree").unwrap().get_string().unwrap().as_bytes(),
        [0xC2, 0xB0]
    );
    assert_eq!(root.member("euro").unwrap().get_string().unwrap(), "\u{20ac}");
    assert_eq!(root.member("raw").unwrap().get_string().unwrap(), "caf\u{e9} \u{2615}");
    assert_eq!(root.member("solidus").unwrap().get_string().unwrap(), "a/b");
    assert_eq!(root.member("backslash").unwrap().get_string().unwrap(), "c:\\temp");
    assert_eq!(root.member("empty").unwrap().get_string().unwrap(), "");
    assert_eq!(to_text(root.member("solidus").unwrap()), "\"a\\/b\"");
}

#[test]
fn should_render_and_reparse_every_valid_fixture() {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixture("valid"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    paths.sort();
    assert!(!paths.is_empty());
    for path in paths {
        let parsed = parse_bytes(&fs::read(&path).unwrap()).unwrap();
        let rendered = parsed.to_text();
        let reparsed = parse_document(&rendered).unwrap();
        assert_eq!(reparsed, parsed, "{:?}", path);
        assert_eq!(reparsed.to_text(), rendered, "{:?}", path);
    }
}

#[test]
fn should_report_each_invalid_fixture_as_a_parse_error() {
    let expectations = [
        ("bad_literal.json", Details::InvalidLiteral("expected boolean true/false")),
        ("invalid_utf8.json", Details::NonUtf8InputDetected(0x80)),
        ("invalid_utf8_trailing.json", Details::NonUtf8InputDetected(0xFF)),
        ("missing_colon.json", Details::PairExpected),
        ("scalar_root.json", Details::InvalidRootObject),
        ("surrogate_escape.json", Details::SurrogateEscape(0xD800)),
        ("trailing_comma.json", Details::InvalidObject),
        ("trailing_document.json", Details::TrailingCharacters),
        ("unterminated_string.json", Details::UnterminatedString),
    ];
    for (name, expected) in expectations {
        let bytes = fs::read(fixture(&format!("invalid/{name}"))).unwrap();
        let err = parse_bytes(&bytes).unwrap_err();
        assert!(err.is_parse_error(), "{name}");
        assert!(err.coords.is_some(), "{name}");
        assert_eq!(err.details, expected, "{name}");
    }
}

#[test]
fn should_reject_malformed_numbers() {
    for source in ["[-]", "[.5]", "[1.]", "[1e]", "[01.2.3]", "[99999999999999999999]"] {
        let err = parse_document(source).unwrap_err();
        assert_eq!(err.stage, Stage::Lexer, "{source}");
    }
    assert!(parse_value("123").unwrap().is_integer());
    assert!(parse_value("123.0").unwrap().is_real());
    assert!(parse_value("-0.5e-3").unwrap().is_real());
}

#[test]
fn should_collapse_failures_only_in_the_legacy_entry_point() {
    assert!(parse_or_null("{\"a\":").is_null());
    assert!(parse_or_null("42").is_null());
    assert_eq!(parse_or_null("[42]").to_text(), "[42]");
}

#[test]
fn should_include_coordinates_in_messages() {
    let err = parse_document("[1,\n 2,\n @]").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("lexer error at"), "{message}");
    assert!(message.contains("line: 3"), "{message}");
    assert!(message.contains("invalid character found: '@'"), "{message}");
}

#[test]
fn should_reuse_a_configured_parser() {
    let parser = Parser::with_encoding(Encoding::Ascii).with_max_depth(2);
    assert!(parser.parse_bytes(b"[[1]]").is_ok());
    assert!(parser.parse_bytes(b"{\"a\":[]}").is_ok());
    assert_eq!(
        parser.parse_bytes(b"[[[1]]]").unwrap_err().details,
        Details::NestingTooDeep(2)
    );
    assert!(parser.parse_str("[true]").is_ok());
    let err = parser.parse_bytes("[\"caf\u{e9}\"]".as_bytes()).unwrap_err();
    assert_eq!(err.stage, Stage::Decoder);
    assert_eq!(err.details, Details::NonAsciiInputDetected(0xC3));
}

#[test]
fn should_survive_hostile_nesting() {
    let hostile = format!("{}1{}", "[".repeat(50_000), "]".repeat(50_000));
    let err = parse_document(&hostile).unwrap_err();
    assert!(matches!(err.details, Details::NestingTooDeep(_)));
    let objects = "{\"a\":".repeat(10_000);
    assert!(matches!(
        parse_document(&objects).unwrap_err().details,
        Details::NestingTooDeep(_)
    ));
}
