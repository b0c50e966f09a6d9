// SPDX-License-Identifier: Apache-2.0

// Walks a localization table the way a code generator would: one entry per
// string key, each mapping language names to text.

use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use skeljson::{parse_document, Document, IoReader, NeverCancel, Node, ParseError, SkeletonParser};

use test_log::test;

const TABLE: &str = r#"
{
    "Hello": {
        "default": "Hello",
        "ja-JP": "Konnichiwa",
        "fr-FR": "Bonjour"
    },
    "Farewell": {
        "default": "Goodbye",
        "ja-JP": "Sayonara",
    },
    "Quoted": {
        "en-US": "Say \"cheese\""
    },
}
"#;

/// key -> (language -> text), skipping anything that is not a string
fn collect_table<'a>(doc: &Document<'a>) -> BTreeMap<&'a str, BTreeMap<&'a str, &'a str>> {
    let mut table = BTreeMap::new();
    let root = doc.root().as_object().expect("root must be an object");
    for (key, languages) in root {
        let Some(languages) = languages.as_object() else {
            continue;
        };
        let mut per_language = BTreeMap::new();
        for (language, text) in languages {
            if let Some(text) = text.as_string() {
                per_language.insert(
                    doc.resolve(*language).unwrap(),
                    doc.resolve(text).unwrap(),
                );
            }
        }
        table.insert(doc.resolve(*key).unwrap(), per_language);
    }
    table
}

#[test]
fn test_localization_table_walk() {
    let doc = parse_document(TABLE, &NeverCancel).unwrap();
    let table = collect_table(&doc);

    assert_eq!(table.len(), 3);
    assert_eq!(table["Hello"]["ja-JP"], "Konnichiwa");
    assert_eq!(table["Hello"]["default"], "Hello");
    assert_eq!(table["Farewell"].len(), 2);
    // Escapes are kept verbatim for the generator to emit as-is
    assert_eq!(table["Quoted"]["en-US"], r#"Say \"cheese\""#);
}

#[test]
fn test_root_entry_order_is_source_order() {
    let doc = parse_document(TABLE, &NeverCancel).unwrap();
    let keys: Vec<_> = doc
        .root()
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, _)| doc.resolve(*k).unwrap())
        .collect();
    assert_eq!(keys, ["Hello", "Farewell", "Quoted"]);
}

fn large_table(entries: usize) -> String {
    let mut text = String::from("{");
    for i in 0..entries {
        text.push_str(&format!(
            "\"Key{i}\": {{\"default\": \"Value number {i}\", \"de\": \"Wert {i}\"}},\n"
        ));
    }
    text.push('}');
    text
}

#[test]
fn test_large_input_through_io_reader() {
    let text = large_table(5_000);
    assert!(text.len() > skeljson::DEFAULT_CHUNK_SIZE);

    let mut scratch = vec![0u8; 4096];
    let reader = IoReader::new(std::io::Cursor::new(text.as_bytes()));
    let root = SkeletonParser::new(reader, &mut scratch)
        .parse(&NeverCancel)
        .unwrap();

    let doc = Document::new(&text, root);
    let table = collect_table(&doc);
    assert_eq!(table.len(), 5_000);
    assert_eq!(table["Key4999"]["de"], "Wert 4999");
    assert_eq!(table["Key0"]["default"], "Value number 0");
}

#[test]
fn test_independent_parses_on_worker_threads() {
    let texts: Vec<Arc<String>> = (1..=4).map(|n| Arc::new(large_table(n * 50))).collect();
    let handles: Vec<_> = texts
        .iter()
        .cloned()
        .map(|text| {
            std::thread::spawn(move || {
                let doc = parse_document(&text, &NeverCancel).unwrap();
                doc.root().as_object().unwrap().len()
            })
        })
        .collect();
    let counts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, [50, 100, 150, 200]);
}

#[test]
fn test_cancel_from_another_thread() {
    let text = large_table(20_000);
    let cancel = Arc::new(AtomicBool::new(false));

    let signal = Arc::clone(&cancel);
    std::thread::spawn(move || signal.store(true, std::sync::atomic::Ordering::Relaxed))
        .join()
        .unwrap();

    let result = skeljson::parse(&text, &cancel);
    assert_eq!(result, Err(ParseError::Cancelled));
}

#[test]
fn test_values_that_are_not_objects_are_skipped() {
    let text = r#"{"Plain": "not a table", "Table": {"default": "x"}, "List": ["a"]}"#;
    let doc = parse_document(text, &NeverCancel).unwrap();
    let table = collect_table(&doc);
    assert_eq!(table.len(), 1);
    assert!(matches!(
        doc.root().as_object().unwrap().get(text, "List"),
        Some(Node::Array(_))
    ));
}
