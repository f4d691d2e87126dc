//! Fuzz the transformer with structurally valid JSON carrying garbage
//! content: every field may be missing, null, empty, or oddly typed. The
//! transformer must never panic, and anything it accepts must satisfy the
//! output contract.

use newsvec::pipeline::{DocumentTransformer, validate_record};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use serde_json::{Value, json};

fn opt_text() -> impl Strategy<Value = Value> {
    option::of(".{0,40}").prop_map(|value| match value {
        Some(text) => Value::String(text),
        None => Value::Null,
    })
}

fn content_element() -> impl Strategy<Value = Value> {
    (opt_text(), opt_text(), option::of(Just(())))
        .prop_map(|(kind, content, props)| {
            json!({
                "type": kind,
                "content": content,
                "additional_properties": props.map(|_| json!({})),
            })
        })
}

fn taxonomy() -> impl Strategy<Value = Value> {
    let tags = vec(
        (".{0,12}", ".{0,12}").prop_map(|(slug, text)| json!({"slug": slug, "text": text})),
        0..4,
    );
    let sections = vec(
        (".{0,12}", ".{0,12}").prop_map(|(name, path)| json!({"name": name, "path": path})),
        0..4,
    );
    let categories = vec(
        (".{0,12}", proptest::num::f64::ANY)
            .prop_map(|(name, score)| json!({"name": name, "score": score})),
        0..4,
    );
    (tags, sections, categories).prop_map(|(tags, sections, categories)| {
        json!({"tags": tags, "sections": sections, "categories": categories})
    })
}

fn raw_document() -> impl Strategy<Value = Value> {
    (
        // `_id` may be empty, which must behave exactly like missing.
        opt_text(),
        ".{0,20}",
        option::of(".{0,30}".prop_map(|basic| json!({"basic": basic}))),
        vec(content_element(), 0..5),
        option::of(taxonomy()),
        (opt_text(), opt_text(), opt_text()),
        (opt_text(), opt_text(), opt_text()),
    )
        .prop_map(
            |(id, kind, headlines, elements, taxonomy, urls, dates)| {
                let (canonical_url, website_url, canonical_website) = urls;
                let (publish_date, first_publish_date, display_date) = dates;
                json!({
                    "_id": id,
                    "type": kind,
                    "headlines": headlines,
                    "content_elements": elements,
                    "taxonomy": taxonomy,
                    "canonical_url": canonical_url,
                    "website_url": website_url,
                    "canonical_website": canonical_website,
                    "publish_date": publish_date,
                    "first_publish_date": first_publish_date,
                    "display_date": display_date,
                    "promo_items": null,
                })
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// The transformer returns a well-formed pair for any fuzzed input, and
    /// accepted records pass the schema validator.
    #[test]
    fn transformer_survives_garbage_documents(doc in raw_document()) {
        let transformer = DocumentTransformer::new();
        let (record, report) = transformer.process_document(&doc);

        prop_assert_eq!(record.is_some(), report.accepted);
        if let Some(record) = &record {
            prop_assert!(validate_record(record).is_ok());
            prop_assert!(!record.text.trim().is_empty());
            prop_assert!(!record.metadata.external_id.trim().is_empty());

            // Serialized form keeps list fields as arrays, never null.
            let value = serde_json::to_value(record).expect("record serializes");
            prop_assert!(value["metadata"]["tags"].is_array());
            prop_assert!(value["metadata"]["sections"].is_array());
            prop_assert!(value["metadata"]["categories"].is_array());
        } else {
            let reason = report.reason.as_deref().expect("rejection carries a reason");
            prop_assert!(reason == "Missing ID" || reason == "Missing Text");
        }
    }

    /// The transform is a pure function: repeated calls on the same input
    /// agree bit for bit.
    #[test]
    fn transformer_is_deterministic(doc in raw_document()) {
        let transformer = DocumentTransformer::new();
        let first = transformer.process_document(&doc);
        let second = transformer.process_document(&doc);
        prop_assert_eq!(first, second);
    }

    /// Mandatory-field law: a blank identifier always rejects with
    /// "Missing ID", no matter what the rest of the document holds.
    #[test]
    fn blank_id_always_rejects(mut doc in raw_document(), blank in "[ \t]{0,6}") {
        doc["_id"] = json!(blank);
        let (record, report) = DocumentTransformer::new().process_document(&doc);
        prop_assert!(record.is_none());
        prop_assert_eq!(report.reason.as_deref(), Some("Missing ID"));
    }
}
