//! # Conformance Fixtures
//!
//! Published status lists of 1,048,576 entries at every bit width, each
//! with a handful of scattered non-zero entries. The decoded flat list must
//! match the expected entries exactly and be zero everywhere else.

use std::collections::BTreeMap;

use tsl_core::{BitStatusArray, BitsPerEntry, StatusListDocument, WireCodec};

const TOTAL_ENTRIES: usize = 1_048_576;

fn expected(json: &str) -> BTreeMap<usize, u8> {
    let raw: BTreeMap<String, u8> = serde_json::from_str(json).unwrap();
    raw.into_iter()
        .map(|(index, value)| (index.parse().unwrap(), value))
        .collect()
}

fn assert_fixture(bits: BitsPerEntry, encoded: &str, expected_json: &str) {
    let expected = expected(expected_json);
    let list = WireCodec::decode(bits, encoded).unwrap();
    assert_eq!(list.len(), TOTAL_ENTRIES);

    for (index, value) in list.iter().enumerate() {
        let want = expected.get(&index).copied().unwrap_or(0);
        assert_eq!(*value, want, "bits = {bits}, index = {index}");
    }

    // The packed view answers the same for every entry.
    let array = BitStatusArray::from_encoded(bits, encoded).unwrap();
    assert_eq!(array.to_flat(), list);
    for (&index, &value) in &expected {
        assert_eq!(array.get(index).unwrap(), value);
    }
}

#[test]
fn one_bit_list() {
    assert_fixture(
        BitsPerEntry::One,
        include_str!("fixtures/status_list_1bit.txt"),
        include_str!("fixtures/status_list_1bit.expected.json"),
    );
}

#[test]
fn two_bit_list() {
    assert_fixture(
        BitsPerEntry::Two,
        include_str!("fixtures/status_list_2bit.txt"),
        include_str!("fixtures/status_list_2bit.expected.json"),
    );
}

#[test]
fn four_bit_list_covers_every_value() {
    let expected = expected(include_str!("fixtures/status_list_4bit.expected.json"));
    let mut values: Vec<u8> = expected.values().copied().collect();
    values.sort_unstable();
    assert_eq!(values, (1..=15).collect::<Vec<u8>>());

    assert_fixture(
        BitsPerEntry::Four,
        include_str!("fixtures/status_list_4bit.txt"),
        include_str!("fixtures/status_list_4bit.expected.json"),
    );
}

#[test]
fn eight_bit_list_covers_every_value() {
    let expected = expected(include_str!("fixtures/status_list_8bit.expected.json"));
    let mut values: Vec<u8> = expected.values().copied().collect();
    values.sort_unstable();
    assert_eq!(values, (1..=255).collect::<Vec<u8>>());

    assert_fixture(
        BitsPerEntry::Eight,
        include_str!("fixtures/status_list_8bit.txt"),
        include_str!("fixtures/status_list_8bit.expected.json"),
    );
}

#[test]
fn decoding_twice_is_identical() {
    let encoded = include_str!("fixtures/status_list_4bit.txt");
    let first = WireCodec::decode(BitsPerEntry::Four, encoded).unwrap();
    let second = WireCodec::decode(BitsPerEntry::Four, encoded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn document_reports_total_entries() {
    let raw = WireCodec::decode_packed(include_str!("fixtures/status_list_1bit.txt")).unwrap();
    let document = StatusListDocument::from_packed(BitsPerEntry::One, raw, None).unwrap();
    assert_eq!(document.total_entries as usize, TOTAL_ENTRIES);
    assert_eq!(document.status(1993), Some(1));
    assert_eq!(document.status(1994), Some(0));
    assert_eq!(document.status(TOTAL_ENTRIES as u32), None);
}
