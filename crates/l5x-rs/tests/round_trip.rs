// crates/l5x-rs/tests/round_trip.rs

//! Property tests for canonical encodings and document persistence.

use l5x_rs::{Codec, Document, Element, Parsed, SafetyNetworkNumber, WriteOptions};
use proptest::prelude::*;

const SNN_MAX: u64 = (1 << 48) - 1;

proptest! {
    #[test]
    fn snn_canonical_form_is_idempotent(number in 0..=SNN_MAX, separators in any::<bool>()) {
        let hex = format!("{:x}", number);
        let input = if separators {
            hex.chars()
                .enumerate()
                .flat_map(|(i, c)| if i > 0 && i % 3 == 0 { vec!['_', c] } else { vec![c] })
                .collect()
        } else {
            hex
        };

        let codec = SafetyNetworkNumber;
        let canonical = codec.encode(&input).unwrap();
        prop_assert!(canonical.starts_with("16#0000_"));
        prop_assert_eq!(canonical.len(), "16#0000_XXXX_XXXX_XXXX".len());

        let decoded = codec.decode(&canonical).unwrap();
        prop_assert_eq!(u64::from_str_radix(&decoded, 16).unwrap(), number);
        prop_assert_eq!(codec.encode(&decoded).unwrap(), canonical);
    }

    #[test]
    fn snn_rejects_anything_wider_than_48_bits(number in (SNN_MAX + 1)..=u64::MAX) {
        let result = SafetyNetworkNumber.encode(&format!("{:X}", number));
        prop_assert!(result.is_err());
    }

    #[test]
    fn parsed_integers_round_trip(value in any::<i64>()) {
        let codec = Parsed::<i64>::new();
        let encoded = codec.encode(&value).unwrap();
        prop_assert_eq!(codec.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn attribute_values_survive_a_save(value in "[ -~\u{e9}\u{3bc}]{0,40}") {
        let root = Element::new("Module");
        root.set_attribute("Description", value.clone());
        let written = Document::new(root).write_with(&WriteOptions::compact()).unwrap();

        let reparsed = Document::parse(&written).unwrap();
        prop_assert_eq!(reparsed.root().attribute("Description"), Some(value));
    }
}
