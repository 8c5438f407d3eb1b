use proptest::prelude::*;
use reprintf::{TypedValue, apply_values, extract_values, translate};

proptest! {
    #[test]
    fn integers_survive_extraction(n in any::<i64>()) {
        let message = format!("Count: {n} items");
        let values = extract_values("Count: %d items", &message).unwrap();
        prop_assert_eq!(values, vec![TypedValue::Integer(n)]);
    }

    #[test]
    fn words_and_integers(word in "[a-zA-Z0-9]{1,12}", n in any::<i64>()) {
        let message = format!("{word} says {n}");
        let values = extract_values("%s says %d", &message).unwrap();
        prop_assert_eq!(values, vec![TypedValue::String(word), TypedValue::Integer(n)]);
    }

    #[test]
    fn floats_survive_extraction(x in -1.0e6f64..1.0e6) {
        let message = format!("Total: {x}");
        let values = extract_values("Total: %f", &message).unwrap();
        prop_assert_eq!(values, vec![TypedValue::Float(x)]);
    }

    #[test]
    fn translation_receives_exactly_its_slot_count(
        words in prop::collection::vec("[a-z]{0,5}", 0..6),
        slots in 0usize..6,
    ) {
        let translation = vec!["%s"; slots].join("|");
        let values: Vec<TypedValue> = words.iter().map(|w| TypedValue::from(w.as_str())).collect();

        let expected = (0..slots)
            .map(|i| words.get(i).map_or("", String::as_str))
            .collect::<Vec<_>>()
            .join("|");
        prop_assert_eq!(apply_values(&translation, &values), expected);
    }

    #[test]
    fn literal_percent_round_trips(before in "[a-z ]{0,12}", after in "[a-z ]{0,12}") {
        let template = format!("{before}%%{after}");
        let message = format!("{before}%{after}");
        prop_assert_eq!(translate(&template, &message, &template).unwrap(), message);
    }
}
