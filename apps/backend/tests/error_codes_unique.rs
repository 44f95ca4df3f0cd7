use std::collections::HashSet;

use okey_backend::errors::ErrorCode;

#[test]
fn error_codes_are_unique() {
    let mut seen = HashSet::new();
    for code in ErrorCode::ALL {
        let s = code.as_str();
        assert!(seen.insert(s), "Duplicate error code string: {s}");
    }
    assert_eq!(seen.len(), ErrorCode::ALL.len());
}
