use super::common::{VALID_NATIONAL_ID, VALID_NATIONAL_ID_ALT};
use crate::screening::checksum::{validate, validate_format};
use crate::screening::domain::DocumentType;

#[test]
fn accepts_genuine_national_ids() {
    assert!(validate(DocumentType::NationalId, VALID_NATIONAL_ID));
    assert!(validate(DocumentType::NationalId, VALID_NATIONAL_ID_ALT));
}

#[test]
fn rejects_single_digit_substitution() {
    // Last digit altered from the genuine value.
    assert!(!validate(DocumentType::NationalId, "123456789011"));
    // Interior digit altered.
    assert!(!validate(DocumentType::NationalId, "123456799010"));
}

#[test]
fn rejects_adjacent_transposition() {
    // "...10" swapped to "...01".
    assert!(!validate(DocumentType::NationalId, "123456789001"));
    // Leading pair swapped.
    assert!(!validate(DocumentType::NationalId, "213456789010"));
}

#[test]
fn rejects_malformed_national_ids_without_panicking() {
    assert!(!validate(DocumentType::NationalId, ""));
    assert!(!validate(DocumentType::NationalId, "12345678901"));
    assert!(!validate(DocumentType::NationalId, "1234567890123"));
    assert!(!validate(DocumentType::NationalId, "12345678901a"));
    assert!(!validate(DocumentType::NationalId, "१२३४५६७८९०१०"));
}

#[test]
fn checksum_does_not_apply_to_other_document_types() {
    assert!(validate(DocumentType::TaxId, "anything"));
    assert!(validate(DocumentType::UtilityBill, ""));
}

#[test]
fn national_id_format_requires_exactly_twelve_digits() {
    assert!(validate_format(DocumentType::NationalId, VALID_NATIONAL_ID));
    assert!(!validate_format(DocumentType::NationalId, "12345678901"));
    assert!(!validate_format(DocumentType::NationalId, "12 345678901"));
}

#[test]
fn tax_id_format_is_case_sensitive() {
    assert!(validate_format(DocumentType::TaxId, "ABCDE1234F"));
    assert!(!validate_format(DocumentType::TaxId, "abcde1234f"));
    assert!(!validate_format(DocumentType::TaxId, "ABCDE1234"));
    assert!(!validate_format(DocumentType::TaxId, "ABCD11234FF"));
    assert!(!validate_format(DocumentType::TaxId, "ABCDE12345"));
}

#[test]
fn utility_bills_have_no_id_format() {
    assert!(validate_format(DocumentType::UtilityBill, ""));
    assert!(validate_format(DocumentType::UtilityBill, "ACME-2024-0091"));
}
