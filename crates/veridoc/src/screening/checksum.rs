//! Checksum and format validation for government identifiers.
//!
//! National ID numbers carry a Verhoeff check digit: the dihedral-group
//! multiplication walk below detects every single-digit substitution and
//! every adjacent transposition. Validation is total; malformed input is
//! simply invalid, never an error.

use super::domain::DocumentType;

const MULTIPLICATION: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const PERMUTATION: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

const NATIONAL_ID_LENGTH: usize = 12;
const TAX_ID_LENGTH: usize = 10;

/// Checksum validity for the given document type. Document types without a
/// checksum scheme always pass; format checks live in [`validate_format`].
pub fn validate(document_type: DocumentType, id_number: &str) -> bool {
    match document_type {
        DocumentType::NationalId => {
            national_id_shaped(id_number) && verhoeff_checksum_holds(id_number)
        }
        DocumentType::TaxId | DocumentType::UtilityBill => true,
    }
}

/// Structural format validity for the given document type.
pub fn validate_format(document_type: DocumentType, id_number: &str) -> bool {
    match document_type {
        DocumentType::NationalId => national_id_shaped(id_number),
        DocumentType::TaxId => tax_id_shaped(id_number),
        DocumentType::UtilityBill => true,
    }
}

/// Walk the digits right to left through the multiplication table; the
/// number is genuine iff the running checksum lands back on zero.
fn verhoeff_checksum_holds(digits: &str) -> bool {
    let mut checksum = 0u8;
    for (position, ch) in digits.chars().rev().enumerate() {
        let digit = match ch.to_digit(10) {
            Some(digit) => digit as usize,
            None => return false,
        };
        checksum = MULTIPLICATION[checksum as usize][PERMUTATION[position % 8][digit] as usize];
    }
    checksum == 0
}

fn national_id_shaped(id_number: &str) -> bool {
    id_number.len() == NATIONAL_ID_LENGTH && id_number.bytes().all(|byte| byte.is_ascii_digit())
}

/// Five uppercase letters, four digits, one uppercase letter; case-sensitive.
fn tax_id_shaped(id_number: &str) -> bool {
    let bytes = id_number.as_bytes();
    bytes.len() == TAX_ID_LENGTH
        && bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase()
}
