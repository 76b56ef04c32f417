//! Conversions between A1-style cell references and zero-based indexes.

/// Converts column letters (case-insensitive) to a zero-based column index: A = 0, Z = 25, AA = 26.
pub(crate) fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.bytes().all(|byte| byte.is_ascii_alphabetic()) {
        return None;
    }
    letters
        .bytes()
        .map(|byte| (byte.to_ascii_uppercase() - b'A') as usize + 1)
        .try_fold(0usize, |index, digit| index.checked_mul(26)?.checked_add(digit))
        .map(|column| column - 1)
}

/// Converts a one-based row number to a zero-based row index.
pub(crate) fn row_to_index(number: &str) -> Option<usize> {
    number
        .parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .map(|row| row - 1)
}

/// Splits a reference such as `B12` into zero-based `(row, col)`.
pub(crate) fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    let col = col_to_index(letters)?;
    let row = row_to_index(digits)?;
    Some((row, col))
}

/// Builds the reference of a zero-based `(row, col)` pair, e.g. `(11, 1)` is `B12`.
pub(crate) fn index_to_reference(row: usize, col: usize) -> String {
    let mut letters = Vec::<u8>::new();
    let mut column = col + 1;
    while column > 0 {
        column -= 1;
        letters.push(b'A' + (column % 26) as u8);
        column /= 26;
    }
    letters.reverse();
    let mut reference = String::from_utf8(letters).unwrap_or_default();
    reference.push_str(&(row + 1).to_string());
    reference
}
