// A1 notation helpers for the Sheets API.

use crate::core::workspace::WorkspaceError;

/// Sheets stops at column `ZZZ`.
const MAX_COLUMNS: u32 = 18_278;

/// Zero-based, end-exclusive cell range. Open-ended sides are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRange {
    pub start_row: Option<u32>,
    pub end_row: Option<u32>,
    pub start_column: Option<u32>,
    pub end_column: Option<u32>,
}

/// `A` -> 0, `Z` -> 25, `AA` -> 26.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

/// Inverse of `column_index`.
pub fn column_letters(index: u32) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Split `AB12` into (column, row), both zero-based and optional.
fn parse_cell(cell: &str) -> Result<(Option<u32>, Option<u32>), WorkspaceError> {
    let invalid = || WorkspaceError::InvalidArgument(format!("invalid cell reference '{cell}'"));

    let split = cell
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(cell.len());
    let (letters, digits) = cell.split_at(split);

    let column = match letters {
        "" => None,
        letters => Some(
            column_index(letters)
                .filter(|column| *column < MAX_COLUMNS)
                .ok_or_else(invalid)?,
        ),
    };
    let row = match digits {
        "" => None,
        digits => {
            let row: u32 = digits.parse().map_err(|_| invalid())?;
            if row == 0 {
                return Err(invalid());
            }
            Some(row - 1)
        }
    };

    if column.is_none() && row.is_none() {
        return Err(invalid());
    }
    Ok((column, row))
}

/// Parse `A1`, `A1:C10`, `A:C` or `2:5`. A leading `Sheet!` qualifier is ignored.
pub fn parse_range(range: &str) -> Result<CellRange, WorkspaceError> {
    let range = range.rsplit_once('!').map_or(range, |(_, r)| r).trim();
    let (start, end) = range.split_once(':').unwrap_or((range, range));

    let (start_column, start_row) = parse_cell(start.trim())?;
    let (end_column, end_row) = parse_cell(end.trim())?;

    Ok(CellRange {
        start_row,
        end_row: end_row.map(|r| r + 1),
        start_column,
        end_column: end_column.map(|c| c + 1),
    })
}

/// Prefix a range with its sheet, quoting the sheet name for the API.
///
/// An empty range addresses the whole sheet.
pub fn qualified_range(sheet_name: &str, range: &str) -> String {
    let sheet = format!("'{}'", sheet_name.replace('\'', "''"));
    match range.trim() {
        "" => sheet,
        range => format!("{sheet}!{range}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_conversions() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("AZ"), Some(51));
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);

        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_parse_bounded_range() {
        let range = parse_range("A1:C10").unwrap();
        assert_eq!(
            range,
            CellRange {
                start_row: Some(0),
                end_row: Some(10),
                start_column: Some(0),
                end_column: Some(3),
            }
        );
    }

    #[test]
    fn test_parse_single_cell_and_qualifier() {
        let range = parse_range("'My Sheet'!B2").unwrap();
        assert_eq!(range.start_row, Some(1));
        assert_eq!(range.end_row, Some(2));
        assert_eq!(range.start_column, Some(1));
        assert_eq!(range.end_column, Some(2));
    }

    #[test]
    fn test_parse_open_ranges() {
        let columns = parse_range("A:C").unwrap();
        assert_eq!(columns.start_row, None);
        assert_eq!(columns.end_column, Some(3));

        let rows = parse_range("2:5").unwrap();
        assert_eq!(rows.start_column, None);
        assert_eq!(rows.start_row, Some(1));
        assert_eq!(rows.end_row, Some(5));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_range("").is_err());
        assert!(parse_range("A0").is_err());
        assert!(parse_range("1A").is_err());
        assert!(parse_range("A1:?").is_err());
        assert!(parse_range("A1:ZZZ1").is_ok());
        assert!(parse_range("A1:AAAA1").is_err());
        assert!(parse_range("A1:ZZZZZZZ9").is_err());
    }

    #[test]
    fn test_qualified_range_quotes_sheet() {
        assert_eq!(qualified_range("Sheet1", "A1:B2"), "'Sheet1'!A1:B2");
        assert_eq!(qualified_range("Bob's data", ""), "'Bob''s data'");
    }
}
