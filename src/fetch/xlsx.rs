//! XLSX形式のスプレッドシート読み込み

use crate::error::{LexBenchError, Result};
use calamine::{Data, Reader, Xlsx};
use lexbench_common::RawTable;
use std::io::Cursor;

/// 先頭シートを表として読み込む（1行目がヘッダ）
pub fn read_first_sheet(bytes: &[u8]) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| LexBenchError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LexBenchError::Spreadsheet("シートがありません".into()))?
        .map_err(|e| LexBenchError::Spreadsheet(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

    let headers = rows
        .next()
        .ok_or_else(|| LexBenchError::Spreadsheet("ヘッダ行がありません".into()))?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    Ok(RawTable::new(headers, rows.collect()))
}

/// セル値を文字列化（整数値の浮動小数は "1.0" ではなく "1"）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Float(1.0)), "1");
        assert_eq!(cell_to_string(&Data::Float(0.25)), "0.25");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
        assert_eq!(cell_to_string(&Data::String("ratio".into())), "ratio");
    }

    #[test]
    fn test_read_invalid_bytes() {
        let err = read_first_sheet(b"not a zip").unwrap_err();
        assert!(matches!(err, LexBenchError::Spreadsheet(_)));
    }
}
