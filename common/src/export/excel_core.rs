//! Excel生成（共通ライブラリ）
//!
//! 閾値ごとの評価結果を1シートの表として出力する

use crate::types::EvaluationRow;
use rust_xlsxwriter::*;

/// 見出し行
const HEADERS: [&str; 8] = [
    "cutoff",
    "right",
    "wrong",
    "missing",
    "retained",
    "precision",
    "recall",
    "f_measure",
];

/// 評価結果のExcelをバッファに生成
///
/// 適合率・F値が未定義の行は空セルにする。
pub fn generate_evaluation_xlsx(rows: &[EvaluationRow]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let ratio_format = Format::new().set_num_format("0.0000");
    let cutoff_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("evaluation")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;

        worksheet
            .write_number_with_format(r, 0, row.cutoff, &cutoff_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;

        let counts = [row.right, row.wrong, row.missing, row.retained()];
        for (offset, count) in counts.iter().enumerate() {
            worksheet
                .write_number(r, (offset + 1) as u16, *count as f64)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }

        let ratios = [row.precision, Some(row.recall), row.f_measure];
        for (offset, ratio) in ratios.iter().enumerate() {
            if let Some(value) = ratio {
                worksheet
                    .write_number_with_format(r, (offset + 5) as u16, *value, &ratio_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
