//! Excel出力（CLI版）

use crate::error::{LexBenchError, Result};
use lexbench_common::export::excel_core::generate_evaluation_xlsx;
use lexbench_common::EvaluationRow;
use std::path::Path;

pub fn generate_excel(rows: &[EvaluationRow], output_path: &Path) -> Result<()> {
    let buffer = generate_evaluation_xlsx(rows).map_err(LexBenchError::Export)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
