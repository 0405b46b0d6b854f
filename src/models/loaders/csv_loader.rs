use crate::error::{AppError, AppResult};
use tracing::debug;

/// 表格中的一行：按列顺序排列的 (表头, 单元格文本)
pub type RawRow = Vec<(String, String)>;

/// 将 CSV 文本解析为按表头索引的行
///
/// # 参数
/// - `text`: CSV 文本（第一行为表头）
/// - `source_name`: 数据来源名称（仅用于错误信息和日志）
///
/// # 返回
/// 返回所有非空行；单元格不足的行缺失的列不会出现在结果中
pub fn parse_csv_rows(text: &str, source_name: &str) -> AppResult<Vec<RawRow>> {
    let text = text.trim_start_matches('\u{feff}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        // 表格导出的行长度并不总是一致
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::csv_failed(source_name, e))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::csv_failed(source_name, e))?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    debug!("{} 解析得到 {} 行", source_name, rows.len());
    Ok(rows)
}
