// ==========================================
// 测试夹具物料齐套系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::parts_importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::warn;

/// 原始行（列名 → 单元格文本）
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    /// 表格中的行号（表头为第 1 行）
    pub row_number: usize,
    pub cells: HashMap<String, String>,
}

/// 解析后的工作表
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    /// 无法读取而跳过的记录数
    pub malformed_rows: usize,
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 按表头组装一行，全空行返回 None
fn build_row<I>(headers: &[String], values: I, row_number: usize) -> Option<RawRow>
where
    I: Iterator<Item = String>,
{
    let mut cells = HashMap::new();
    for (col_idx, value) in values.enumerate() {
        if let Some(header) = headers.get(col_idx) {
            if header.is_empty() {
                continue;
            }
            cells.insert(header.clone(), value.trim().to_string());
        }
    }

    if cells.values().all(|v| v.is_empty()) {
        return None;
    }

    Some(RawRow { row_number, cells })
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 按字节读取，非 UTF-8 内容（如 Windows-1252 另存）有损解码
        // 读取表头（Excel 另存的 CSV 可能带 BOM）
        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();

        let source = file_path.display().to_string();
        let mut rows = Vec::new();
        let mut malformed_rows = 0;
        for (idx, result) in reader.byte_records().enumerate() {
            let row_number = idx + 2;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(source = %source, row_number, error = %e, "CSV 记录无法读取，跳过该行");
                    malformed_rows += 1;
                    continue;
                }
            };
            let values = record
                .iter()
                .map(|v| String::from_utf8_lossy(v).into_owned());
            if let Some(row) = build_row(&headers, values, row_number) {
                rows.push(row);
            }
        }

        Ok(ParsedSheet {
            source,
            headers,
            rows,
            malformed_rows,
        })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut range_rows = range.rows();
        let header_row = match range_rows.next() {
            Some(row) => row,
            None => {
                return Ok(ParsedSheet {
                    source: file_path.display().to_string(),
                    ..Default::default()
                })
            }
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, data_row) in range_rows.enumerate() {
            let values = data_row.iter().map(|cell| cell.to_string());
            if let Some(row) = build_row(&headers, values, idx + 2) {
                rows.push(row);
            }
        }

        Ok(ParsedSheet {
            source: file_path.display().to_string(),
            headers,
            rows,
            malformed_rows: 0,
        })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_sheet(file_path),
            "xlsx" | "xls" => ExcelParser.parse_sheet(file_path),
            other => {
                check_exists(file_path)?;
                Err(ImportError::UnsupportedFormat(other.to_string()))
            }
        }
    }
}
