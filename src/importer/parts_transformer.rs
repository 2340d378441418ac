// ==========================================
// 测试夹具物料齐套系统 - 批量转换器
// ==========================================
// 职责: 多个 BOM 表 → 单个平面文件
// 流程: 并发解析各文件 → 汇总 → 上线状态派生 → 写出 CSV
// 说明: 各文件独立，单个文件失败不影响其他文件
// ==========================================

use crate::domain::part::{PartRecord, FLAT_FILE_COLUMNS};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::parts_pipeline::{PartsPipeline, PipelineStats};
use csv::WriterBuilder;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// 解析失败的输入文件
#[derive(Debug, Clone, Serialize)]
pub struct FailedInput {
    pub file: String,
    pub reason: String,
}

/// 转换报告
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    pub batch_id: String,
    pub inputs: Vec<String>,
    pub output: String,
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
    pub rows_coerced: usize,
    pub rows_malformed: usize,
    pub jig_count: usize,
    pub failed_inputs: Vec<FailedInput>,
    pub elapsed_ms: u128,
}

pub struct PartsTransformer {
    pipeline: Arc<PartsPipeline>,
}

impl Default for PartsTransformer {
    fn default() -> Self {
        Self::new(PartsPipeline::default())
    }
}

impl PartsTransformer {
    pub fn new(pipeline: PartsPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// 转换多个输入文件并写出平面文件
    ///
    /// # 返回
    /// - Ok(TransformReport): 至少一个输入文件解析成功
    /// - Err(NoUsableInput): 无输入或全部失败（不写出文件）
    /// - Err(OutputWriteError): 平面文件写出失败
    #[instrument(skip(self, inputs, output), fields(batch_id))]
    pub async fn transform_files<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        output: &Path,
    ) -> ImportResult<TransformReport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let input_paths: Vec<PathBuf> = inputs.iter().map(|p| p.as_ref().to_path_buf()).collect();
        info!(
            batch_id = %batch_id,
            inputs = input_paths.len(),
            output = %output.display(),
            "开始转换物料数据"
        );

        if input_paths.is_empty() {
            return Err(ImportError::NoUsableInput("未指定输入文件".to_string()));
        }

        // === 步骤 1: 并发解析 ===
        let tasks = input_paths.iter().cloned().map(|path| {
            let pipeline = Arc::clone(&self.pipeline);
            tokio::task::spawn_blocking(move || {
                let result = pipeline.read_file(&path);
                (path, result)
            })
        });
        let outcomes = futures::future::join_all(tasks).await;

        // === 步骤 2: 汇总 ===
        let mut records: Vec<PartRecord> = Vec::new();
        let mut stats = PipelineStats::default();
        let mut failed_inputs = Vec::new();

        for outcome in outcomes {
            let (path, result) =
                outcome.map_err(|e| ImportError::InternalError(format!("解析任务异常: {}", e)))?;
            match result {
                Ok((file_records, file_stats)) => {
                    info!(
                        file = %path.display(),
                        rows_read = file_stats.rows_read,
                        rows_built = file_stats.rows_built,
                        "输入文件解析完成"
                    );
                    stats.merge(file_stats);
                    records.extend(file_records);
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "输入文件解析失败，已跳过");
                    failed_inputs.push(FailedInput {
                        file: path.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if failed_inputs.len() == input_paths.len() {
            error!(batch_id = %batch_id, "全部输入文件解析失败");
            return Err(ImportError::NoUsableInput(
                failed_inputs
                    .iter()
                    .map(|f| format!("{}: {}", f.file, f.reason))
                    .collect::<Vec<_>>()
                    .join("; "),
            ));
        }

        // === 步骤 3: 上线状态派生 ===
        self.pipeline.assign_launch_status(&mut records);

        // === 步骤 4: 写出 ===
        write_flat_file(output, &records)?;

        let jig_count = records
            .iter()
            .map(|r| r.tester_jig_number.as_str())
            .collect::<HashSet<_>>()
            .len();

        let report = TransformReport {
            batch_id,
            inputs: input_paths.iter().map(|p| p.display().to_string()).collect(),
            output: output.display().to_string(),
            rows_read: stats.rows_read,
            rows_written: records.len(),
            rows_skipped: stats.rows_skipped,
            rows_coerced: stats.rows_coerced,
            rows_malformed: stats.rows_malformed,
            jig_count,
            failed_inputs,
            elapsed_ms: start_time.elapsed().as_millis(),
        };

        info!(
            rows_written = report.rows_written,
            jig_count = report.jig_count,
            elapsed_ms = report.elapsed_ms as u64,
            "物料数据转换完成"
        );

        Ok(report)
    }
}

/// 写出平面文件（表头固定，零记录时仅含表头）
pub fn write_flat_file(path: &Path, records: &[PartRecord]) -> ImportResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ImportError::OutputWriteError(e.to_string()))?;
        }
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| ImportError::OutputWriteError(e.to_string()))?;

    writer
        .write_record(FLAT_FILE_COLUMNS)
        .map_err(|e| ImportError::OutputWriteError(e.to_string()))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| ImportError::OutputWriteError(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| ImportError::OutputWriteError(e.to_string()))?;

    Ok(())
}
