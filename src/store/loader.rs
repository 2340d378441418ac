// ==========================================
// 测试夹具物料齐套系统 - 快照加载器
// ==========================================
// 职责: 平面文件 → PartsSnapshot
// 红线: 加载失败不致命，记录日志并返回空快照
// 说明: 可用状态与上线状态按数量重新派生，不信任文件中的旧值
// ==========================================

use crate::importer::{ImportError, ImportResult, PartsPipeline};
use crate::store::snapshot::PartsSnapshot;
use std::path::Path;
use tracing::{error, info, warn};

pub struct SnapshotLoader {
    pipeline: PartsPipeline,
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new(PartsPipeline::default())
    }
}

impl SnapshotLoader {
    pub fn new(pipeline: PartsPipeline) -> Self {
        Self { pipeline }
    }

    /// 加载快照（永不失败）
    ///
    /// - 文件不存在 → 警告 + 空快照
    /// - 解析失败 → 错误日志 + 空快照
    pub fn load(&self, path: &Path) -> PartsSnapshot {
        match self.try_load(path) {
            Ok(snapshot) => {
                info!(
                    data_file = %path.display(),
                    jigs = snapshot.jig_count(),
                    records = snapshot.record_count(),
                    "物料快照加载完成"
                );
                snapshot
            }
            Err(ImportError::FileNotFound(file)) => {
                warn!(data_file = %file, "平面文件不存在，请先运行 transform_parts；以空数据启动");
                PartsSnapshot::empty(Some(path.to_path_buf()))
            }
            Err(e) => {
                error!(data_file = %path.display(), error = %e, "物料快照加载失败；以空数据启动");
                PartsSnapshot::empty(Some(path.to_path_buf()))
            }
        }
    }

    /// 加载快照（返回错误，供调用方自行处理）
    pub fn try_load(&self, path: &Path) -> ImportResult<PartsSnapshot> {
        let (records, stats) = self.pipeline.read_file(path)?;
        if stats.rows_skipped > 0 || stats.rows_coerced > 0 || stats.rows_malformed > 0 {
            warn!(
                skipped = stats.rows_skipped,
                coerced = stats.rows_coerced,
                malformed = stats.rows_malformed,
                "平面文件存在脏数据行，已降级处理"
            );
        }
        // 上线状态由快照构建时按组派生
        Ok(PartsSnapshot::from_records(
            records,
            Some(path.to_path_buf()),
        ))
    }
}
