// ==========================================
// 测试夹具物料齐套系统 - 导出 API
// ==========================================
// 职责: 按导出类型选取物料子集并生成 Excel 附件
// ==========================================

use std::sync::Arc;

use tracing::info;

use crate::api::error::ApiResult;
use crate::api::jig_api::JigApi;
use crate::exporter::{ExportKind, XlsxExporter};

/// 导出文件
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct ExportApi {
    jig_api: Arc<JigApi>,
}

impl ExportApi {
    pub fn new(jig_api: Arc<JigApi>) -> Self {
        Self { jig_api }
    }

    /// 生成导出文件
    ///
    /// 夹具/销售订单不存在时返回 NotFound；子集为空时导出仅含表头的工作簿
    pub fn export(
        &self,
        jig_number: &str,
        sale_order: Option<&str>,
        kind: ExportKind,
    ) -> ApiResult<ExportFile> {
        let bytes = match kind {
            ExportKind::AllParts | ExportKind::Shortage => {
                let parts = self.jig_api.get_parts(
                    jig_number,
                    sale_order,
                    kind == ExportKind::Shortage,
                )?;
                let refs: Vec<_> = parts.iter().collect();
                XlsxExporter::export_parts(kind, &refs)?
            }
            ExportKind::Recommended => {
                let recs = self.jig_api.recommend_purchase(jig_number, sale_order)?;
                XlsxExporter::export_recommendations(&recs)?
            }
        };

        // 文件名使用快照中的规范夹具号
        let canonical = self
            .jig_api
            .snapshot()
            .find_jig(jig_number)
            .map(|jig| jig.jig_number().to_string())
            .unwrap_or_else(|| jig_number.trim().to_string());
        let file_name = kind.file_name(&canonical);
        info!(
            file_name = %file_name,
            sheet = kind.sheet_name(),
            bytes = bytes.len(),
            "导出文件已生成"
        );
        Ok(ExportFile { file_name, bytes })
    }
}
