// ==========================================
// 测试夹具物料齐套系统 - 夹具查询 API
// ==========================================
// 职责: 夹具汇总、物料列表、缺料清单、采购建议
// 数据源: 只读快照（启动时加载）
// ==========================================

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::part::{PartRecord, PurchaseRecommendation, NOT_AVAILABLE};
use crate::domain::types::LaunchStatus;
use crate::importer::{DerivationService, DerivationServiceImpl};
use crate::store::{JigGroup, PartsSnapshot};

// ==========================================
// JigSummary - 夹具汇总
// ==========================================
/// 夹具元信息取自首个销售订单的首条记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JigSummary {
    #[serde(rename = "testerId")]
    pub tester_id: String,
    pub tester_jig_number: String,
    pub sale_orders: Vec<String>,
    pub top_assy_no: String,
    #[serde(rename = "officialIncharge")]
    pub official_incharge: String,
    /// 夹具级上线状态
    pub status: LaunchStatus,
    pub part_count: usize,
    pub shortage_count: usize,
    pub sale_order_details: Vec<SaleOrderSummary>,
}

/// 销售订单汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleOrderSummary {
    pub sale_order: String,
    pub status: LaunchStatus,
    pub part_count: usize,
    pub shortage_count: usize,
}

// ==========================================
// JigApi
// ==========================================
pub struct JigApi {
    snapshot: Arc<PartsSnapshot>,
    derivation: DerivationServiceImpl,
    p_factor: f64,
}

impl JigApi {
    /// # 参数
    /// - snapshot: 物料快照
    /// - p_factor: 采购裕量百分比（负值或非有限值按 0 处理）
    pub fn new(snapshot: Arc<PartsSnapshot>, p_factor: f64) -> Self {
        let p_factor = if p_factor.is_finite() && p_factor > 0.0 {
            p_factor
        } else {
            0.0
        };
        Self {
            snapshot,
            derivation: DerivationServiceImpl,
            p_factor,
        }
    }

    pub fn snapshot(&self) -> &PartsSnapshot {
        &self.snapshot
    }

    pub fn p_factor(&self) -> f64 {
        self.p_factor
    }

    /// 夹具汇总
    #[instrument(skip(self))]
    pub fn get_summary(&self, jig_number: &str) -> ApiResult<JigSummary> {
        let jig = self.find_jig(jig_number)?;

        let (tester_id, top_assy_no, official_incharge) = match jig.first_record() {
            Some(r) => (
                r.tester_id.clone(),
                r.top_assy_no.clone(),
                r.official_incharge.clone(),
            ),
            None => (
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
            ),
        };

        let sale_order_details: Vec<SaleOrderSummary> = jig
            .sale_orders()
            .iter()
            .map(|(so, parts)| SaleOrderSummary {
                sale_order: so.clone(),
                status: jig.sale_order_status(so).unwrap_or(LaunchStatus::Ready),
                part_count: parts.len(),
                shortage_count: parts
                    .iter()
                    .filter(|p| p.availability_status.is_shortage())
                    .count(),
            })
            .collect();

        let summary = JigSummary {
            tester_id,
            tester_jig_number: jig.jig_number().to_string(),
            sale_orders: jig.sale_order_numbers(),
            top_assy_no,
            official_incharge,
            status: jig.launch_status(),
            part_count: jig.part_count(),
            shortage_count: sale_order_details.iter().map(|s| s.shortage_count).sum(),
            sale_order_details,
        };

        debug!(
            jig_number = %summary.tester_jig_number,
            sale_orders = summary.sale_orders.len(),
            status = %summary.status,
            "夹具汇总查询完成"
        );
        Ok(summary)
    }

    /// 物料列表
    ///
    /// # 参数
    /// - sale_order: 限定销售订单（空白视为不限定）
    /// - shortage_only: 仅返回缺料物料
    #[instrument(skip(self))]
    pub fn get_parts(
        &self,
        jig_number: &str,
        sale_order: Option<&str>,
        shortage_only: bool,
    ) -> ApiResult<Vec<PartRecord>> {
        let jig = self.find_jig(jig_number)?;
        let sale_order = normalize_optional(sale_order);

        let parts = jig.parts(sale_order).ok_or_else(|| {
            ApiError::NotFound(format!(
                "No parts list found for Jig: {} and Sale Order: {}.",
                jig.jig_number(),
                sale_order.unwrap_or_default()
            ))
        })?;

        let parts: Vec<PartRecord> = parts
            .into_iter()
            .filter(|p| !shortage_only || p.availability_status.is_shortage())
            .cloned()
            .collect();

        debug!(count = parts.len(), "物料列表查询完成");
        Ok(parts)
    }

    /// 采购建议（仅缺料物料）
    #[instrument(skip(self))]
    pub fn recommend_purchase(
        &self,
        jig_number: &str,
        sale_order: Option<&str>,
    ) -> ApiResult<Vec<PurchaseRecommendation>> {
        let shortages = self.get_parts(jig_number, sale_order, true)?;

        let recommendations = shortages
            .into_iter()
            .map(|part| {
                let recommended_quantity = self.derivation.derive_recommended_quantity(
                    part.required_quantity,
                    part.current_stock,
                    self.p_factor,
                );
                PurchaseRecommendation {
                    part,
                    p_factor: self.p_factor,
                    recommended_quantity,
                }
            })
            .collect();

        Ok(recommendations)
    }

    fn find_jig(&self, jig_number: &str) -> ApiResult<&JigGroup> {
        let key = jig_number.trim();
        if key.is_empty() {
            return Err(ApiError::InvalidInput("Jig number is required.".to_string()));
        }
        self.snapshot.find_jig(key).ok_or_else(|| {
            ApiError::NotFound(format!(
                "No details found for Jig Number: {}. Please check the number.",
                key
            ))
        })
    }
}

fn normalize_optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
