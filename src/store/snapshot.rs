// ==========================================
// 测试夹具物料齐套系统 - 物料快照
// ==========================================
// 结构: 夹具号 → 销售订单 → 物料记录列表（单次分组构建）
// 红线: 构建后只读，不做增量修改；重新加载即整体重建
// 红线: 上线状态只由组内可用状态派生，不信任记录中的旧值
// ==========================================

use crate::domain::part::PartRecord;
use crate::domain::types::{AvailabilityStatus, LaunchStatus};
use crate::importer::{DerivationService, DerivationServiceImpl};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ==========================================
// JigGroup - 单个夹具的物料分组
// ==========================================
#[derive(Debug, Clone)]
pub struct JigGroup {
    jig_number: String,
    sale_orders: BTreeMap<String, Vec<PartRecord>>,
}

impl JigGroup {
    pub fn jig_number(&self) -> &str {
        &self.jig_number
    }

    /// 销售订单号（升序）
    pub fn sale_order_numbers(&self) -> Vec<String> {
        self.sale_orders.keys().cloned().collect()
    }

    pub fn sale_orders(&self) -> &BTreeMap<String, Vec<PartRecord>> {
        &self.sale_orders
    }

    pub fn has_sale_order(&self, sale_order: &str) -> bool {
        self.sale_orders.contains_key(sale_order)
    }

    /// 首条记录（按销售订单升序），用于汇总元信息
    pub fn first_record(&self) -> Option<&PartRecord> {
        self.sale_orders.values().flat_map(|parts| parts.iter()).next()
    }

    /// 物料记录，可按销售订单过滤；销售订单不存在时返回 None
    pub fn parts(&self, sale_order: Option<&str>) -> Option<Vec<&PartRecord>> {
        match sale_order {
            Some(so) => self.sale_orders.get(so).map(|parts| parts.iter().collect()),
            None => Some(self.sale_orders.values().flatten().collect()),
        }
    }

    pub fn part_count(&self) -> usize {
        self.sale_orders.values().map(Vec::len).sum()
    }

    /// 销售订单组上线状态（由组内可用状态派生）
    pub fn sale_order_status(&self, sale_order: &str) -> Option<LaunchStatus> {
        self.sale_orders.get(sale_order).map(|parts| group_status(parts))
    }

    /// 夹具级上线状态: 任一销售订单缺料即缺料
    pub fn launch_status(&self) -> LaunchStatus {
        let any_shortage = self
            .sale_orders
            .keys()
            .any(|so| self.sale_order_status(so) == Some(LaunchStatus::ShortageExists));
        if any_shortage {
            LaunchStatus::ShortageExists
        } else {
            LaunchStatus::Ready
        }
    }
}

fn group_status(parts: &[PartRecord]) -> LaunchStatus {
    let statuses: Vec<AvailabilityStatus> =
        parts.iter().map(|p| p.availability_status).collect();
    DerivationServiceImpl.derive_launch_status(&statuses)
}

// ==========================================
// PartsSnapshot - 全量物料快照
// ==========================================
#[derive(Debug, Clone)]
pub struct PartsSnapshot {
    jigs: BTreeMap<String, JigGroup>,
    record_count: usize,
    loaded_at: DateTime<Utc>,
    source: Option<PathBuf>,
}

impl PartsSnapshot {
    /// 空快照（数据文件缺失/损坏时使用）
    pub fn empty(source: Option<PathBuf>) -> Self {
        Self {
            jigs: BTreeMap::new(),
            record_count: 0,
            loaded_at: Utc::now(),
            source,
        }
    }

    /// 单次遍历构建两级分组（保持记录原始顺序）
    pub fn from_records(records: Vec<PartRecord>, source: Option<PathBuf>) -> Self {
        let record_count = records.len();
        let mut jigs: BTreeMap<String, JigGroup> = BTreeMap::new();

        for record in records {
            let group = jigs
                .entry(record.tester_jig_number.clone())
                .or_insert_with(|| JigGroup {
                    jig_number: record.tester_jig_number.clone(),
                    sale_orders: BTreeMap::new(),
                });
            group
                .sale_orders
                .entry(record.sale_order.clone())
                .or_default()
                .push(record);
        }

        // 组内记录回写派生后的上线状态
        for group in jigs.values_mut() {
            for parts in group.sale_orders.values_mut() {
                let status = group_status(parts);
                for part in parts.iter_mut() {
                    part.status = status;
                }
            }
        }

        Self {
            jigs,
            record_count,
            loaded_at: Utc::now(),
            source,
        }
    }

    /// 查找夹具: 先精确匹配（去首尾空白），再忽略大小写匹配
    pub fn find_jig(&self, jig_number: &str) -> Option<&JigGroup> {
        let key = jig_number.trim();
        if key.is_empty() {
            return None;
        }
        self.jigs.get(key).or_else(|| {
            self.jigs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, group)| group)
        })
    }

    pub fn jig_count(&self) -> usize {
        self.jigs.len()
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }
}
