// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use jig_readiness::domain::types::{AvailabilityStatus, LaunchStatus};
use jig_readiness::domain::PartRecord;
use jig_readiness::importer::{DerivationService, DerivationServiceImpl, PartsPipeline};
use jig_readiness::store::PartsSnapshot;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

// ==========================================
// PartRecord 构建器
// ==========================================

pub struct PartBuilder {
    tester_id: String,
    jig_number: String,
    sale_order: String,
    part_number: String,
    unit_name: String,
    required: u32,
    stock: u32,
    official_incharge: String,
}

impl PartBuilder {
    pub fn new(jig_number: &str, sale_order: &str, part_number: &str) -> Self {
        Self {
            tester_id: format!("T-{}", jig_number),
            jig_number: jig_number.to_string(),
            sale_order: sale_order.to_string(),
            part_number: part_number.to_string(),
            unit_name: "Connector".to_string(),
            required: 1,
            stock: 1,
            official_incharge: "N/A".to_string(),
        }
    }

    pub fn quantities(mut self, required: u32, stock: u32) -> Self {
        self.required = required;
        self.stock = stock;
        self
    }

    pub fn unit_name(mut self, unit_name: &str) -> Self {
        self.unit_name = unit_name.to_string();
        self
    }

    pub fn incharge(mut self, contact: &str) -> Self {
        self.official_incharge = contact.to_string();
        self
    }

    /// 构建记录（可用状态按数量派生，上线状态暂定 Ready）
    pub fn build(self) -> PartRecord {
        PartRecord {
            tester_id: self.tester_id,
            tester_jig_number: self.jig_number,
            sale_order: self.sale_order,
            top_assy_no: "TA-100".to_string(),
            part_number: self.part_number,
            unit_name: self.unit_name,
            required_quantity: self.required,
            current_stock: self.stock,
            availability_status: DerivationServiceImpl
                .classify_availability(self.required, self.stock),
            official_incharge: self.official_incharge,
            status: LaunchStatus::Ready,
        }
    }
}

/// 由记录构建快照（统一派生上线状态）
pub fn snapshot_from(mut records: Vec<PartRecord>) -> PartsSnapshot {
    PartsPipeline::default().assign_launch_status(&mut records);
    PartsSnapshot::from_records(records, None)
}

/// 标准场景快照
///
/// - JIG-100 / SO-1: 缺料（P-1 需 10 存 7）
/// - JIG-100 / SO-2: 齐套
/// - JIG-200 / SO-9: 齐套（含富余与无需求物料）
pub fn sample_snapshot() -> PartsSnapshot {
    snapshot_from(vec![
        PartBuilder::new("JIG-100", "SO-1", "P-1")
            .quantities(10, 7)
            .incharge("ops@example.com")
            .build(),
        PartBuilder::new("JIG-100", "SO-1", "P-2")
            .quantities(5, 5)
            .build(),
        PartBuilder::new("JIG-100", "SO-2", "P-3")
            .quantities(2, 4)
            .build(),
        PartBuilder::new("JIG-200", "SO-9", "P-4")
            .quantities(3, 9)
            .build(),
        PartBuilder::new("JIG-200", "SO-9", "P-5")
            .quantities(0, 3)
            .build(),
    ])
}

pub fn assert_status(record: &PartRecord, expected: AvailabilityStatus) {
    assert_eq!(
        record.availability_status, expected,
        "part {} has unexpected availability status",
        record.part_number
    );
}

// ==========================================
// 输入文件构建
// ==========================================

/// 写出 CSV 输入文件
pub fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&path, content).expect("write csv fixture");
    path
}

/// 写出 xlsx 输入文件（首个工作表，全部按文本写入）
pub fn write_xlsx(dir: &Path, name: &str, headers: &[&str], rows: &[Vec<&str>]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in (0u16..).zip(headers) {
        worksheet.write_string(0, col, *header).expect("write header");
    }
    for (row_idx, row) in (1u32..).zip(rows) {
        for (col, value) in (0u16..).zip(row) {
            match value.parse::<f64>() {
                Ok(n) => worksheet.write_number(row_idx, col, n).expect("write number"),
                Err(_) => worksheet.write_string(row_idx, col, *value).expect("write string"),
            };
        }
    }

    workbook.save(&path).expect("save xlsx fixture");
    path
}
