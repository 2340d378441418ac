// ==========================================
// 测试夹具物料齐套系统 - 状态派生服务实现
// ==========================================
// 职责: availability_status / status / 建议采购量 派生
// 红线: 纯函数，无外部依赖
// ==========================================

use crate::domain::types::{AvailabilityStatus, LaunchStatus};
use crate::importer::parts_importer_trait::DerivationService as DerivationServiceTrait;

pub struct DerivationService;

impl DerivationServiceTrait for DerivationService {
    /// 派生物料可用状态
    ///
    /// # 规则
    /// - required = 0 → Not Applicable
    /// - stock == required → Adequate
    /// - stock < required → Shortage
    /// - stock > required → Surplus
    fn classify_availability(&self, required: u32, stock: u32) -> AvailabilityStatus {
        if required == 0 {
            return AvailabilityStatus::NotApplicable;
        }
        match stock.cmp(&required) {
            std::cmp::Ordering::Equal => AvailabilityStatus::Adequate,
            std::cmp::Ordering::Less => AvailabilityStatus::Shortage,
            std::cmp::Ordering::Greater => AvailabilityStatus::Surplus,
        }
    }

    /// 派生组级上线状态
    ///
    /// # 规则
    /// - 任一物料 Shortage → Shortage-exists
    /// - 否则（含空组）→ Ready
    fn derive_launch_status(&self, statuses: &[AvailabilityStatus]) -> LaunchStatus {
        if statuses.iter().any(AvailabilityStatus::is_shortage) {
            LaunchStatus::ShortageExists
        } else {
            LaunchStatus::Ready
        }
    }

    /// 派生建议采购数量
    ///
    /// # 规则
    /// - 缺口 = required - stock（非缺料为 0）
    /// - 建议量 = ceil(缺口 × (1 + p_factor / 100))
    /// - p_factor 为负或非有限值时按 0 处理
    fn derive_recommended_quantity(&self, required: u32, stock: u32, p_factor: f64) -> u32 {
        let deficit = required.saturating_sub(stock);
        if deficit == 0 {
            return 0;
        }

        let factor = if p_factor.is_finite() && p_factor > 0.0 {
            p_factor
        } else {
            0.0
        };

        // 先乘后除，整数百分比下结果精确
        let recommended = (deficit as f64 * (100.0 + factor) / 100.0).ceil();
        if recommended >= u32::MAX as f64 {
            u32::MAX
        } else {
            recommended as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_documented_examples() {
        let service = DerivationService;

        assert_eq!(
            service.classify_availability(10, 7),
            AvailabilityStatus::Shortage
        );
        assert_eq!(
            service.classify_availability(5, 5),
            AvailabilityStatus::Adequate
        );
        assert_eq!(
            service.classify_availability(0, 3),
            AvailabilityStatus::NotApplicable
        );
        assert_eq!(
            service.classify_availability(3, 9),
            AvailabilityStatus::Surplus
        );
    }

    #[test]
    fn test_classify_zero_required_ignores_stock() {
        let service = DerivationService;
        for stock in [0, 1, 50, u32::MAX] {
            assert_eq!(
                service.classify_availability(0, stock),
                AvailabilityStatus::NotApplicable
            );
        }
    }

    #[test]
    fn test_classify_positive_required_matches_comparison() {
        let service = DerivationService;
        for required in 1..=12u32 {
            for stock in 0..=15u32 {
                let expected = if stock == required {
                    AvailabilityStatus::Adequate
                } else if stock < required {
                    AvailabilityStatus::Shortage
                } else {
                    AvailabilityStatus::Surplus
                };
                assert_eq!(service.classify_availability(required, stock), expected);
            }
        }
    }

    #[test]
    fn test_derive_launch_status() {
        let service = DerivationService;

        assert_eq!(
            service.derive_launch_status(&[
                AvailabilityStatus::Adequate,
                AvailabilityStatus::Shortage,
                AvailabilityStatus::Surplus,
            ]),
            LaunchStatus::ShortageExists
        );
        assert_eq!(
            service.derive_launch_status(&[
                AvailabilityStatus::Adequate,
                AvailabilityStatus::NotApplicable,
                AvailabilityStatus::Surplus,
            ]),
            LaunchStatus::Ready
        );
        assert_eq!(service.derive_launch_status(&[]), LaunchStatus::Ready);
    }

    #[test]
    fn test_derive_recommended_quantity() {
        let service = DerivationService;

        // 缺口 3，裕量 10% → ceil(3.3) = 4
        assert_eq!(service.derive_recommended_quantity(10, 7, 10.0), 4);
        // 缺口 10，裕量 0 → 10
        assert_eq!(service.derive_recommended_quantity(10, 0, 0.0), 10);
        // 缺口 10，裕量 10% → 11（不因浮点误差进位到 12）
        assert_eq!(service.derive_recommended_quantity(10, 0, 10.0), 11);
        // 缺口 10，裕量 25% → 12.5 → 13
        assert_eq!(service.derive_recommended_quantity(10, 0, 25.0), 13);
        // 非缺料 → 0
        assert_eq!(service.derive_recommended_quantity(5, 5, 10.0), 0);
        assert_eq!(service.derive_recommended_quantity(5, 9, 10.0), 0);
        // 负裕量按 0
        assert_eq!(service.derive_recommended_quantity(4, 0, -50.0), 4);
    }
}
