// ==========================================
// 集成测试辅助模块
// ==========================================
// 各测试二进制只使用其中一部分
#![allow(dead_code)]

pub mod api_test_helper;
pub mod mock_config;
pub mod test_data_builder;
