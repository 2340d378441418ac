// ==========================================
// 测试夹具物料齐套系统 - 导入层
// ==========================================
// 职责: 外部 BOM 表导入,生成平面文件与物料记录
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod derivation;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod parts_importer_trait;
pub mod parts_pipeline;
pub mod parts_transformer;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use derivation::DerivationService as DerivationServiceImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{normalize_header, ColumnMap, FieldMapper as FieldMapperImpl, PartField};
pub use file_parser::{CsvParser, ExcelParser, ParsedSheet, RawRow, UniversalFileParser};
pub use parts_pipeline::{PartsPipeline, PipelineStats};
pub use parts_transformer::{write_flat_file, FailedInput, PartsTransformer, TransformReport};

// 重导出 Trait 接口
pub use parts_importer_trait::{DataCleaner, DerivationService, FieldMapper, FileParser};
