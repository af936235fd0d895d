//! # 建筑配置向导
//!
//! 六个固定步骤（基本信息、尺寸、地块、基础、屋面、技术系统）在本地收集全部数据，
//! 最后一步按固定顺序发出一串相互依赖的创建请求。
//!
//! ## 模块说明
//!
//! - [`model`]：按步骤划分的类型化表单数据
//! - [`steps`]：步骤枚举与每步的本地校验
//! - [`submission`]：有序提交、逐步结果与补偿删除策略
//! - [`flow`]：向导状态机（前进 / 后退 / 提交 / 再建一个）
//!
//! ## 约束
//!
//! - 前进时只校验正在离开的步骤；后退不丢弃数据
//! - 创建失败则整个序列失败；之后的步骤相互独立，失败不中断后续步骤
//! - 任一步骤失败都不会进入成功态

pub mod flow;
pub mod model;
pub mod steps;
pub mod submission;

pub use flow::{PendingSubmission, Wizard, WizardState};
pub use model::{
    ChauffageSection, DimensionsSection, ElectriqueSection, FondationsSection, FormeBatiment,
    GeneralSection, PlomberieSection, SystemesSection, TerrainSection, ToitureSection,
    VentilationSection, WizardData,
};
pub use steps::WizardStep;
pub use submission::{
    RollbackPolicy, StepOutcome, SubmissionReport, SubmissionStep, WizardOutcome, submit,
};
