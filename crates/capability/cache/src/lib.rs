//! # 查询缓存层
//!
//! 以层级键寻址的只读缓存，失效驱动、无 TTL。
//!
//! ## 模块说明
//!
//! - [`key`]：层级查询键（建筑列表 / 详情 / 校验，楼层 / 房间）
//! - [`store`]：`QueryCache`，相同键的并发读取共享一次请求
//! - [`effects`]：每种变更声明的失效目标
//! - [`repository`]：`BatimentRepository`，缓存读取 + 变更后失效
//!
//! ## 一致性约束
//!
//! - 变更成功后至少失效该建筑的详情键
//! - 创建 / 删除 / 复制同时失效列表键族
//! - 失效前已发出的读取仍返回给调用方，但结果不写回缓存

pub mod effects;
pub mod key;
pub mod repository;
pub mod store;

pub use effects::invalidation_effects;
pub use key::{KeyPart, QueryKey};
pub use repository::{BatimentRepository, CachedData};
pub use store::QueryCache;
