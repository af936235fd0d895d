//! # 建筑资源客户端
//!
//! 对 REST 契约的类型化封装，每个 REST 动作对应一个方法。
//!
//! ## 模块说明
//!
//! - [`traits`]：`BatimentApi` 异步接口与操作枚举
//! - [`error`]：统一错误结构 `ApiError`
//! - [`credentials`]：`authToken` 凭据存储（内存 / 文件）
//! - [`http`]：基于 reqwest 的实现（生产环境使用）
//! - [`in_memory`]：内存实现，模拟外部服务端（用于测试和本地开发服务）
//!
//! ## 设计约束
//!
//! - 所有写操作返回服务端给出的完整 `Batiment`，客户端不做局部合并
//! - 非 2xx 响应统一归一为 `ApiError`；401 清除已保存的凭据
//! - 不做任何自动重试

pub mod credentials;
pub mod error;
pub mod http;
pub mod in_memory;
pub mod traits;

pub use credentials::*;
pub use error::*;
pub use http::HttpBatimentApi;
pub use in_memory::InMemoryBatimentApi;
pub use traits::*;
