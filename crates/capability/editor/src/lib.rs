//! # 建筑编辑状态模型
//!
//! 无界面的状态机，由异步调用驱动：
//!
//! - [`list`]：列表页（过滤、分页、快速创建、删除、复制）
//! - [`detail`]：详情视图（一次加载，页签切换不重新请求）
//! - [`form`] / [`elements`]：单例子资源表单（查看 → 编辑 → 查看）
//! - [`managers`] / [`collections`]：嵌套集合管理器（新增 / 编辑弹窗、确认删除）
//! - [`validation_panel`]：服务端校验报告展示
//! - [`ui_state`]：可注入的界面状态（与领域数据无关）
//! - [`rules`]：本地字段校验；失败时不发出请求
//! - [`format`]：仅用于展示的数值格式化

pub mod collections;
pub mod detail;
pub mod elements;
pub mod form;
pub mod format;
pub mod list;
pub mod managers;
pub mod rules;
pub mod ui_state;
pub mod validation_panel;

pub use detail::{DetailState, DetailTab, DetailView, LoadTicket, TabView};
pub use form::{
    ElementForm, ElementSpec, FormMode, Notice, PendingDelete, PendingSave, SubmitOutcome,
};
pub use list::ListView;
pub use managers::{
    CollectionManager, CollectionSpec, ManagerModal, PendingItem, PendingRemoval,
};
pub use rules::FieldErrors;
pub use ui_state::{UiState, UiStore};
pub use validation_panel::{IssueRow, PanelState, PanelTicket, ValidationPanel};

use batiment_client::ApiError;
use std::future::Future;
use std::pin::Pin;

/// 资源客户端方法返回的装箱 future。
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;
