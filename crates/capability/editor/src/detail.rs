//! 建筑详情视图
//!
//! - 进入时加载一次聚合；加载中为待定状态
//! - 加载失败为终止错误状态（仅可返回列表，无重试、无部分渲染）
//! - 页签切换从不触发请求，所有页签共享同一份聚合
//! - 每次加载分配票据，过期票据或已关闭视图的结果直接丢弃

use batiment_cache::BatimentRepository;
use batiment_client::ApiError;
use domain::Batiment;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    General,
    Terrain,
    Fondations,
    Niveaux,
    Charpente,
    Toiture,
    Systemes,
}

impl DetailTab {
    pub const ALL: [DetailTab; 7] = [
        DetailTab::General,
        DetailTab::Terrain,
        DetailTab::Fondations,
        DetailTab::Niveaux,
        DetailTab::Charpente,
        DetailTab::Toiture,
        DetailTab::Systemes,
    ];

    /// 当前聚合在该页签下是否已有数据。
    pub fn has_data(self, batiment: &Batiment) -> bool {
        match self {
            DetailTab::General => true,
            DetailTab::Terrain => batiment.terrain.is_some(),
            DetailTab::Fondations => batiment.fondations.is_some(),
            DetailTab::Niveaux => !batiment.niveaux.is_empty(),
            DetailTab::Charpente => batiment.charpente.is_some(),
            DetailTab::Toiture => batiment.toiture.is_some(),
            DetailTab::Systemes => {
                batiment.systeme_electrique.is_some()
                    || batiment.systeme_plomberie.is_some()
                    || batiment.systeme_chauffage.is_some()
                    || batiment.systeme_ventilation.is_some()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Failed(ApiError),
    Loaded(Batiment),
}

/// 当前页签的呈现。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabView<'a> {
    Loading,
    Failed(&'a ApiError),
    Empty(DetailTab),
    Present(DetailTab, &'a Batiment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct DetailView {
    batiment_id: String,
    state: DetailState,
    tab: DetailTab,
    ticket: u64,
    open: bool,
}

impl DetailView {
    pub fn new(batiment_id: impl Into<String>) -> Self {
        Self {
            batiment_id: batiment_id.into(),
            state: DetailState::Loading,
            tab: DetailTab::General,
            ticket: 0,
            open: true,
        }
    }

    pub fn batiment_id(&self) -> &str {
        &self.batiment_id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn batiment(&self) -> Option<&Batiment> {
        match &self.state {
            DetailState::Loaded(batiment) => Some(batiment),
            _ => None,
        }
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 开始一次加载：进入加载态并使此前的票据失效。
    pub fn begin_load(&mut self) -> LoadTicket {
        self.ticket += 1;
        if self.batiment().is_none() {
            self.state = DetailState::Loading;
        }
        LoadTicket(self.ticket)
    }

    /// 应用加载结果；票据过期或视图已关闭时返回 `false`。
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Batiment, ApiError>) -> bool {
        if !self.open || ticket.0 != self.ticket {
            debug!(
                target: "batiment.editor",
                batiment_id = %self.batiment_id,
                "late detail result discarded"
            );
            return false;
        }
        self.state = match result {
            Ok(batiment) => DetailState::Loaded(batiment),
            Err(err) => DetailState::Failed(err),
        };
        true
    }

    /// 经由缓存读取聚合（变更后缓存已失效，此处即为重新请求）。
    pub async fn load(&mut self, repository: &BatimentRepository) {
        let ticket = self.begin_load();
        let result = repository.detail(&self.batiment_id).await;
        self.finish_load(ticket, result);
    }

    /// 用变更后的完整聚合替换当前状态。
    pub fn replace(&mut self, batiment: Batiment) {
        if self.open && batiment.id == self.batiment_id {
            self.ticket += 1;
            self.state = DetailState::Loaded(batiment);
        }
    }

    pub fn select_tab(&mut self, tab: DetailTab) {
        self.tab = tab;
    }

    pub fn tab_view(&self) -> TabView<'_> {
        match &self.state {
            DetailState::Loading => TabView::Loading,
            DetailState::Failed(err) => TabView::Failed(err),
            DetailState::Loaded(batiment) if self.tab.has_data(batiment) => {
                TabView::Present(self.tab, batiment)
            }
            DetailState::Loaded(_) => TabView::Empty(self.tab),
        }
    }

    /// 关闭视图；之后到达的结果全部丢弃。
    pub fn close(&mut self) {
        self.open = false;
    }
}
