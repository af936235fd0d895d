//! 界面状态存储（不含领域数据）。
//!
//! 应用启动时创建并注入；测试中可直接构造或替换。

use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub sidebar_collapsed: bool,
    pub selected_batiment_id: Option<String>,
    pub selected_niveau_id: Option<String>,
    pub validation_panel_open: bool,
}

#[derive(Debug, Default)]
pub struct UiStore {
    state: RwLock<UiState>,
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: UiState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub fn snapshot(&self) -> UiState {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    fn update(&self, apply: impl FnOnce(&mut UiState)) {
        if let Ok(mut state) = self.state.write() {
            apply(&mut state);
        }
    }

    pub fn toggle_sidebar(&self) {
        self.update(|state| state.sidebar_collapsed = !state.sidebar_collapsed);
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.update(|state| state.sidebar_collapsed = collapsed);
    }

    /// 切换建筑时清空已选楼层。
    pub fn select_batiment(&self, id: Option<&str>) {
        self.update(|state| {
            if state.selected_batiment_id.as_deref() != id {
                state.selected_niveau_id = None;
            }
            state.selected_batiment_id = id.map(str::to_string);
        });
    }

    pub fn select_niveau(&self, id: Option<&str>) {
        self.update(|state| state.selected_niveau_id = id.map(str::to_string));
    }

    pub fn toggle_validation_panel(&self) {
        self.update(|state| state.validation_panel_open = !state.validation_panel_open);
    }

    pub fn set_validation_panel_open(&self, open: bool) {
        self.update(|state| state.validation_panel_open = open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_flip_flags() {
        let store = UiStore::new();
        store.toggle_sidebar();
        store.toggle_validation_panel();
        let state = store.snapshot();
        assert!(state.sidebar_collapsed);
        assert!(state.validation_panel_open);
        store.set_sidebar_collapsed(false);
        assert!(!store.snapshot().sidebar_collapsed);
    }

    #[test]
    fn changing_building_clears_level() {
        let store = UiStore::new();
        store.select_batiment(Some("b1"));
        store.select_niveau(Some("n1"));
        store.select_batiment(Some("b1"));
        assert_eq!(store.snapshot().selected_niveau_id.as_deref(), Some("n1"));
        store.select_batiment(Some("b2"));
        assert_eq!(store.snapshot().selected_niveau_id, None);
    }
}
