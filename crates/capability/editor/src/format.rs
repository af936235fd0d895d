//! 展示用数值格式化；不影响提交给服务端的值。

use domain::{Niveau, Terrain};

/// 两位小数，缺失值显示为 `-`。
pub fn two_decimals(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "-".to_string(),
    }
}

/// 带单位的两位小数。
pub fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value:.2} {unit}"),
        None => "-".to_string(),
    }
}

/// 地块查看态的展示行。
pub fn terrain_rows(terrain: &Terrain) -> Vec<(&'static str, String)> {
    vec![
        ("Surface", with_unit(Some(terrain.surface), "m²")),
        ("Portance sol", with_unit(terrain.portance_sol, "kPa")),
        (
            "Profondeur nappe phréatique",
            with_unit(terrain.profondeur_nappe_phreatique, "m"),
        ),
        (
            "Parcelles cadastrales",
            terrain
                .numero_parcelles_cadastrales
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ),
        (
            "Contour",
            terrain
                .contour
                .as_ref()
                .map(|points| format!("{} points définis", points.len()))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]
}

/// 楼层表格的展示行：名称、编号、海拔、层高。
pub fn niveau_row(niveau: &Niveau) -> [String; 4] {
    [
        niveau.nom.clone(),
        niveau.numero.to_string(),
        with_unit(Some(niveau.altitude), "m"),
        with_unit(Some(niveau.hauteur_sous_plafond), "m"),
    ]
}
