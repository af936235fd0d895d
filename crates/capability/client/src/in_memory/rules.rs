//! 内存服务端的业务校验规则（外部校验引擎的简化替身）。

use domain::{Batiment, Severity, ValidationIssue, ValidationReport};

/// 最小允许的层高（米）。
const HAUTEUR_SOUS_PLAFOND_MIN: f64 = 2.2;
/// 低于该深度的基础视为未达冻结线（米）。
const PROFONDEUR_HORS_GEL: f64 = 0.5;

fn issue(rule: &str, field: Option<&str>, message: String, severity: Severity) -> ValidationIssue {
    ValidationIssue {
        rule_name: rule.to_string(),
        field: field.map(str::to_string),
        message,
        severity,
    }
}

/// 计算建筑当前状态的校验报告。
pub fn evaluate(batiment: &Batiment) -> ValidationReport {
    let mut issues = Vec::new();

    if batiment.terrain.is_none() {
        issues.push(issue(
            "TERRAIN_REQUIS",
            Some("terrain"),
            "Le terrain doit être renseigné".to_string(),
            Severity::Error,
        ));
    }

    match &batiment.fondations {
        None => issues.push(issue(
            "FONDATIONS_REQUISES",
            Some("fondations"),
            "Les fondations doivent être renseignées".to_string(),
            Severity::Error,
        )),
        Some(fondations) if fondations.profondeur < PROFONDEUR_HORS_GEL => issues.push(issue(
            "PROFONDEUR_HORS_GEL",
            Some("fondations.profondeur"),
            format!(
                "Profondeur de {} m inférieure à la profondeur hors gel ({} m)",
                fondations.profondeur, PROFONDEUR_HORS_GEL
            ),
            Severity::Warning,
        )),
        Some(_) => {}
    }

    if batiment.niveaux.is_empty() {
        issues.push(issue(
            "NIVEAU_REQUIS",
            Some("niveaux"),
            "Au moins un niveau est requis".to_string(),
            Severity::Error,
        ));
    }
    for niveau in batiment.niveaux_ordonnes() {
        if niveau.hauteur_sous_plafond < HAUTEUR_SOUS_PLAFOND_MIN {
            issues.push(issue(
                "HAUTEUR_SOUS_PLAFOND_MIN",
                Some("niveaux.hauteurSousPlafond"),
                format!(
                    "Hauteur sous plafond du niveau {} inférieure à {} m",
                    niveau.nom, HAUTEUR_SOUS_PLAFOND_MIN
                ),
                Severity::Warning,
            ));
        }
    }

    match &batiment.toiture {
        None => issues.push(issue(
            "TOITURE_MANQUANTE",
            Some("toiture"),
            "Aucune toiture renseignée".to_string(),
            Severity::Warning,
        )),
        Some(toiture) if !(0.0..=90.0).contains(&toiture.pente) => issues.push(issue(
            "PENTE_TOITURE",
            Some("toiture.pente"),
            format!("Pente de {}° hors de l'intervalle 0-90", toiture.pente),
            Severity::Error,
        )),
        Some(_) => {}
    }

    ValidationReport::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Fondations, Terrain, TypeBatiment, TypeFondation};

    #[test]
    fn empty_building_reports_missing_elements() {
        let batiment = Batiment::empty("b1", "Maison", TypeBatiment::MaisonIndividuelle);
        let report = evaluate(&batiment);
        assert!(!report.valid);
        let rules: Vec<&str> = report.errors.iter().map(|i| i.rule_name.as_str()).collect();
        assert_eq!(rules, vec!["TERRAIN_REQUIS", "FONDATIONS_REQUISES", "NIVEAU_REQUIS"]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn shallow_foundations_only_warn() {
        let mut batiment = Batiment::empty("b1", "Maison", TypeBatiment::MaisonIndividuelle);
        batiment.terrain = Some(Terrain {
            surface: 500.0,
            ..Terrain::default()
        });
        batiment.fondations = Some(Fondations::new(TypeFondation::SemellesFilantes, 0.3));
        let report = evaluate(&batiment);
        assert!(report.warnings.iter().any(|i| i.rule_name == "PROFONDEUR_HORS_GEL"));
        assert!(report.errors.iter().all(|i| i.rule_name != "FONDATIONS_REQUISES"));
    }
}
