//! 建筑（Bâtiment）聚合的领域模型。
//!
//! 一个 `Batiment` 拥有其全部子数据：地块、基础、屋架、屋面、楼层（含房间、
//! 墙体、隔墙、开口）以及四个技术系统。子对象只能经由所属建筑的路径访问。

pub mod batiment;
pub mod elements;
pub mod niveau;
pub mod systemes;
pub mod validation;

pub use batiment::{Batiment, StatutBatiment, TypeBatiment};
pub use elements::{
    Charpente, Fondations, FormeToit, Point3D, Terrain, Toiture, TypeCharpente, TypeFondation,
    TypeSol, TypeToiture,
};
pub use niveau::{
    Cloison, MateriauMur, Mur, Niveau, OrientationMur, Ouverture, Piece, Plancher, Tremie,
    TypeCloison, TypeMur, TypeOuverture, TypePiece, TypePlancher, TypeTremie,
};
pub use systemes::{
    GenerateurChauffage, ProductionEauChaude, SystemeChauffage, SystemeElectrique,
    SystemePlomberie, SystemeVentilation, TableauElectrique, TypeEnergie,
    TypeGenerateurChauffage, TypeProductionEauChaude, TypeSystemeElectrique, TypeVentilation,
};
pub use validation::{Severity, ValidationIssue, ValidationReport};

/// 不透明的技术子文档（半结构化 JSON，原样往返）。
pub type Details = serde_json::Map<String, serde_json::Value>;
