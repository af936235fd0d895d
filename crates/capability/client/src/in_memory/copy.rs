//! 深拷贝：所有子对象重新分配 id，内容保持等价。

use super::new_id;
use domain::{Batiment, Mur, Niveau};

pub(crate) fn copy_mur(mur: &Mur) -> Mur {
    let id = new_id();
    let mut copy = mur.clone();
    copy.ouvertures = mur
        .ouvertures
        .iter()
        .map(|ouverture| {
            let mut ouverture = ouverture.clone();
            ouverture.id = new_id();
            ouverture.id_mur = Some(id.clone());
            ouverture
        })
        .collect();
    copy.id = id;
    copy
}

pub(crate) fn copy_niveau(niveau: &Niveau) -> Niveau {
    let mut copy = niveau.clone();
    copy.id = new_id();
    for piece in &mut copy.pieces {
        piece.id = new_id();
    }
    copy.murs = niveau.murs.iter().map(copy_mur).collect();
    for cloison in &mut copy.cloisons {
        cloison.id = new_id();
    }
    for tremie in &mut copy.tremies {
        tremie.id = new_id();
    }
    if let Some(plancher) = copy.plancher.as_mut() {
        if plancher.id.is_some() {
            plancher.id = Some(new_id());
        }
    }
    copy
}

pub(crate) fn copy_batiment(source: &Batiment, id: String, nom: String) -> Batiment {
    let mut copy = source.clone();
    copy.id = id;
    copy.nom = nom;
    copy.statut = Default::default();
    copy.niveaux = source.niveaux.iter().map(copy_niveau).collect();
    copy
}
