//! 变更的失效目标。
//!
//! 变更处理方不直接操作缓存，而是由操作类型得出需要失效的键列表。

use crate::key::QueryKey;
use batiment_client::ApiOperation;

/// 变更成功后需要失效的键前缀。
pub fn invalidation_effects(operation: ApiOperation, batiment_id: Option<&str>) -> Vec<QueryKey> {
    let mut effects = Vec::new();
    let list_family = matches!(
        operation,
        ApiOperation::Init
            | ApiOperation::Create
            | ApiOperation::Update
            | ApiOperation::Delete
            | ApiOperation::Duplicate
    );
    if list_family {
        effects.push(QueryKey::batiment_lists());
        effects.push(QueryKey::batiments_no_pagination());
    }
    let nested_levels = matches!(
        operation,
        ApiOperation::AddNiveau
            | ApiOperation::UpdateNiveau
            | ApiOperation::DeleteNiveau
            | ApiOperation::DuplicateNiveau
            | ApiOperation::AddPiece
            | ApiOperation::UpdatePiece
            | ApiOperation::DeletePiece
            | ApiOperation::AddMur
            | ApiOperation::UpdateMur
            | ApiOperation::DeleteMur
            | ApiOperation::AddCloison
            | ApiOperation::UpdateCloison
            | ApiOperation::DeleteCloison
            | ApiOperation::AddOuverture
            | ApiOperation::UpdateOuverture
            | ApiOperation::DeleteOuverture
    );
    let read_only = matches!(
        operation,
        ApiOperation::List | ApiOperation::ListAll | ApiOperation::Get | ApiOperation::Validate
    );
    if let Some(id) = batiment_id {
        if !read_only && operation != ApiOperation::Duplicate {
            effects.push(QueryKey::batiment_detail(id));
        }
        if nested_levels {
            effects.push(QueryKey::niveaux_all(id));
        }
    }
    effects
}
