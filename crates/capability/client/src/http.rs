//! 基于 reqwest 的资源客户端实现
//!
//! - 若存在 `authToken` 凭据，每个请求携带 Bearer 令牌
//! - 每个请求携带 `x-request-id`
//! - 非 2xx 响应统一解析为 `ApiError`；401 时清除凭据
//! - 不做任何自动重试

use crate::credentials::{CredentialStore, FileCredentialStore, InMemoryCredentialStore};
use crate::error::ApiError;
use crate::traits::{ApiOperation, BatimentApi};
use api_contract::{
    BatimentFilters, BatimentInitRequest, BatimentUpsertRequest, CloisonPayload,
    DuplicateRequest, ErrorBody, MurPayload, NiveauPayload, OuverturePayload, Page, Pagination,
    PiecePayload,
};
use async_trait::async_trait;
use batiment_config::ClientConfig;
use batiment_telemetry::{
    new_request_ids, record_request_failure, record_request_sent, record_unauthorized,
};
use domain::{
    Batiment, Charpente, Fondations, SystemeChauffage, SystemeElectrique, SystemePlomberie,
    SystemeVentilation, Terrain, Toiture, TypeBatiment, ValidationReport,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP 资源客户端。
#[derive(Clone)]
pub struct HttpBatimentApi {
    base_url: String,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpBatimentApi {
    /// 按配置构造：可选超时、文件或内存凭据存储。
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let credentials: Arc<dyn CredentialStore> = match &config.auth_token_file {
            Some(path) => Arc::new(FileCredentialStore::new(path.clone())),
            None => Arc::new(InMemoryCredentialStore::new()),
        };
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::transport(format!("failed to build http client: {err}")))?;
        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let ids = new_request_ids();
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(REQUEST_ID_HEADER, ids.request_id);
        if let Some(token) = self.credentials.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute(
        &self,
        operation: ApiOperation,
        builder: RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        record_request_sent();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                record_request_failure();
                warn!(
                    target: "batiment.client",
                    operation = operation.as_str(),
                    "request failed: {}",
                    err
                );
                return Err(ApiError::from(err));
            }
        };
        let status = response.status();
        debug!(
            target: "batiment.client",
            operation = operation.as_str(),
            status = status.as_u16(),
            "response received"
        );
        if status.is_success() {
            return Ok(response);
        }
        record_request_failure();
        if status == StatusCode::UNAUTHORIZED {
            record_unauthorized();
            self.credentials.clear();
            warn!(
                target: "batiment.client",
                operation = operation.as_str(),
                "Session expired - authentication required"
            );
        }
        let body = response.json::<ErrorBody>().await.ok();
        let err = ApiError::from_status(status.as_u16(), body);
        warn!(
            target: "batiment.client",
            operation = operation.as_str(),
            status = status.as_u16(),
            code = err.code.as_deref().unwrap_or(""),
            "request rejected: {}",
            err.message
        );
        Err(err)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: ApiOperation,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(operation, builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::decode(err.to_string()))
    }

    async fn put_json<B: Serialize + Sync>(
        &self,
        operation: ApiOperation,
        path: &str,
        body: &B,
    ) -> Result<Batiment, ApiError> {
        self.send(operation, self.request(Method::PUT, path).json(body))
            .await
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        operation: ApiOperation,
        path: &str,
        body: &B,
    ) -> Result<Batiment, ApiError> {
        self.send(operation, self.request(Method::POST, path).json(body))
            .await
    }

    async fn delete_returning(
        &self,
        operation: ApiOperation,
        path: &str,
    ) -> Result<Batiment, ApiError> {
        self.send(operation, self.request(Method::DELETE, path)).await
    }
}

/// 枚举值的线上字符串（SCREAMING_SNAKE_CASE）。
fn wire_value<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_value(value).ok()? {
        serde_json::Value::String(text) => Some(text),
        _ => None,
    }
}

/// `GET /batiments` 的查询参数（稀疏过滤 + 分页）。
fn list_params(filters: &BatimentFilters, pagination: &Pagination) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(nom) = filters.nom.as_deref().filter(|nom| !nom.is_empty()) {
        params.push(("nom", nom.to_string()));
    }
    if let Some(value) = filters.type_batiment.as_ref().and_then(wire_value) {
        params.push(("type", value));
    }
    if let Some(value) = filters.statut.as_ref().and_then(wire_value) {
        params.push(("statut", value));
    }
    params.push(("page", pagination.page.to_string()));
    params.push(("size", pagination.size.to_string()));
    if let Some(sort) = pagination.sort.as_deref() {
        params.push(("sort", sort.to_string()));
    }
    params
}

fn batiment_path(id: &str) -> String {
    format!("/batiments/{id}")
}

fn niveau_path(id: &str, niveau_id: &str) -> String {
    format!("/batiments/{id}/niveaux/{niveau_id}")
}

fn mur_path(id: &str, niveau_id: &str, mur_id: &str) -> String {
    format!("{}/murs/{mur_id}", niveau_path(id, niveau_id))
}

#[async_trait]
impl BatimentApi for HttpBatimentApi {
    async fn init(&self, nom: &str, type_batiment: TypeBatiment) -> Result<Batiment, ApiError> {
        let body = BatimentInitRequest {
            nom: nom.to_string(),
            type_batiment,
        };
        self.post_json(ApiOperation::Init, "/batiments/init", &body)
            .await
    }

    async fn list(
        &self,
        filters: &BatimentFilters,
        pagination: &Pagination,
    ) -> Result<Page<Batiment>, ApiError> {
        let builder = self
            .request(Method::GET, "/batiments")
            .query(&list_params(filters, pagination));
        self.send(ApiOperation::List, builder).await
    }

    async fn list_all(&self) -> Result<Vec<Batiment>, ApiError> {
        self.send(
            ApiOperation::ListAll,
            self.request(Method::GET, "/batiments/all"),
        )
        .await
    }

    async fn get(&self, id: &str) -> Result<Batiment, ApiError> {
        self.send(ApiOperation::Get, self.request(Method::GET, &batiment_path(id)))
            .await
    }

    async fn create(
        &self,
        request: &BatimentUpsertRequest,
        validate: bool,
    ) -> Result<Batiment, ApiError> {
        let builder = self
            .request(Method::POST, "/batiments")
            .query(&[("validate", validate)])
            .json(request);
        self.send(ApiOperation::Create, builder).await
    }

    async fn update(
        &self,
        id: &str,
        request: &BatimentUpsertRequest,
        validate: bool,
    ) -> Result<Batiment, ApiError> {
        let builder = self
            .request(Method::PUT, &batiment_path(id))
            .query(&[("validate", validate)])
            .json(request);
        self.send(ApiOperation::Update, builder).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.execute(
            ApiOperation::Delete,
            self.request(Method::DELETE, &batiment_path(id)),
        )
        .await?;
        Ok(())
    }

    async fn duplicate(&self, id: &str, nouveau_nom: Option<&str>) -> Result<Batiment, ApiError> {
        let body = DuplicateRequest {
            nouveau_nom: nouveau_nom.map(str::to_string),
        };
        self.post_json(
            ApiOperation::Duplicate,
            &format!("{}/duplicate", batiment_path(id)),
            &body,
        )
        .await
    }

    async fn validate(&self, id: &str) -> Result<ValidationReport, ApiError> {
        self.send(
            ApiOperation::Validate,
            self.request(Method::GET, &format!("{}/validate", batiment_path(id))),
        )
        .await
    }

    async fn set_terrain(&self, id: &str, terrain: &Terrain) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::SetTerrain,
            &format!("{}/terrain", batiment_path(id)),
            terrain,
        )
        .await
    }

    async fn delete_terrain(&self, id: &str) -> Result<Batiment, ApiError> {
        self.delete_returning(
            ApiOperation::DeleteTerrain,
            &format!("{}/terrain", batiment_path(id)),
        )
        .await
    }

    async fn set_fondations(
        &self,
        id: &str,
        fondations: &Fondations,
    ) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::SetFondations,
            &format!("{}/fondations", batiment_path(id)),
            fondations,
        )
        .await
    }

    async fn delete_fondations(&self, id: &str) -> Result<Batiment, ApiError> {
        self.delete_returning(
            ApiOperation::DeleteFondations,
            &format!("{}/fondations", batiment_path(id)),
        )
        .await
    }

    async fn set_charpente(&self, id: &str, charpente: &Charpente) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::SetCharpente,
            &format!("{}/charpente", batiment_path(id)),
            charpente,
        )
        .await
    }

    async fn set_toiture(&self, id: &str, toiture: &Toiture) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::SetToiture,
            &format!("{}/toiture", batiment_path(id)),
            toiture,
        )
        .await
    }

    async fn set_systeme_electrique(
        &self,
        id: &str,
        systeme: &SystemeElectrique,
    ) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::SetSystemeElectrique,
            &format!("{}/systeme-electrique", batiment_path(id)),
            systeme,
        )
        .await
    }

    async fn set_systeme_plomberie(
        &self,
        id: &str,
        systeme: &SystemePlomberie,
    ) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::SetSystemePlomberie,
            &format!("{}/systeme-plomberie", batiment_path(id)),
            systeme,
        )
        .await
    }

    async fn set_systeme_chauffage(
        &self,
        id: &str,
        systeme: &SystemeChauffage,
    ) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::SetSystemeChauffage,
            &format!("{}/systeme-chauffage", batiment_path(id)),
            systeme,
        )
        .await
    }

    async fn set_systeme_ventilation(
        &self,
        id: &str,
        systeme: &SystemeVentilation,
    ) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::SetSystemeVentilation,
            &format!("{}/systeme-ventilation", batiment_path(id)),
            systeme,
        )
        .await
    }

    async fn add_niveau(&self, id: &str, niveau: &NiveauPayload) -> Result<Batiment, ApiError> {
        self.post_json(
            ApiOperation::AddNiveau,
            &format!("{}/niveaux", batiment_path(id)),
            niveau,
        )
        .await
    }

    async fn update_niveau(
        &self,
        id: &str,
        niveau_id: &str,
        niveau: &NiveauPayload,
    ) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::UpdateNiveau,
            &niveau_path(id, niveau_id),
            niveau,
        )
        .await
    }

    async fn delete_niveau(&self, id: &str, niveau_id: &str) -> Result<Batiment, ApiError> {
        self.delete_returning(ApiOperation::DeleteNiveau, &niveau_path(id, niveau_id))
            .await
    }

    async fn duplicate_niveau(&self, id: &str, niveau_id: &str) -> Result<Batiment, ApiError> {
        self.send(
            ApiOperation::DuplicateNiveau,
            self.request(
                Method::POST,
                &format!("{}/duplicate", niveau_path(id, niveau_id)),
            ),
        )
        .await
    }

    async fn add_piece(
        &self,
        id: &str,
        niveau_id: &str,
        piece: &PiecePayload,
    ) -> Result<Batiment, ApiError> {
        self.post_json(
            ApiOperation::AddPiece,
            &format!("{}/pieces", niveau_path(id, niveau_id)),
            piece,
        )
        .await
    }

    async fn update_piece(
        &self,
        id: &str,
        niveau_id: &str,
        piece_id: &str,
        piece: &PiecePayload,
    ) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::UpdatePiece,
            &format!("{}/pieces/{piece_id}", niveau_path(id, niveau_id)),
            piece,
        )
        .await
    }

    async fn delete_piece(
        &self,
        id: &str,
        niveau_id: &str,
        piece_id: &str,
    ) -> Result<Batiment, ApiError> {
        self.delete_returning(
            ApiOperation::DeletePiece,
            &format!("{}/pieces/{piece_id}", niveau_path(id, niveau_id)),
        )
        .await
    }

    async fn add_mur(
        &self,
        id: &str,
        niveau_id: &str,
        mur: &MurPayload,
    ) -> Result<Batiment, ApiError> {
        self.post_json(
            ApiOperation::AddMur,
            &format!("{}/murs", niveau_path(id, niveau_id)),
            mur,
        )
        .await
    }

    async fn update_mur(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        mur: &MurPayload,
    ) -> Result<Batiment, ApiError> {
        self.put_json(ApiOperation::UpdateMur, &mur_path(id, niveau_id, mur_id), mur)
            .await
    }

    async fn delete_mur(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
    ) -> Result<Batiment, ApiError> {
        self.delete_returning(ApiOperation::DeleteMur, &mur_path(id, niveau_id, mur_id))
            .await
    }

    async fn add_cloison(
        &self,
        id: &str,
        niveau_id: &str,
        cloison: &CloisonPayload,
    ) -> Result<Batiment, ApiError> {
        self.post_json(
            ApiOperation::AddCloison,
            &format!("{}/cloisons", niveau_path(id, niveau_id)),
            cloison,
        )
        .await
    }

    async fn update_cloison(
        &self,
        id: &str,
        niveau_id: &str,
        cloison_id: &str,
        cloison: &CloisonPayload,
    ) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::UpdateCloison,
            &format!("{}/cloisons/{cloison_id}", niveau_path(id, niveau_id)),
            cloison,
        )
        .await
    }

    async fn delete_cloison(
        &self,
        id: &str,
        niveau_id: &str,
        cloison_id: &str,
    ) -> Result<Batiment, ApiError> {
        self.delete_returning(
            ApiOperation::DeleteCloison,
            &format!("{}/cloisons/{cloison_id}", niveau_path(id, niveau_id)),
        )
        .await
    }

    async fn add_ouverture(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        ouverture: &OuverturePayload,
    ) -> Result<Batiment, ApiError> {
        self.post_json(
            ApiOperation::AddOuverture,
            &format!("{}/ouvertures", mur_path(id, niveau_id, mur_id)),
            ouverture,
        )
        .await
    }

    async fn update_ouverture(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        ouverture_id: &str,
        ouverture: &OuverturePayload,
    ) -> Result<Batiment, ApiError> {
        self.put_json(
            ApiOperation::UpdateOuverture,
            &format!("{}/ouvertures/{ouverture_id}", mur_path(id, niveau_id, mur_id)),
            ouverture,
        )
        .await
    }

    async fn delete_ouverture(
        &self,
        id: &str,
        niveau_id: &str,
        mur_id: &str,
        ouverture_id: &str,
    ) -> Result<Batiment, ApiError> {
        self.delete_returning(
            ApiOperation::DeleteOuverture,
            &format!("{}/ouvertures/{ouverture_id}", mur_path(id, niveau_id, mur_id)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::StatutBatiment;

    #[test]
    fn list_params_are_sparse() {
        let params = list_params(&BatimentFilters::default(), &Pagination::new(2, 10));
        assert_eq!(
            params,
            vec![("page", "2".to_string()), ("size", "10".to_string())]
        );
    }

    #[test]
    fn list_params_use_wire_enum_values() {
        let filters = BatimentFilters {
            nom: Some("Maison".to_string()),
            type_batiment: Some(TypeBatiment::MaisonIndividuelle),
            statut: Some(StatutBatiment::EnCours),
        };
        let mut pagination = Pagination::new(0, 20);
        pagination.sort = Some("nom,asc".to_string());
        let params = list_params(&filters, &pagination);
        assert!(params.contains(&("type", "MAISON_INDIVIDUELLE".to_string())));
        assert!(params.contains(&("statut", "EN_COURS".to_string())));
        assert!(params.contains(&("sort", "nom,asc".to_string())));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig {
            api_url: "http://localhost:9000/api/".to_string(),
            ..ClientConfig::default()
        };
        let api = HttpBatimentApi::new(&config).expect("client");
        assert_eq!(api.base_url(), "http://localhost:9000/api");
    }
}
