//! Handlers for `/materials` (inventory, catalogues, import and export).

use axum::extract::{RawQuery, State};
use axum::Json;
use clinic_core::forms::{FormSchema, FormState, Submitted};
use clinic_core::identity::Identity;
use clinic_core::models::{
    ExportGroup, Material, MaterialImport, MaterialType, Pagination, Supplier,
};
use clinic_core::schemas::materials::{
    CreateExportMaterialForm, CreateMaterialForm, CreateSupplierForm, EditExportMaterialForm,
    ImportMaterialFilterForm, ImportMaterialForm, MaterialFilterForm, MaterialTypeCreateForm,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{filter_form, list_query, parse_form, query_bag, run_action, Paging};
use crate::backend::Endpoint;
use crate::error::AppResult;
use crate::middleware::rbac::{MaterialsPage, Require};
use crate::response::{DataResponse, FormResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsData {
    pub material_list_page: Pagination<Material>,
    pub material_types: Vec<MaterialType>,
    pub suppliers: Vec<Supplier>,
    pub material_filter_form: FormState,
    pub create_material_form: FormState,
    pub material_type_create_form: FormState,
    pub create_supplier_form: FormState,
    pub import_material_form: FormState,
    pub create_export_material_form: FormState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportsData {
    pub import_list_page: Pagination<MaterialImport>,
    pub import_material_filter_form: FormState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportsData {
    pub export_groups: Vec<ExportGroup>,
    pub edit_export_material_form: FormState,
}

/// GET /materials
///
/// The page needs the filtered list plus both catalogues for its dropdowns.
/// All three are fetched concurrently and any failure fails the page.
pub async fn list(
    State(state): State<AppState>,
    Require(user, _): Require<MaterialsPage>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<MaterialsData>>> {
    let bag = query_bag(query.as_deref());
    let (filter, material_filter_form) = filter_form::<MaterialFilterForm>(&bag)?;

    let materials = state
        .backend
        .list(&Endpoint::Materials, &list_query(&filter, Paging::from_bag(&bag)))
        .bearer(&user.token)
        .fetch_json::<Pagination<Material>>();
    let types = state
        .backend
        .get(&Endpoint::MaterialTypes)
        .bearer(&user.token)
        .fetch_body::<Vec<MaterialType>>();
    let suppliers = state
        .backend
        .get(&Endpoint::Suppliers)
        .bearer(&user.token)
        .fetch_body::<Vec<Supplier>>();

    let (material_list_page, material_types, suppliers) =
        tokio::try_join!(materials, types, suppliers)?;

    Ok(Json(DataResponse {
        data: MaterialsData {
            material_list_page,
            material_types,
            suppliers,
            material_filter_form,
            create_material_form: FormState::empty::<CreateMaterialForm>(),
            material_type_create_form: FormState::empty::<MaterialTypeCreateForm>(),
            create_supplier_form: FormState::empty::<CreateSupplierForm>(),
            import_material_form: FormState::empty::<ImportMaterialForm>(),
            create_export_material_form: FormState::empty::<CreateExportMaterialForm>(),
        },
    }))
}

/// GET /materials/imports
pub async fn imports(
    State(state): State<AppState>,
    Require(user, _): Require<MaterialsPage>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<ImportsData>>> {
    let bag = query_bag(query.as_deref());
    let (filter, import_material_filter_form) = filter_form::<ImportMaterialFilterForm>(&bag)?;

    let import_list_page = state
        .backend
        .list(&Endpoint::MaterialImports, &list_query(&filter, Paging::from_bag(&bag)))
        .bearer(&user.token)
        .fetch_json::<Pagination<MaterialImport>>()
        .await?;

    Ok(Json(DataResponse {
        data: ImportsData {
            import_list_page,
            import_material_filter_form,
        },
    }))
}

/// GET /materials/exports
pub async fn exports(
    State(state): State<AppState>,
    Require(user, _): Require<MaterialsPage>,
) -> AppResult<Json<DataResponse<ExportsData>>> {
    let export_groups = state
        .backend
        .get(&Endpoint::MaterialExports)
        .bearer(&user.token)
        .fetch_body::<Vec<ExportGroup>>()
        .await?;

    Ok(Json(DataResponse {
        data: ExportsData {
            export_groups,
            edit_export_material_form: FormState::empty::<EditExportMaterialForm>(),
        },
    }))
}

/// Validate `raw` as `S` and send it to `endpoint`.
async fn forward<S: FormSchema>(
    state: &AppState,
    user: &Identity,
    method: Method,
    endpoint: Endpoint,
    raw: Value,
) -> AppResult<Json<FormResponse>> {
    let Submitted { value, form } = parse_form::<S>(raw)?;
    let request = state
        .backend
        .request(method, &endpoint)
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}

/// POST /materials/create
pub async fn create(
    State(state): State<AppState>,
    Require(user, _): Require<MaterialsPage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    forward::<CreateMaterialForm>(&state, &user, Method::POST, Endpoint::Materials, raw).await
}

/// POST /materials/types/create
pub async fn create_type(
    State(state): State<AppState>,
    Require(user, _): Require<MaterialsPage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    forward::<MaterialTypeCreateForm>(&state, &user, Method::POST, Endpoint::MaterialTypes, raw)
        .await
}

/// POST /materials/suppliers/create
pub async fn create_supplier(
    State(state): State<AppState>,
    Require(user, _): Require<MaterialsPage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    forward::<CreateSupplierForm>(&state, &user, Method::POST, Endpoint::Suppliers, raw).await
}

/// POST /materials/import
pub async fn import(
    State(state): State<AppState>,
    Require(user, _): Require<MaterialsPage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    forward::<ImportMaterialForm>(&state, &user, Method::POST, Endpoint::MaterialImports, raw).await
}

/// POST /materials/export
pub async fn export(
    State(state): State<AppState>,
    Require(user, _): Require<MaterialsPage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    forward::<CreateExportMaterialForm>(&state, &user, Method::POST, Endpoint::MaterialExports, raw)
        .await
}

/// POST /materials/export/edit
pub async fn edit_export(
    State(state): State<AppState>,
    Require(user, _): Require<MaterialsPage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    forward::<EditExportMaterialForm>(&state, &user, Method::PUT, Endpoint::MaterialExports, raw)
        .await
}
