use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::forms::de;
use crate::types::DbId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Medicine {
    pub id: DbId,
    pub dosage: String,
    pub uses: String,
}

/// Row of the materials list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    pub id: DbId,
    pub name: String,
    pub price: f64,
    pub quantity: f64,
    pub supplier_name: String,
    pub material_type_name: String,
    pub basic_unit: String,
    pub smallest_unit: String,
    pub smallest_unit_quantity: f64,
    pub is_surcharge: bool,
    pub medicine: Option<Medicine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialDetail {
    pub id: DbId,
    pub name: String,
    pub price: f64,
    pub quantity: f64,
    pub weight: f64,
    pub material_type_id: DbId,
    pub material_type_name: String,
    pub supplier_id: Option<DbId>,
    pub supplier_name: String,
    pub unit: String,
    pub description: String,
    pub uses: String,
    pub dosage: String,
    pub smallest_unit: Option<String>,
    pub smallest_unit_quantity: Option<f64>,
    pub price_for_smallest_unit: Option<f64>,
    pub is_surcharge: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialType {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
}

/// A material attached to a treatment, record or prescription.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialInRelation {
    pub material_id: DbId,
    pub material_name: String,
    pub quantity: f64,
    pub unit: String,
    pub is_basic_unit: bool,
}

/// A billable service ("dịch vụ").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Treatment {
    pub id: DbId,
    pub name: String,
    pub price: f64,
    pub deleted: bool,
    pub quantity: Option<f64>,
    pub total_cost: Option<f64>,
    pub materials: Vec<MaterialInRelation>,
}

/// One import batch of a material.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialImport {
    pub id: DbId,
    pub material_id: DbId,
    pub material_name: String,
    pub input_price: f64,
    pub quantity: f64,
    #[serde(deserialize_with = "de::datetime")]
    pub import_at: Option<NaiveDateTime>,
    pub import_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportMaterial {
    pub id: DbId,
    pub name: String,
    pub price: f64,
    pub unit: String,
    pub note: Option<String>,
    pub material_id: DbId,
    pub quantity: f64,
    pub create_by: String,
    pub handle_by: String,
}

/// Export requests raised together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportGroup {
    pub group: String,
    pub export_materials: Vec<ExportMaterial>,
    #[serde(deserialize_with = "de::datetime")]
    pub create_at: Option<NaiveDateTime>,
    pub create_by: String,
    pub last_handle_by: Option<String>,
}
