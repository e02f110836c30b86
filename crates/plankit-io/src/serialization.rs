//! The external project-file shape.
//!
//! Stored projects use camelCase keys (the shape the hosting application and
//! backend expect), while the in-memory model keeps Rust field names. This
//! module owns the mapping in both directions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use plankit_core::{Furniture, PersistenceError, Project};

/// Persisted project shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub floor_plan_url: Option<String>,
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan_height: Option<f64>,
    #[serde(default)]
    pub furniture: Vec<FurnitureFile>,
}

/// Persisted furniture shape. Dimension keys stay snake_case in the stored
/// form; the relational and catalog keys are camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureFile {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "width_cm")]
    pub width_cm: f64,
    #[serde(rename = "depth_cm")]
    pub depth_cm: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
}

impl From<&Furniture> for FurnitureFile {
    fn from(item: &Furniture) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            width_cm: item.width_cm,
            depth_cm: item.depth_cm,
            rotation: item.rotation,
            x: item.x,
            y: item.y,
            group_id: item.group_id,
            stack_id: item.stack_id,
            color: item.color.clone(),
            product_code: item.product_code.clone(),
            line_number: item.line_number,
        }
    }
}

impl From<FurnitureFile> for Furniture {
    fn from(file: FurnitureFile) -> Self {
        Self {
            id: file.id,
            name: file.name,
            width_cm: file.width_cm,
            depth_cm: file.depth_cm,
            rotation: file.rotation,
            x: file.x,
            y: file.y,
            group_id: file.group_id,
            stack_id: file.stack_id,
            color: file.color,
            product_code: file.product_code,
            line_number: file.line_number,
        }
    }
}

impl From<&Project> for ProjectFile {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            created_at: project.created_at,
            floor_plan_url: project.floor_plan_url.clone(),
            scale: project.scale,
            floor_plan_width: project.floor_plan_width,
            floor_plan_height: project.floor_plan_height,
            furniture: project.furniture.iter().map(FurnitureFile::from).collect(),
        }
    }
}

impl From<ProjectFile> for Project {
    fn from(file: ProjectFile) -> Self {
        Self {
            id: file.id,
            name: file.name,
            created_at: file.created_at,
            floor_plan_url: file.floor_plan_url,
            floor_plan_width: file.floor_plan_width,
            floor_plan_height: file.floor_plan_height,
            scale: file.scale,
            furniture: file.furniture.into_iter().map(Furniture::from).collect(),
        }
    }
}

/// Serializes a project to the stored JSON form.
pub fn project_to_json(project: &Project) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(&ProjectFile::from(project)).map_err(|e| {
        PersistenceError::SaveFailed {
            reason: e.to_string(),
        }
    })
}

/// Decodes a project from the stored JSON form.
pub fn project_from_json(json: &str) -> Result<Project, PersistenceError> {
    let file: ProjectFile =
        serde_json::from_str(json).map_err(|e| PersistenceError::Corrupt {
            reason: e.to_string(),
        })?;
    Ok(Project::from(file))
}
