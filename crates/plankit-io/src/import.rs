//! Furniture import from CSV, JSON and PDF sources.
//!
//! Imports are atomic per file: the whole file parses or nothing is added.
//! CSV and JSON are parsed locally; PDF is delegated entirely to an external
//! document-parsing capability that returns the same item shape.

use async_trait::async_trait;
use serde::Deserialize;

use plankit_core::{Furniture, ImportError};

const REQUIRED_COLUMNS: [&str; 3] = ["name", "width_cm", "depth_cm"];

/// One parsed catalog row, before expansion into furniture instances.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportedItem {
    pub name: String,
    pub width_cm: f64,
    pub depth_cm: f64,
    /// Number of instances to create; defaults to 1.
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default, alias = "productCode")]
    pub product_code: Option<String>,
    #[serde(default, alias = "lineNumber")]
    pub line_number: Option<u32>,
    /// Optional position and rotation, present when re-importing a layout
    /// export.
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ImportedItem {
    /// Expands the row into `quantity` furniture instances.
    pub fn into_furniture(self) -> Vec<Furniture> {
        let count = self.quantity.unwrap_or(1).max(1);
        (0..count)
            .map(|_| {
                let mut item = Furniture::new(self.name.clone(), self.width_cm, self.depth_cm);
                item.product_code = self.product_code.clone();
                item.line_number = self.line_number;
                item.x = self.x;
                item.y = self.y;
                item.rotation = self.rotation.unwrap_or(0.0);
                if let Some(color) = &self.color {
                    item.color = Some(color.clone());
                }
                item
            })
            .collect()
    }
}

/// External capability that extracts furniture rows from opaque documents.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    /// Parses a document into catalog rows. Partial results are not
    /// acceptable: the parser reports either a full list or an error.
    async fn parse_furniture(&self, bytes: &[u8]) -> Result<Vec<ImportedItem>, ImportError>;
}

/// Parses a CSV furniture catalog.
///
/// The header must contain `name`, `width_cm` and `depth_cm`; `quantity`,
/// `product_code` and `line_number` are optional. Column order is free.
pub fn import_csv(text: &str) -> Result<Vec<Furniture>, ImportError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
    let Some((_, header)) = lines.next() else {
        return Err(ImportError::Empty);
    };

    let columns: Vec<String> = header
        .split(',')
        .map(|c| c.trim().to_ascii_lowercase())
        .collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !columns.iter().any(|h| h == *c))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns {
            columns: missing.join(", "),
        });
    }
    let index_of = |name: &str| columns.iter().position(|c| c == name);

    let mut items = Vec::new();
    for (line_no, line) in lines {
        let row = line_no + 1; // one-based, counting the header
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let field = |name: &str| -> Option<&str> {
            index_of(name).and_then(|i| fields.get(i)).copied()
        };
        let parse_f64 = |name: &str| -> Result<f64, ImportError> {
            let raw = field(name).unwrap_or("");
            raw.parse::<f64>().map_err(|_| ImportError::InvalidRow {
                row,
                column: name.to_string(),
                reason: format!("'{raw}' is not a number"),
            })
        };

        let name = field("name").unwrap_or("").to_string();
        if name.is_empty() {
            return Err(ImportError::InvalidRow {
                row,
                column: "name".to_string(),
                reason: "empty name".to_string(),
            });
        }
        let width_cm = parse_f64("width_cm")?;
        let depth_cm = parse_f64("depth_cm")?;
        if width_cm <= 0.0 || depth_cm <= 0.0 {
            return Err(ImportError::InvalidRow {
                row,
                column: "width_cm".to_string(),
                reason: "dimensions must be positive".to_string(),
            });
        }
        let quantity = match field("quantity") {
            Some(raw) if !raw.is_empty() => {
                Some(raw.parse::<u32>().map_err(|_| ImportError::InvalidRow {
                    row,
                    column: "quantity".to_string(),
                    reason: format!("'{raw}' is not a count"),
                })?)
            }
            _ => None,
        };
        let line_number = match field("line_number") {
            Some(raw) if !raw.is_empty() => {
                Some(raw.parse::<u32>().map_err(|_| ImportError::InvalidRow {
                    row,
                    column: "line_number".to_string(),
                    reason: format!("'{raw}' is not a number"),
                })?)
            }
            _ => None,
        };
        let product_code = field("product_code")
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        items.push(ImportedItem {
            name,
            width_cm,
            depth_cm,
            quantity,
            product_code,
            line_number,
            x: None,
            y: None,
            rotation: None,
            color: None,
        });
    }

    expand(items)
}

/// Parses a JSON array of catalog rows.
pub fn import_json(text: &str) -> Result<Vec<Furniture>, ImportError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ImportError::InvalidJson {
            reason: e.to_string(),
        })?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }
    let items: Vec<ImportedItem> =
        serde_json::from_value(value).map_err(|e| ImportError::InvalidJson {
            reason: e.to_string(),
        })?;
    expand(items)
}

/// Imports a furniture file by extension.
///
/// `csv` and `json` parse locally; `pdf` is delegated to the document
/// parser. A missing parser makes PDF an unsupported format.
pub async fn import_items(
    file_name: &str,
    bytes: &[u8],
    parser: Option<&dyn DocumentParser>,
) -> Result<Vec<Furniture>, ImportError> {
    let extension = file_name
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    tracing::debug!(file_name, %extension, size = bytes.len(), "importing furniture file");

    match extension.as_str() {
        "csv" => import_csv(&String::from_utf8_lossy(bytes)),
        "json" => import_json(&String::from_utf8_lossy(bytes)),
        "pdf" => match parser {
            Some(parser) => expand(parser.parse_furniture(bytes).await?),
            None => Err(ImportError::UnsupportedExtension { extension }),
        },
        _ => Err(ImportError::UnsupportedExtension { extension }),
    }
}

fn expand(items: Vec<ImportedItem>) -> Result<Vec<Furniture>, ImportError> {
    if items.is_empty() {
        return Err(ImportError::Empty);
    }
    let furniture: Vec<Furniture> = items
        .into_iter()
        .flat_map(ImportedItem::into_furniture)
        .collect();
    tracing::info!(count = furniture.len(), "imported furniture");
    Ok(furniture)
}
