//! Project export: placed-furniture JSON, PNG snapshots and inventory PDFs.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde::Serialize;

use plankit_core::{Error, Point, Project, Result};
use plankit_layout::ViewTransform;

use crate::serialization::FurnitureFile;

/// US Letter media box, in PDF points.
const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const PAGE_MARGIN: f64 = 36.0;

/// Canvas size for PNG snapshots.
#[derive(Debug, Clone, Copy)]
pub struct PngExportOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
        }
    }
}

impl PngExportOptions {
    /// Sizes the canvas from the project's floor-plan dimensions when known.
    pub fn for_project(project: &Project) -> Self {
        match (project.floor_plan_width, project.floor_plan_height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Self {
                width: w.round() as u32,
                height: h.round() as u32,
            },
            _ => Self::default(),
        }
    }
}

#[derive(Serialize)]
struct LayoutExport {
    name: String,
    scale: Option<f64>,
    furniture: Vec<FurnitureFile>,
}

/// Exports the placed furniture as JSON, together with the project name and
/// scale. Unplaced items are omitted.
pub fn export_json(project: &Project) -> Result<String> {
    let export = LayoutExport {
        name: project.name.clone(),
        scale: project.scale,
        furniture: project.placed().map(FurnitureFile::from).collect(),
    };
    serde_json::to_string_pretty(&export).map_err(|e| Error::other(e.to_string()))
}

/// Renders the current viewport into a PNG snapshot.
///
/// The floor-plan image, when provided, is painted first at its world
/// position; placed furniture follows as filled footprints in the display
/// colors, in the same back-to-front order the canvas paints them. Both are
/// mapped through `view`, so the snapshot shows exactly the pan/zoom the
/// user is looking at. Pass `ViewTransform::new()` for a 1:1 world-space
/// render.
pub fn export_png(
    project: &Project,
    view: &ViewTransform,
    floor_plan: Option<&[u8]>,
    options: PngExportOptions,
) -> Result<Vec<u8>> {
    let mut canvas = RgbaImage::from_pixel(options.width, options.height, Rgba([255, 255, 255, 255]));

    if let Some(bytes) = floor_plan {
        let plan = image::load_from_memory(bytes)
            .map_err(|e| Error::other(format!("floor plan decode failed: {e}")))?
            .to_rgba8();
        // The plan's world extent: the project's stated dimensions when
        // known, otherwise the image's own pixel size.
        let world_w = project.floor_plan_width.unwrap_or(f64::from(plan.width()));
        let world_h = project.floor_plan_height.unwrap_or(f64::from(plan.height()));
        let top_left = view.world_to_screen(Point::new(0.0, 0.0));
        let draw_w = (world_w * view.scale()).round().max(1.0) as u32;
        let draw_h = (world_h * view.scale()).round().max(1.0) as u32;
        let scaled = image::imageops::resize(&plan, draw_w, draw_h, FilterType::Triangle);
        image::imageops::overlay(
            &mut canvas,
            &scaled,
            top_left.x.round() as i64,
            top_left.y.round() as i64,
        );
    }

    for rich in project.rich_placed() {
        let Some(bounds) = rich.bounds() else { continue };
        let fill = color_to_rgba(&rich.furniture.display_color());
        let border = Rgba([60, 60, 60, 255]);

        let top_left = view.world_to_screen(Point::new(bounds.x, bounds.y));
        let (w, h) = (bounds.w * view.scale(), bounds.h * view.scale());
        let x0 = top_left.x.max(0.0) as u32;
        let y0 = top_left.y.max(0.0) as u32;
        let x1 = ((top_left.x + w).max(0.0) as u32).min(options.width);
        let y1 = ((top_left.y + h).max(0.0) as u32).min(options.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let edge = x == x0 || x + 1 == x1 || y == y0 || y + 1 == y1;
                canvas.put_pixel(x, y, if edge { border } else { fill });
            }
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    canvas
        .write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| Error::other(format!("PNG encoding failed: {e}")))?;
    Ok(buffer.into_inner())
}

/// Produces a two-page PDF: the layout snapshot followed by a tabulated
/// inventory.
///
/// `layout_png` is the snapshot image (typically from `export_png`). The
/// inventory lists `count x name [product code]` rows in insertion order of
/// first occurrence, covering placed items only.
pub fn export_pdf(project: &Project, layout_png: &[u8]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let image = image::load_from_memory(layout_png)
        .map_err(|e| Error::other(format!("layout image decode failed: {e}")))?
        .to_rgb8();
    let (img_w, img_h) = image.dimensions();
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(img_w),
            "Height" => i64::from(img_h),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        image.into_raw(),
    ));

    // Page 1: the layout image scaled to fit inside the margins.
    let avail_w = PAGE_WIDTH - 2.0 * PAGE_MARGIN;
    let avail_h = PAGE_HEIGHT - 2.0 * PAGE_MARGIN;
    let fit = (avail_w / f64::from(img_w)).min(avail_h / f64::from(img_h));
    let (draw_w, draw_h) = (f64::from(img_w) * fit, f64::from(img_h) * fit);
    let layout_content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (draw_w as f32).into(),
                    0.into(),
                    0.into(),
                    (draw_h as f32).into(),
                    (PAGE_MARGIN as f32).into(),
                    ((PAGE_HEIGHT - PAGE_MARGIN - draw_h) as f32).into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Layout".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let layout_stream = doc.add_object(Stream::new(
        dictionary! {},
        layout_content
            .encode()
            .map_err(|e| Error::other(format!("PDF content encoding failed: {e}")))?,
    ));
    let layout_page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => layout_stream,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Layout" => image_id },
        },
    });

    // Page 2: the inventory table.
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 16.into()]),
        Operation::new(
            "Td",
            vec![
                (PAGE_MARGIN as f32).into(),
                ((PAGE_HEIGHT - PAGE_MARGIN - 16.0) as f32).into(),
            ],
        ),
        Operation::new(
            "Tj",
            vec![Object::string_literal(format!("{} - Inventory", project.name))],
        ),
        Operation::new("Tf", vec!["F1".into(), 11.into()]),
        Operation::new("TL", vec![16.into()]),
        Operation::new("Td", vec![0.into(), (-28).into()]),
    ];
    for line in inventory_lines(project) {
        ops.push(Operation::new("T*", vec![]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(line)]));
    }
    ops.push(Operation::new("ET", vec![]));
    let inventory_stream = doc.add_object(Stream::new(
        dictionary! {},
        Content { operations: ops }
            .encode()
            .map_err(|e| Error::other(format!("PDF content encoding failed: {e}")))?,
    ));
    let inventory_page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => inventory_stream,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![layout_page.into(), inventory_page.into()],
            "Count" => 2,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (PAGE_WIDTH as f32).into(),
                (PAGE_HEIGHT as f32).into(),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| Error::other(format!("PDF write failed: {e}")))?;
    Ok(buffer)
}

/// Inventory rows grouped by (name, product code), in insertion order of
/// first occurrence.
fn inventory_lines(project: &Project) -> Vec<String> {
    let mut groups: Vec<(String, Option<String>, usize)> = Vec::new();
    for item in project.placed() {
        match groups
            .iter_mut()
            .find(|(name, code, _)| *name == item.name && *code == item.product_code)
        {
            Some((_, _, count)) => *count += 1,
            None => groups.push((item.name.clone(), item.product_code.clone(), 1)),
        }
    }
    groups
        .into_iter()
        .map(|(name, code, count)| match code {
            Some(code) => format!("{count} x {name} [{code}]"),
            None => format!("{count} x {name}"),
        })
        .collect()
}

/// Parses an `hsl(h, s%, l%)` or `#rrggbb` display color into RGBA, falling
/// back to a neutral gray.
fn color_to_rgba(color: &str) -> Rgba<u8> {
    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(value) = u32::from_str_radix(hex, 16) {
                return Rgba([(value >> 16) as u8, (value >> 8) as u8, value as u8, 255]);
            }
        }
    }
    if let Some(inner) = color
        .strip_prefix("hsl(")
        .and_then(|s| s.strip_suffix(')'))
    {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() == 3 {
            let h = parts[0].parse::<f64>().unwrap_or(0.0);
            let s = parts[1].trim_end_matches('%').parse::<f64>().unwrap_or(0.0) / 100.0;
            let l = parts[2].trim_end_matches('%').parse::<f64>().unwrap_or(0.0) / 100.0;
            return hsl_to_rgba(h, s, l);
        }
    }
    Rgba([160, 160, 160, 255])
}

fn hsl_to_rgba(h: f64, s: f64, l: f64) -> Rgba<u8> {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Rgba([
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use plankit_core::{Furniture, Unit};

    fn sample_project() -> Project {
        let mut project = Project::new("Showroom");
        project.set_scale(100.0, 100.0, Unit::Centimeters);
        project.floor_plan_width = Some(800.0);
        project.floor_plan_height = Some(600.0);

        let mut desk = Furniture::new("Desk", 120.0, 60.0);
        desk.x = Some(40.0);
        desk.y = Some(80.0);
        desk.rotation = 90.0;
        desk.product_code = Some("DK-100".to_string());
        project.furniture.push(desk);

        let mut desk2 = Furniture::new("Desk", 120.0, 60.0);
        desk2.x = Some(400.0);
        desk2.y = Some(80.0);
        desk2.product_code = Some("DK-100".to_string());
        project.furniture.push(desk2);

        let mut sofa = Furniture::new("Sofa", 200.0, 90.0);
        sofa.x = Some(100.0);
        sofa.y = Some(300.0);
        project.furniture.push(sofa);

        // Unplaced item, excluded from every export.
        project.furniture.push(Furniture::new("Lamp", 30.0, 30.0));
        project
    }

    #[test]
    fn test_json_export_is_placed_only() {
        let json = export_json(&sample_project()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "Showroom");
        assert_eq!(value["scale"], 1.0);
        let furniture = value["furniture"].as_array().unwrap();
        assert_eq!(furniture.len(), 3);
        assert!(furniture.iter().all(|f| f["name"] != "Lamp"));
    }

    #[test]
    fn test_json_export_reimports_identically() {
        let project = sample_project();
        let json = export_json(&project).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let restored =
            crate::import::import_json(&value["furniture"].to_string()).unwrap();
        let placed: Vec<_> = project.placed().collect();
        assert_eq!(restored.len(), placed.len());
        for (restored, original) in restored.iter().zip(placed) {
            assert_eq!(restored.name, original.name);
            assert_eq!(restored.width_cm, original.width_cm);
            assert_eq!(restored.depth_cm, original.depth_cm);
            assert_eq!(restored.x, original.x);
            assert_eq!(restored.y, original.y);
            assert_eq!(restored.rotation, original.rotation);
            assert_eq!(restored.product_code, original.product_code);
        }
    }

    #[test]
    fn test_png_snapshot_has_painted_pixels() {
        let project = sample_project();
        let png = export_png(
            &project,
            &ViewTransform::new(),
            None,
            PngExportOptions::for_project(&project),
        )
        .unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (800, 600));
        // The sofa footprint covers (100,300)-(300,390); its interior is not
        // background white.
        let inside = decoded.get_pixel(200, 340);
        assert_ne!(inside, &Rgba([255, 255, 255, 255]));
        let outside = decoded.get_pixel(790, 10);
        assert_eq!(outside, &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_png_snapshot_follows_view_transform() {
        let project = sample_project();
        let mut view = ViewTransform::new();
        view.pan_by(-100.0, -300.0);
        let png = export_png(
            &project,
            &view,
            None,
            PngExportOptions::for_project(&project),
        )
        .unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        // The sofa's world top-left (100,300) now lands at screen (0,0), so
        // its interior paints near the canvas origin.
        let inside = decoded.get_pixel(100, 45);
        assert_ne!(inside, &Rgba([255, 255, 255, 255]));
        // The old world-space spot maps to empty floor and stays white.
        let vacated = decoded.get_pixel(200, 340);
        assert_eq!(vacated, &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_png_snapshot_composites_floor_plan() {
        let project = sample_project();
        let plan = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        let mut plan_png = Cursor::new(Vec::new());
        plan.write_to(&mut plan_png, image::ImageFormat::Png).unwrap();

        let png = export_png(
            &project,
            &ViewTransform::new(),
            Some(plan_png.get_ref()),
            PngExportOptions::for_project(&project),
        )
        .unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        // The plan stretches over the stated 800x600 floor-plan extent, so a
        // furniture-free corner shows the plan instead of background white.
        assert_eq!(decoded.get_pixel(790, 10), &Rgba([0, 0, 255, 255]));
        // Furniture still paints on top of the plan.
        assert_ne!(decoded.get_pixel(200, 340), &Rgba([0, 0, 255, 255]));
        assert_ne!(decoded.get_pixel(200, 340), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_pdf_export_round_trips_through_lopdf() {
        let project = sample_project();
        let png = export_png(
            &project,
            &ViewTransform::new(),
            None,
            PngExportOptions::for_project(&project),
        )
        .unwrap();
        let pdf = export_pdf(&project, &png).unwrap();

        let doc = Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 2);

        let text = doc.extract_text(&[2]).unwrap();
        assert!(text.contains("2 x Desk [DK-100]"));
        assert!(text.contains("1 x Sofa"));
        assert!(!text.contains("Lamp"));
    }

    #[test]
    fn test_inventory_groups_in_first_occurrence_order() {
        let lines = inventory_lines(&sample_project());
        assert_eq!(lines, vec!["2 x Desk [DK-100]", "1 x Sofa"]);
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(color_to_rgba("#ff0000"), Rgba([255, 0, 0, 255]));
        assert_eq!(color_to_rgba("hsl(0, 100%, 50%)"), Rgba([255, 0, 0, 255]));
        assert_eq!(color_to_rgba("garbage"), Rgba([160, 160, 160, 255]));
    }
}
