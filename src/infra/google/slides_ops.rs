// Slides v1: presentations, slides and page elements.

use serde_json::{json, Value};

use super::colors::{rgb_color, solid_fill};
use super::google_workspace_client::{GoogleWorkspaceClient, SLIDES_API};
use crate::core::workspace::{ElementGeometry, ShapeFill, SlideOp, SlideTextStyle, WorkspaceError};

const EMU_PER_PT: f64 = 12_700.0;

const ELEMENT_KINDS: &[&str] = &[
    "shape",
    "image",
    "line",
    "table",
    "video",
    "sheetsChart",
    "wordArt",
    "elementGroup",
];

const LINE_CATEGORIES: &[&str] = &["STRAIGHT", "BENT", "CURVED"];

/// Fresh object id. Slides requires 5-50 characters from `[a-zA-Z0-9_-:]`.
fn object_id(prefix: &str) -> String {
    format!("{prefix}_{:016x}", rand::random::<u64>())
}

fn pt(magnitude: f64) -> Value {
    json!({ "magnitude": magnitude, "unit": "PT" })
}

/// Text body for a slide from the normalized content value.
///
/// Lists become one line per item. Other structured values are inserted as JSON.
pub fn slide_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

/// Position, size and rotation (degrees, clockwise) in points.
fn element_properties(page_id: &str, x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Value {
    let radians = rotation.to_radians();
    let (sin, cos) = radians.sin_cos();
    json!({
        "pageObjectId": page_id,
        "size": { "width": pt(width), "height": pt(height) },
        "transform": {
            "scaleX": cos,
            "scaleY": cos,
            "shearX": -sin,
            "shearY": sin,
            "translateX": x,
            "translateY": y,
            "unit": "PT",
        }
    })
}

pub fn text_style_request(object_id: &str, style: &SlideTextStyle) -> Result<Value, WorkspaceError> {
    let mut text_style = serde_json::Map::new();
    let mut fields = Vec::new();

    if let Some(family) = &style.font_family {
        text_style.insert("fontFamily".into(), json!(family));
        fields.push("fontFamily");
    }
    if let Some(size) = style.font_size {
        text_style.insert("fontSize".into(), pt(size));
        fields.push("fontSize");
    }
    if let Some(weight) = &style.font_weight {
        text_style.insert("bold".into(), json!(weight.eq_ignore_ascii_case("BOLD")));
        fields.push("bold");
    }
    if let Some(font_style) = &style.font_style {
        text_style.insert("italic".into(), json!(font_style.eq_ignore_ascii_case("ITALIC")));
        fields.push("italic");
    }
    if let Some(color) = &style.foreground_color {
        text_style.insert("foregroundColor".into(), json!({ "opaqueColor": rgb_color(color)? }));
        fields.push("foregroundColor");
    }
    if let Some(color) = &style.background_color {
        text_style.insert("backgroundColor".into(), json!({ "opaqueColor": rgb_color(color)? }));
        fields.push("backgroundColor");
    }

    if fields.is_empty() {
        return Err(WorkspaceError::InvalidArgument("no text style fields given".to_string()));
    }

    Ok(json!({
        "updateTextStyle": {
            "objectId": object_id,
            "textRange": { "type": "ALL" },
            "style": text_style,
            "fields": fields.join(","),
        }
    }))
}

/// `updateShapeProperties` for fill and outline, or `None` when nothing is set.
pub fn shape_fill_request(object_id: &str, fill: &ShapeFill) -> Result<Option<Value>, WorkspaceError> {
    let mut properties = json!({});
    let mut fields = Vec::new();

    if let Some(color) = &fill.fill_color {
        properties["shapeBackgroundFill"] = solid_fill(color)?;
        fields.push("shapeBackgroundFill.solidFill.color");
    }
    if let Some(color) = &fill.border_color {
        properties["outline"]["outlineFill"] = solid_fill(color)?;
        fields.push("outline.outlineFill.solidFill.color");
    }
    if let Some(width) = fill.border_width {
        properties["outline"]["weight"] = pt(width);
        fields.push("outline.weight");
    }

    if fields.is_empty() {
        return Ok(None);
    }
    Ok(Some(json!({
        "updateShapeProperties": {
            "objectId": object_id,
            "shapeProperties": properties,
            "fields": fields.join(","),
        }
    })))
}

/// Convert a `Dimension` or transform offset to EMU.
fn to_emu(magnitude: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some("PT") => magnitude * EMU_PER_PT,
        _ => magnitude,
    }
}

/// Absolute transform that moves and resizes `element` to the requested geometry.
pub fn absolute_transform(element: &Value, geometry: &ElementGeometry) -> Result<Value, WorkspaceError> {
    let number = |pointer: &str, default: f64| {
        element.pointer(pointer).and_then(Value::as_f64).unwrap_or(default)
    };
    let transform_unit = element.pointer("/transform/unit").and_then(Value::as_str);

    let mut scale_x = number("/transform/scaleX", 1.0);
    let mut scale_y = number("/transform/scaleY", 1.0);
    let mut translate_x = to_emu(number("/transform/translateX", 0.0), transform_unit);
    let mut translate_y = to_emu(number("/transform/translateY", 0.0), transform_unit);

    if geometry.width.is_some() || geometry.height.is_some() {
        let size = |axis: &str| {
            let magnitude = element
                .pointer(&format!("/size/{axis}/magnitude"))
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            let unit = element
                .pointer(&format!("/size/{axis}/unit"))
                .and_then(Value::as_str);
            to_emu(magnitude, unit)
        };
        let no_intrinsic_size = || {
            WorkspaceError::InvalidArgument("element has no intrinsic size to scale".to_string())
        };

        if let Some(width) = geometry.width {
            let base = size("width");
            if base <= 0.0 {
                return Err(no_intrinsic_size());
            }
            scale_x = width * EMU_PER_PT / base;
        }
        if let Some(height) = geometry.height {
            let base = size("height");
            if base <= 0.0 {
                return Err(no_intrinsic_size());
            }
            scale_y = height * EMU_PER_PT / base;
        }
    }
    if let Some(x) = geometry.x {
        translate_x = x * EMU_PER_PT;
    }
    if let Some(y) = geometry.y {
        translate_y = y * EMU_PER_PT;
    }

    Ok(json!({
        "scaleX": scale_x,
        "scaleY": scale_y,
        "shearX": number("/transform/shearX", 0.0),
        "shearY": number("/transform/shearY", 0.0),
        "translateX": translate_x,
        "translateY": translate_y,
        "unit": "EMU",
    }))
}

/// Plain text of a shape, concatenated from its text runs.
fn shape_text(shape: &Value) -> Option<String> {
    let elements = shape.pointer("/text/textElements")?.as_array()?;
    let text: String = elements
        .iter()
        .filter_map(|e| e.pointer("/textRun/content").and_then(Value::as_str))
        .collect();
    Some(text)
}

/// Compact description of a page element for search results.
pub fn element_summary(element: &Value) -> Value {
    let kind = ELEMENT_KINDS
        .iter()
        .find(|kind| element.get(**kind).is_some())
        .copied()
        .unwrap_or("unknown");

    let mut summary = json!({
        "object_id": element.get("objectId").cloned().unwrap_or(Value::Null),
        "element_type": kind,
    });
    if let Some(shape) = element.get("shape") {
        if let Some(shape_type) = shape.get("shapeType") {
            summary["shape_type"] = shape_type.clone();
        }
        if let Some(placeholder) = shape.pointer("/placeholder/type") {
            summary["placeholder"] = placeholder.clone();
        }
        if let Some(text) = shape_text(shape) {
            summary["text"] = json!(text);
        }
    }
    if let Some(url) = element.pointer("/image/contentUrl") {
        summary["content_url"] = url.clone();
    }
    summary
}

fn matches_type(summary: &Value, wanted: &str) -> bool {
    ["element_type", "shape_type", "placeholder"]
        .iter()
        .filter_map(|key| summary.get(*key).and_then(Value::as_str))
        .any(|value| value.eq_ignore_ascii_case(wanted))
}

/// `pageSize` of a presentation, or null when the response omits it.
pub fn page_dimensions(presentation: &Value) -> Value {
    presentation.get("pageSize").cloned().unwrap_or(Value::Null)
}

impl GoogleWorkspaceClient {
    pub(super) async fn create_presentation(&self, title: &str) -> Result<Value, WorkspaceError> {
        let created = self.post(SLIDES_API, &[], &json!({ "title": title })).await?;
        let presentation_id = created
            .get("presentationId")
            .cloned()
            .ok_or_else(|| WorkspaceError::Http("presentation id missing from response".to_string()))?;

        tracing::info!(presentation_id = %presentation_id, title, "Created presentation");
        Ok(json!({
            "presentation_id": presentation_id,
            "title": title,
            "dimensions": page_dimensions(&created),
            "slide_count": created.get("slides").and_then(Value::as_array).map_or(0, Vec::len),
        }))
    }

    pub(super) async fn execute_slide_op(
        &self,
        presentation_id: &str,
        op: &SlideOp,
    ) -> Result<Value, WorkspaceError> {
        match op {
            SlideOp::AddSlide { title, content } => self.add_slide(presentation_id, title, content).await,
            SlideOp::AddImage {
                slide_id,
                image_url,
                x,
                y,
                width,
                height,
                rotation,
            } => {
                let image_id = object_id("image");
                self.batch_update_presentation(
                    presentation_id,
                    vec![json!({
                        "createImage": {
                            "objectId": image_id,
                            "url": image_url,
                            "elementProperties": element_properties(slide_id, *x, *y, *width, *height, *rotation),
                        }
                    })],
                )
                .await?;
                Ok(json!({ "image_id": image_id, "slide_id": slide_id }))
            }
            SlideOp::GetPresentation => self.get(&format!("{SLIDES_API}/{presentation_id}"), &[]).await,
            SlideOp::DeletePresentation => self.delete_file(presentation_id).await,
            SlideOp::SearchElements { slide_id, element_type } => {
                let page = self.get_page(presentation_id, slide_id).await?;
                let elements: Vec<Value> = page
                    .get("pageElements")
                    .and_then(Value::as_array)
                    .map(|elements| elements.iter().map(element_summary).collect())
                    .unwrap_or_default();
                let filtered = match element_type.as_deref().filter(|t| !t.is_empty()) {
                    Some(wanted) => elements.into_iter().filter(|e| matches_type(e, wanted)).collect(),
                    None => elements,
                };
                Ok(Value::Array(filtered))
            }
            SlideOp::UpdateTextStyle { element_id, style, .. } => {
                let request = text_style_request(element_id, style)?;
                self.batch_update_presentation(presentation_id, vec![request]).await?;
                Ok(json!({ "element_id": element_id }))
            }
            SlideOp::UpdateShapeStyle {
                slide_id,
                element_id,
                geometry,
                fill,
            } => {
                let mut requests = Vec::new();
                if !geometry.is_empty() {
                    let element = self.find_page_element(presentation_id, slide_id, element_id).await?;
                    requests.push(json!({
                        "updatePageElementTransform": {
                            "objectId": element_id,
                            "applyMode": "ABSOLUTE",
                            "transform": absolute_transform(&element, geometry)?,
                        }
                    }));
                }
                if let Some(request) = shape_fill_request(element_id, fill)? {
                    requests.push(request);
                }
                if requests.is_empty() {
                    return Err(WorkspaceError::InvalidArgument("no shape style fields given".to_string()));
                }
                self.batch_update_presentation(presentation_id, requests).await?;
                Ok(json!({ "element_id": element_id }))
            }
            SlideOp::DeleteElement { element_id, .. } => {
                self.batch_update_presentation(
                    presentation_id,
                    vec![json!({ "deleteObject": { "objectId": element_id } })],
                )
                .await?;
                Ok(json!({ "element_id": element_id }))
            }
            SlideOp::AddShape {
                slide_id,
                shape_type,
                x,
                y,
                width,
                height,
                fill,
            } => {
                let shape_id = object_id("shape");
                let mut requests = vec![json!({
                    "createShape": {
                        "objectId": shape_id,
                        "shapeType": shape_type.to_ascii_uppercase(),
                        "elementProperties": element_properties(slide_id, *x, *y, *width, *height, 0.0),
                    }
                })];
                if let Some(request) = shape_fill_request(&shape_id, fill)? {
                    requests.push(request);
                }
                self.batch_update_presentation(presentation_id, requests).await?;
                Ok(json!({ "shape_id": shape_id, "slide_id": slide_id }))
            }
            SlideOp::AddLine {
                slide_id,
                start_x,
                start_y,
                end_x,
                end_y,
                line_color,
                line_width,
                line_type,
            } => {
                let category = line_type.to_ascii_uppercase();
                if !LINE_CATEGORIES.contains(&category.as_str()) {
                    return Err(WorkspaceError::InvalidArgument(format!(
                        "unsupported line type '{line_type}'"
                    )));
                }
                let line_id = object_id("line");
                let requests = vec![
                    json!({
                        "createLine": {
                            "objectId": line_id,
                            "lineCategory": category,
                            "elementProperties": line_properties(slide_id, *start_x, *start_y, *end_x, *end_y),
                        }
                    }),
                    json!({
                        "updateLineProperties": {
                            "objectId": line_id,
                            "lineProperties": {
                                "lineFill": solid_fill(line_color)?,
                                "weight": pt(*line_width),
                            },
                            "fields": "lineFill.solidFill.color,weight",
                        }
                    }),
                ];
                self.batch_update_presentation(presentation_id, requests).await?;
                Ok(json!({ "line_id": line_id, "slide_id": slide_id }))
            }
            SlideOp::UpdateBackground {
                slide_id,
                background_color,
                background_image_url,
            } => {
                let (fill, fields) = match (background_image_url, background_color) {
                    (Some(url), _) if !url.is_empty() => (
                        json!({ "stretchedPictureFill": { "contentUrl": url } }),
                        "pageBackgroundFill.stretchedPictureFill.contentUrl",
                    ),
                    (_, Some(color)) => (solid_fill(color)?, "pageBackgroundFill.solidFill.color"),
                    _ => {
                        return Err(WorkspaceError::InvalidArgument(
                            "either a background color or an image url is required".to_string(),
                        ))
                    }
                };
                self.batch_update_presentation(
                    presentation_id,
                    vec![json!({
                        "updatePageProperties": {
                            "objectId": slide_id,
                            "pageProperties": { "pageBackgroundFill": fill },
                            "fields": fields,
                        }
                    })],
                )
                .await?;
                Ok(json!({ "slide_id": slide_id }))
            }
            SlideOp::UpdateLayout { layout_type, .. } => Err(WorkspaceError::Unsupported(format!(
                "the Slides API cannot change the layout of an existing slide (requested {layout_type})"
            ))),
            SlideOp::UpdateTransition { transition_type, .. } => Err(WorkspaceError::Unsupported(format!(
                "the Slides API does not expose slide transitions (requested {transition_type})"
            ))),
            SlideOp::AddNotes { slide_id, notes_text } => {
                self.set_speaker_notes(presentation_id, slide_id, notes_text).await
            }
        }
    }

    async fn batch_update_presentation(
        &self,
        presentation_id: &str,
        requests: Vec<Value>,
    ) -> Result<Value, WorkspaceError> {
        self.post(
            &format!("{SLIDES_API}/{presentation_id}:batchUpdate"),
            &[],
            &json!({ "requests": requests }),
        )
        .await
    }

    async fn get_page(&self, presentation_id: &str, page_id: &str) -> Result<Value, WorkspaceError> {
        self.get(&format!("{SLIDES_API}/{presentation_id}/pages/{page_id}"), &[])
            .await
    }

    async fn find_page_element(
        &self,
        presentation_id: &str,
        slide_id: &str,
        element_id: &str,
    ) -> Result<Value, WorkspaceError> {
        let page = self.get_page(presentation_id, slide_id).await?;
        page.get("pageElements")
            .and_then(Value::as_array)
            .and_then(|elements| {
                elements
                    .iter()
                    .find(|e| e.get("objectId").and_then(Value::as_str) == Some(element_id))
            })
            .cloned()
            .ok_or_else(|| WorkspaceError::NotFound(format!("element '{element_id}' on slide '{slide_id}'")))
    }

    /// Append a TITLE_AND_BODY slide and fill both placeholders.
    async fn add_slide(&self, presentation_id: &str, title: &str, content: &Value) -> Result<Value, WorkspaceError> {
        let slide_id = object_id("slide");
        let title_id = object_id("title");
        let body_id = object_id("body");

        let mut requests = vec![json!({
            "createSlide": {
                "objectId": slide_id,
                "slideLayoutReference": { "predefinedLayout": "TITLE_AND_BODY" },
                "placeholderIdMappings": [
                    { "layoutPlaceholder": { "type": "TITLE", "index": 0 }, "objectId": title_id },
                    { "layoutPlaceholder": { "type": "BODY", "index": 0 }, "objectId": body_id },
                ],
            }
        })];
        if !title.is_empty() {
            requests.push(json!({ "insertText": { "objectId": title_id, "text": title } }));
        }
        let body = slide_text(content);
        if !body.is_empty() {
            requests.push(json!({ "insertText": { "objectId": body_id, "text": body } }));
        }

        self.batch_update_presentation(presentation_id, requests).await?;
        tracing::info!(presentation_id, slide_id = %slide_id, "Added slide");

        // The slide exists at this point, so a failed size lookup only drops the dimensions.
        let dimensions = match self
            .get(&format!("{SLIDES_API}/{presentation_id}"), &[("fields", "pageSize")])
            .await
        {
            Ok(presentation) => page_dimensions(&presentation),
            Err(e) => {
                tracing::warn!(presentation_id, error = %e, "Failed to read page size after adding slide");
                Value::Null
            }
        };
        Ok(json!({
            "slide_id": slide_id,
            "title_id": title_id,
            "body_id": body_id,
            "dimensions": dimensions,
        }))
    }

    /// Replace the speaker notes of a slide.
    async fn set_speaker_notes(
        &self,
        presentation_id: &str,
        slide_id: &str,
        notes_text: &str,
    ) -> Result<Value, WorkspaceError> {
        let page = self.get_page(presentation_id, slide_id).await?;
        let notes_page = page
            .pointer("/slideProperties/notesPage")
            .ok_or_else(|| WorkspaceError::NotFound(format!("notes page of slide '{slide_id}'")))?;
        let notes_id = notes_page
            .pointer("/notesProperties/speakerNotesObjectId")
            .and_then(Value::as_str)
            .ok_or_else(|| WorkspaceError::NotFound(format!("speaker notes of slide '{slide_id}'")))?;

        let has_text = notes_page
            .get("pageElements")
            .and_then(Value::as_array)
            .and_then(|elements| {
                elements
                    .iter()
                    .find(|e| e.get("objectId").and_then(Value::as_str) == Some(notes_id))
            })
            .and_then(|element| element.get("shape"))
            .and_then(shape_text)
            .is_some_and(|text| !text.trim().is_empty());

        let mut requests = Vec::new();
        if has_text {
            requests.push(json!({ "deleteText": { "objectId": notes_id, "textRange": { "type": "ALL" } } }));
        }
        if !notes_text.is_empty() {
            requests.push(json!({ "insertText": { "objectId": notes_id, "text": notes_text } }));
        }
        if !requests.is_empty() {
            self.batch_update_presentation(presentation_id, requests).await?;
        }
        Ok(json!({ "slide_id": slide_id, "notes_id": notes_id }))
    }
}

/// Bounding box for a line. Negative scale flips it when it runs up or left.
fn line_properties(page_id: &str, start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Value {
    let sign = |delta: f64| if delta < 0.0 { -1.0 } else { 1.0 };
    json!({
        "pageObjectId": page_id,
        "size": {
            "width": pt((end_x - start_x).abs()),
            "height": pt((end_y - start_y).abs()),
        },
        "transform": {
            "scaleX": sign(end_x - start_x),
            "scaleY": sign(end_y - start_y),
            "translateX": start_x,
            "translateY": start_y,
            "unit": "PT",
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ids_are_valid_and_unique() {
        let a = object_id("slide");
        let b = object_id("slide");
        assert_ne!(a, b);
        assert!(a.starts_with("slide_"));
        assert!((5..=50).contains(&a.len()));
    }

    #[test]
    fn test_slide_text_from_content() {
        assert_eq!(slide_text(&json!("One\nTwo")), "One\nTwo");
        assert_eq!(slide_text(&json!(["First", "Second", 3])), "First\nSecond\n3");
        assert_eq!(slide_text(&json!({"k": 1})), "{\"k\":1}");
        assert_eq!(slide_text(&Value::Null), "");
    }

    #[test]
    fn test_unrotated_image_transform() {
        let props = element_properties("p1", 100.0, 50.0, 400.0, 300.0, 0.0);
        assert_eq!(props["transform"]["scaleX"], json!(1.0));
        assert_eq!(props["transform"]["translateX"], json!(100.0));
        assert_eq!(props["size"]["width"]["magnitude"], json!(400.0));
        assert_eq!(props["size"]["width"]["unit"], json!("PT"));
    }

    #[test]
    fn test_rotated_transform() {
        let props = element_properties("p1", 0.0, 0.0, 10.0, 10.0, 90.0);
        let shear_y = props["transform"]["shearY"].as_f64().unwrap();
        let scale_x = props["transform"]["scaleX"].as_f64().unwrap();
        assert!((shear_y - 1.0).abs() < 1e-9);
        assert!(scale_x.abs() < 1e-9);
    }

    #[test]
    fn test_text_style_request_fields() {
        let request = text_style_request(
            "e1",
            &SlideTextStyle {
                font_size: Some(18.0),
                font_weight: Some("BOLD".to_string()),
                foreground_color: Some("#FF0000".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let update = &request["updateTextStyle"];
        assert_eq!(update["fields"], json!("fontSize,bold,foregroundColor"));
        assert_eq!(update["style"]["bold"], json!(true));
        assert_eq!(update["style"]["foregroundColor"]["opaqueColor"]["rgbColor"]["red"], json!(1.0));

        assert!(text_style_request("e1", &SlideTextStyle::default()).is_err());
    }

    #[test]
    fn test_shape_fill_request() {
        assert!(shape_fill_request("s1", &ShapeFill::default()).unwrap().is_none());

        let request = shape_fill_request(
            "s1",
            &ShapeFill {
                border_color: Some("#000".to_string()),
                border_width: Some(2.0),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
        let update = &request["updateShapeProperties"];
        assert_eq!(update["fields"], json!("outline.outlineFill.solidFill.color,outline.weight"));
        assert_eq!(update["shapeProperties"]["outline"]["weight"]["magnitude"], json!(2.0));
    }

    #[test]
    fn test_absolute_transform_scales_from_intrinsic_size() {
        let element = json!({
            "objectId": "e1",
            "size": {
                "width": { "magnitude": 127000.0, "unit": "EMU" },
                "height": { "magnitude": 254000.0, "unit": "EMU" }
            },
            "transform": { "scaleX": 1.0, "scaleY": 1.0, "translateX": 500.0, "translateY": 600.0, "unit": "EMU" }
        });

        let transform = absolute_transform(
            &element,
            &ElementGeometry {
                width: Some(20.0),
                x: Some(1.0),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(transform["scaleX"], json!(2.0));
        assert_eq!(transform["scaleY"], json!(1.0));
        assert_eq!(transform["translateX"], json!(12700.0));
        assert_eq!(transform["translateY"], json!(600.0));
        assert_eq!(transform["unit"], json!("EMU"));
    }

    #[test]
    fn test_absolute_transform_needs_size_to_scale() {
        let element = json!({ "objectId": "e1" });
        let geometry = ElementGeometry {
            height: Some(10.0),
            ..Default::default()
        };
        assert!(absolute_transform(&element, &geometry).is_err());
    }

    #[test]
    fn test_line_running_backwards_is_flipped() {
        let props = line_properties("p1", 200.0, 100.0, 50.0, 300.0);
        assert_eq!(props["size"]["width"]["magnitude"], json!(150.0));
        assert_eq!(props["size"]["height"]["magnitude"], json!(200.0));
        assert_eq!(props["transform"]["scaleX"], json!(-1.0));
        assert_eq!(props["transform"]["scaleY"], json!(1.0));
        assert_eq!(props["transform"]["translateX"], json!(200.0));
    }

    #[test]
    fn test_element_summary_and_filter() {
        let element = json!({
            "objectId": "box",
            "shape": {
                "shapeType": "TEXT_BOX",
                "text": { "textElements": [
                    { "paragraphMarker": {} },
                    { "textRun": { "content": "Hello\n" } }
                ] }
            }
        });
        let summary = element_summary(&element);
        assert_eq!(summary["element_type"], json!("shape"));
        assert_eq!(summary["shape_type"], json!("TEXT_BOX"));
        assert_eq!(summary["text"], json!("Hello\n"));

        assert!(matches_type(&summary, "text_box"));
        assert!(matches_type(&summary, "SHAPE"));
        assert!(!matches_type(&summary, "image"));

        let image = element_summary(&json!({ "objectId": "img", "image": { "contentUrl": "u" } }));
        assert_eq!(image["element_type"], json!("image"));
        assert_eq!(image["content_url"], json!("u"));
    }

    #[test]
    fn test_page_dimensions() {
        let presentation = json!({
            "presentationId": "P1",
            "pageSize": {
                "width": { "magnitude": 9144000, "unit": "EMU" },
                "height": { "magnitude": 5143500, "unit": "EMU" }
            }
        });
        let dimensions = page_dimensions(&presentation);
        assert_eq!(dimensions["width"]["magnitude"], json!(9144000));
        assert_eq!(dimensions["height"]["unit"], json!("EMU"));

        assert_eq!(page_dimensions(&json!({ "presentationId": "P1" })), Value::Null);
    }
}
