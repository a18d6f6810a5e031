//! Floor-plan import - extract venue sections from an SVG document.
//!
//! Uses usvg for complete SVG resolution (CSS, transforms, etc.), walking
//! the tree to collect section outlines as polygons. Bézier boundaries
//! (curved balcony fronts and the like) are flattened with lyon_geom.
//!
//! usvg does not preserve `data-*` attributes, so a second quick-xml pass
//! reads them straight off the markup, keyed by element id:
//!
//! - `data-section`: section name (falls back to the element id)
//! - `data-rows`, `data-seats-per-row`, `data-capacity`: uniform capacity
//! - `data-tier`: price tier copied onto produced places
//! - `data-style`: presentation style (flat, cone, left-fixed, ...)
//! - `data-obstruction`: marks the shape as an obstruction; it attaches to
//!   the section whose outline contains its centroid

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::clip::point_in_polygon;
use crate::error::SvgError;
use crate::geometry::{Point, Polygon};
use crate::section::{Obstruction, PresentationStyle, Section, SectionShape};

/// Tolerance for curve flattening.
/// Lower = more points, smoother boundaries, slower.
const CURVE_TOLERANCE: f32 = 0.1;

/// Metadata carried by one SVG element's `data-*` attributes.
#[derive(Debug, Default, Clone)]
struct ElementMeta {
    section: Option<String>,
    rows: Option<u32>,
    seats_per_row: Option<u32>,
    capacity: Option<u32>,
    tier: Option<String>,
    style: Option<PresentationStyle>,
    obstruction: bool,
    /// Raw `points` attribute of `<polygon>`/`<polyline>` elements, so
    /// obstructions declared inside `<defs>` (which usvg never renders)
    /// still carry geometry.
    points: Option<Vec<Point>>,
}

/// Extract all sections (and their obstructions) from an SVG floor plan.
pub fn extract_sections_from_svg(svg: &str) -> Result<Vec<Section>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| SvgError::Parse(e.to_string()))?;

    let mut shapes: Vec<(Option<String>, Polygon)> = Vec::new();
    collect_group(tree.root(), &mut shapes);

    let meta_by_id = collect_metadata(svg)?;

    let mut sections: Vec<Section> = Vec::new();
    let mut obstructions: Vec<(Option<String>, Polygon)> = Vec::new();
    let mut anonymous = 0usize;

    for (id, polygon) in shapes {
        let meta = id
            .as_deref()
            .and_then(|id| meta_by_id.get(id))
            .cloned()
            .unwrap_or_default();

        if meta.obstruction {
            obstructions.push((id, polygon));
            continue;
        }

        let name = meta.section.or(id).unwrap_or_else(|| {
            anonymous += 1;
            format!("section-{anonymous}")
        });
        let mut section = Section::polygon(name, polygon);
        section.rows = meta.rows;
        section.seats_per_row = meta.seats_per_row;
        section.capacity = meta.capacity;
        section.price_tier = meta.tier;
        if let Some(style) = meta.style {
            section.style = style;
        }
        sections.push(section);
    }

    // Obstructions declared in <defs> never reach the usvg scene, but the
    // metadata pass keeps their raw points.
    let seen_ids: Vec<String> = obstructions.iter().filter_map(|(id, _)| id.clone()).collect();
    for (id, meta) in &meta_by_id {
        if meta.obstruction && !seen_ids.iter().any(|seen| seen == id) {
            if let Some(points) = &meta.points {
                obstructions.push((Some(id.clone()), Polygon::new(points.clone())));
            }
        }
    }

    if sections.is_empty() {
        return Err(SvgError::NoSections);
    }

    attach_obstructions(&mut sections, obstructions);

    Ok(sections)
}

/// Assign each obstruction to the section whose outline contains its
/// centroid. Obstructions that land in no section are dropped.
fn attach_obstructions(sections: &mut [Section], obstructions: Vec<(Option<String>, Polygon)>) {
    for (id, polygon) in obstructions {
        let Some(centroid) = polygon.centroid() else {
            continue;
        };

        let host = sections.iter_mut().find(|section| match &section.shape {
            SectionShape::Polygon(outline) => {
                point_in_polygon(centroid.x, centroid.y, &outline.outer)
            }
            SectionShape::Rect(rect) => rect.contains(centroid.x, centroid.y),
        });

        match host {
            Some(section) => section.obstructions.push(Obstruction {
                name: id,
                shape: SectionShape::Polygon(polygon),
            }),
            None => {
                tracing::debug!(obstruction = ?id, "obstruction outside every section, dropped");
            }
        }
    }
}

/// Recursively collect polygons from a usvg group.
fn collect_group(group: &usvg::Group, shapes: &mut Vec<(Option<String>, Polygon)>) {
    for child in group.children() {
        collect_node(child, shapes);
    }
}

fn collect_node(node: &usvg::Node, shapes: &mut Vec<(Option<String>, Polygon)>) {
    match node {
        usvg::Node::Group(group) => collect_group(group, shapes),
        usvg::Node::Path(path) => {
            if let Some((id, polygon)) = path_to_polygon(path) {
                shapes.push((id, polygon));
            }
        }
        // Text, images etc. are not section geometry.
        _ => {}
    }
}

/// Convert a resolved usvg path into an outline polygon, flattening
/// Bézier segments at [`CURVE_TOLERANCE`].
fn path_to_polygon(path: &usvg::Path) -> Option<(Option<String>, Polygon)> {
    let mut points: Vec<Point> = Vec::new();
    let mut last: Option<(f32, f32)> = None;

    for segment in path.data().segments() {
        match segment {
            usvg::tiny_skia_path::PathSegment::MoveTo(p) => {
                if !points.is_empty() {
                    // A second subpath starts; the first outline is the
                    // section boundary, the rest is ignored.
                    break;
                }
                points.push(Point::new(f64::from(p.x), f64::from(p.y)));
                last = Some((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::LineTo(p) => {
                points.push(Point::new(f64::from(p.x), f64::from(p.y)));
                last = Some((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::QuadTo(ctrl, p) => {
                if let Some((lx, ly)) = last {
                    let curve = lyon_geom::QuadraticBezierSegment {
                        from: lyon_geom::point(lx, ly),
                        ctrl: lyon_geom::point(ctrl.x, ctrl.y),
                        to: lyon_geom::point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |seg| {
                        points.push(Point::new(f64::from(seg.to.x), f64::from(seg.to.y)));
                    });
                } else {
                    points.push(Point::new(f64::from(p.x), f64::from(p.y)));
                }
                last = Some((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                if let Some((lx, ly)) = last {
                    let curve = lyon_geom::CubicBezierSegment {
                        from: lyon_geom::point(lx, ly),
                        ctrl1: lyon_geom::point(ctrl1.x, ctrl1.y),
                        ctrl2: lyon_geom::point(ctrl2.x, ctrl2.y),
                        to: lyon_geom::point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |seg| {
                        points.push(Point::new(f64::from(seg.to.x), f64::from(seg.to.y)));
                    });
                } else {
                    points.push(Point::new(f64::from(p.x), f64::from(p.y)));
                }
                last = Some((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::Close => {}
        }
    }

    // Curve flattening can emit duplicate consecutive points.
    if points.len() >= 2 {
        points.dedup_by(|a, b| (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
    }

    if points.len() < 3 {
        return None;
    }

    let id = if path.id().is_empty() {
        None
    } else {
        Some(path.id().to_string())
    };
    Some((id, Polygon::new(points)))
}

/// Second pass: read `data-*` attributes quick-xml sees but usvg drops.
fn collect_metadata(svg: &str) -> Result<BTreeMap<String, ElementMeta>, SvgError> {
    let mut reader = Reader::from_str(svg);
    let mut meta_by_id: BTreeMap<String, ElementMeta> = BTreeMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                let mut id: Option<String> = None;
                let mut meta = ElementMeta::default();
                let is_points_element =
                    matches!(element.name().as_ref(), b"polygon" | b"polyline");

                for attribute in element.attributes() {
                    let attribute = attribute.map_err(|e| SvgError::Parse(e.to_string()))?;
                    let value = attribute
                        .unescape_value()
                        .map_err(|e| SvgError::Parse(e.to_string()))?;

                    match attribute.key.as_ref() {
                        b"id" => id = Some(value.into_owned()),
                        b"data-section" => meta.section = Some(value.into_owned()),
                        b"data-rows" => meta.rows = value.parse().ok(),
                        b"data-seats-per-row" => meta.seats_per_row = value.parse().ok(),
                        b"data-capacity" => meta.capacity = value.parse().ok(),
                        b"data-tier" => meta.tier = Some(value.into_owned()),
                        b"data-style" => meta.style = PresentationStyle::from_name(&value),
                        b"data-obstruction" => {
                            meta.obstruction = value == "true" || value == "1";
                        }
                        b"points" if is_points_element => {
                            let points: Vec<Point> = svgtypes::PointsParser::from(value.as_ref())
                                .map(|(x, y)| Point::new(x, y))
                                .collect();
                            if points.len() >= 3 {
                                meta.points = Some(points);
                            }
                        }
                        _ => {}
                    }
                }

                if let Some(id) = id {
                    meta_by_id.insert(id, meta);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SvgError::Parse(e.to_string())),
            _ => {}
        }
    }

    Ok(meta_by_id)
}
