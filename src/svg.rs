//! SVG surface for offline snapshots of a background frame

use folioverse_engine::{Color, Overlay, Paint, Point, Size, Surface};

/// Page colors behind the particle layer
pub const DARK_PAGE: Color = Color::rgb(0x0a, 0x0a, 0x0a);
pub const LIGHT_PAGE: Color = Color::rgb(0xff, 0xff, 0xff);

/// Layers composited beneath the recorded particles
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub page: Color,
    /// Whole-layer opacity of the particles
    pub particle_opacity: f64,
    pub overlay: Option<Overlay>,
}

/// Surface that accumulates one frame as SVG elements
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    body: String,
}

fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn stroke_attrs(paint: &Paint) -> String {
    format!(
        r#"fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
        paint.color.to_hex(),
        num(paint.alpha),
        num(paint.line_width)
    )
}

fn fill_attrs(paint: &Paint) -> String {
    format!(r#"fill="{}" fill-opacity="{}""#, paint.color.to_hex(), num(paint.alpha))
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl SvgSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
        }
    }

    /// Elements drawn since the last clear
    pub fn body(&self) -> &str {
        &self.body
    }

    /// A standalone SVG document of the current frame over `backdrop`
    pub fn to_document(&self, backdrop: &Backdrop) -> String {
        let (w, h) = (num(self.size.width), num(self.size.height));
        let page = backdrop.page.to_hex();
        let mut doc = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        );
        doc.push_str(&format!("<rect width=\"100%\" height=\"100%\" fill=\"{page}\"/>\n"));

        if let Some(overlay) = &backdrop.overlay {
            doc.push_str(&format!(
                "<image href=\"{}\" width=\"{w}\" height=\"{h}\" preserveAspectRatio=\"xMidYMid slice\" opacity=\"{}\"/>\n",
                escape_attr(&overlay.url),
                num(overlay.image_opacity)
            ));
            doc.push_str(&format!(
                "<rect width=\"100%\" height=\"100%\" fill=\"{page}\" opacity=\"{}\"/>\n",
                num(overlay.scrim_opacity)
            ));
        }

        doc.push_str(&format!("<g opacity=\"{}\">\n", num(backdrop.particle_opacity)));
        doc.push_str(&self.body);
        doc.push_str("</g>\n</svg>\n");
        doc
    }

    fn element(&mut self, element: String) {
        self.body.push_str(&element);
        self.body.push('\n');
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.body.clear();
    }

    fn clear(&mut self) {
        self.body.clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.element(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            stroke_attrs(paint)
        ));
    }

    fn stroke_path(&mut self, points: &[Point], paint: &Paint) {
        self.element(format!(
            r#"<polyline points="{}" {}/>"#,
            points_attr(points),
            stroke_attrs(paint)
        ));
    }

    fn stroke_polygon(&mut self, points: &[Point], paint: &Paint) {
        self.element(format!(
            r#"<polygon points="{}" {}/>"#,
            points_attr(points),
            stroke_attrs(paint)
        ));
    }

    fn fill_polygon(&mut self, points: &[Point], paint: &Paint) {
        self.element(format!(
            r#"<polygon points="{}" {}/>"#,
            points_attr(points),
            fill_attrs(paint)
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.element(format!(
            r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
            num(center.x),
            num(center.y),
            num(radius),
            fill_attrs(paint)
        ));
    }

    fn fill_rect(&mut self, origin: Point, size: Size, paint: &Paint) {
        self.element(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            num(origin.x),
            num(origin.y),
            num(size.width),
            num(size.height),
            fill_attrs(paint)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Color = Color::rgb(0x3b, 0x82, 0xf6);

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(1.5), "1.5");
        assert_eq!(num(0.126), "0.13");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn clear_discards_elements() {
        let mut svg = SvgSurface::new(Size::new(10.0, 10.0));
        svg.fill_circle(Point::new(1.0, 1.0), 2.0, &Paint::fill(BLUE, 0.5));
        assert!(!svg.body().is_empty());
        svg.clear();
        assert!(svg.body().is_empty());
    }

    #[test]
    fn overlay_url_is_escaped() {
        let svg = SvgSurface::new(Size::new(10.0, 10.0));
        let doc = svg.to_document(&Backdrop {
            page: LIGHT_PAGE,
            particle_opacity: 0.4,
            overlay: Some(Overlay {
                url: "/a.png?x=1&y=\"2\"".to_string(),
                image_opacity: 0.15,
                scrim_opacity: 0.85,
            }),
        });
        assert!(doc.contains(r#"href="/a.png?x=1&amp;y=&quot;2&quot;""#));
        assert!(doc.contains(r##"<rect width="100%" height="100%" fill="#ffffff" opacity="0.85"/>"##));
    }

    #[test]
    fn snapshot_small_frame() {
        let mut svg = SvgSurface::new(Size::new(40.0, 20.0));
        svg.stroke_line(Point::new(0.0, 0.0), Point::new(40.0, 20.0), &Paint::stroke(BLUE, 0.25, 1.0));
        svg.fill_rect(Point::new(4.5, 4.5), Size::new(3.0, 3.0), &Paint::fill(BLUE, 0.6));
        svg.stroke_polygon(
            &[Point::new(10.0, 2.0), Point::new(14.0, 8.0), Point::new(6.0, 8.0)],
            &Paint::stroke(BLUE, 0.2, 1.0),
        );
        let doc = svg.to_document(&Backdrop {
            page: DARK_PAGE,
            particle_opacity: 0.5,
            overlay: None,
        });
        insta::assert_snapshot!(doc, @r##"
        <svg xmlns="http://www.w3.org/2000/svg" width="40" height="20" viewBox="0 0 40 20">
        <rect width="100%" height="100%" fill="#0a0a0a"/>
        <g opacity="0.5">
        <line x1="0" y1="0" x2="40" y2="20" fill="none" stroke="#3b82f6" stroke-opacity="0.25" stroke-width="1"/>
        <rect x="4.5" y="4.5" width="3" height="3" fill="#3b82f6" fill-opacity="0.6"/>
        <polygon points="10,2 14,8 6,8" fill="none" stroke="#3b82f6" stroke-opacity="0.2" stroke-width="1"/>
        </g>
        </svg>
        "##);
    }
}
