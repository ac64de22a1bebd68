//! DrawingML / PresentationML fragments for slide parts.
//!
//! Slides are assembled as strings; every value goes through
//! [`escape_xml`] before it is written.

use std::fmt::{self, Write as FmtWrite};

use bid_core::{Error, Result};

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// 16:9 slide, 10 in × 5.625 in.
pub const SLIDE_WIDTH: i64 = 9_144_000;
pub const SLIDE_HEIGHT: i64 = 5_143_500;

/// One point in EMU, used for table borders.
const BORDER_WIDTH: i64 = 12_700;

pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Convert inches to EMU.
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub(crate) fn xml_err(e: fmt::Error) -> Error {
    Error::XmlError(e.to_string())
}

/// Position and size of a shape, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    /// Frame from inches.
    pub fn inches(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x: emu(x),
            y: emu(y),
            cx: emu(w),
            cy: emu(h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn attr(&self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

/// Size (in points) and colour applied to every run of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size: u32,
    pub color: &'static str,
}

impl TextStyle {
    pub const fn new(size: u32, color: &'static str) -> Self {
        Self { size, color }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Run {
    text: String,
    bold: bool,
    italic: bool,
}

/// A paragraph of styled runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    runs: Vec<Run>,
    style: TextStyle,
    bullet: bool,
    align: Align,
}

impl Paragraph {
    pub fn new(style: TextStyle) -> Self {
        Self {
            runs: Vec::new(),
            style,
            bullet: false,
            align: Align::Left,
        }
    }

    /// An empty separator line.
    pub fn blank(style: TextStyle) -> Self {
        Self::new(style)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.push(text.into(), false, false);
        self
    }

    pub fn bold(mut self, text: impl Into<String>) -> Self {
        self.push(text.into(), true, false);
        self
    }

    pub fn italic(mut self, text: impl Into<String>) -> Self {
        self.push(text.into(), false, true);
        self
    }

    pub fn bulleted(mut self) -> Self {
        self.bullet = true;
        self
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    fn push(&mut self, text: String, bold: bool, italic: bool) {
        if !text.is_empty() {
            self.runs.push(Run { text, bold, italic });
        }
    }

    fn to_xml(&self, xml: &mut String) -> Result<()> {
        let size = self.style.size * 100;
        xml.push_str("<a:p>");

        write!(xml, r#"<a:pPr algn="{}""#, self.align.attr()).map_err(xml_err)?;
        if self.bullet {
            xml.push_str(r#" marL="171450" indent="-171450"><a:buFont typeface="Arial"/><a:buChar char="•"/></a:pPr>"#);
        } else {
            xml.push_str("><a:buNone/></a:pPr>");
        }

        for run in &self.runs {
            write!(xml, r#"<a:r><a:rPr lang="en-US" sz="{}""#, size).map_err(xml_err)?;
            if run.bold {
                xml.push_str(r#" b="1""#);
            }
            if run.italic {
                xml.push_str(r#" i="1""#);
            }
            write!(
                xml,
                r#" dirty="0"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:rPr><a:t>{}</a:t></a:r>"#,
                self.style.color,
                escape_xml(&run.text)
            )
            .map_err(xml_err)?;
        }

        write!(xml, r#"<a:endParaRPr lang="en-US" sz="{}" dirty="0"/></a:p>"#, size)
            .map_err(xml_err)?;
        Ok(())
    }
}

/// Header, body and styling of a table shape.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec<'a> {
    pub headers: &'a [String],
    pub rows: &'a [Vec<String>],
    pub font_size: u32,
    pub row_height: i64,
    pub header_fill: &'a str,
    pub border_color: &'a str,
}

/// Builder for the shape tree of one slide.
#[derive(Debug)]
pub struct ShapeTree {
    xml: String,
    next_id: u32,
}

impl Default for ShapeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTree {
    pub fn new() -> Self {
        Self {
            xml: String::with_capacity(4096),
            // id 1 is the group shape of the tree itself.
            next_id: 2,
        }
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn xfrm(&mut self, tag: &str, frame: Frame) -> Result<()> {
        write!(
            self.xml,
            r#"<{tag}><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{tag}>"#,
            frame.x,
            frame.y,
            frame.cx,
            frame.cy,
            tag = tag
        )
        .map_err(xml_err)
    }

    /// Add a text box holding `paragraphs`, anchored at the top.
    pub fn text_box(&mut self, frame: Frame, paragraphs: &[Paragraph]) -> Result<()> {
        let id = self.take_id();
        write!(
            self.xml,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Text Box {}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>"#,
            id, id
        )
        .map_err(xml_err)?;
        self.xfrm("a:xfrm", frame)?;
        self.xml
            .push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);
        self.xml.push_str(
            r#"<p:txBody><a:bodyPr wrap="square" lIns="0" tIns="0" rIns="0" bIns="0" anchor="t" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#,
        );
        if paragraphs.is_empty() {
            self.xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
        }
        for paragraph in paragraphs {
            paragraph.to_xml(&mut self.xml)?;
        }
        self.xml.push_str("</p:txBody></p:sp>");
        Ok(())
    }

    /// Add a filled rectangle without outline.
    pub fn rect(&mut self, frame: Frame, fill: &str) -> Result<()> {
        let id = self.take_id();
        write!(
            self.xml,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Rectangle {}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>"#,
            id, id
        )
        .map_err(xml_err)?;
        self.xfrm("a:xfrm", frame)?;
        write!(
            self.xml,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:ln><a:noFill/></a:ln></p:spPr></p:sp>"#,
            fill
        )
        .map_err(xml_err)
    }

    fn cell(&mut self, text: &str, spec: &TableSpec<'_>, header: bool) -> Result<()> {
        self.xml.push_str("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p>");
        write!(self.xml, r#"<a:r><a:rPr lang="en-US" sz="{}""#, spec.font_size * 100)
            .map_err(xml_err)?;
        if header {
            self.xml.push_str(r#" b="1""#);
        }
        write!(
            self.xml,
            r#" dirty="0"><a:solidFill><a:srgbClr val="363636"/></a:solidFill></a:rPr><a:t>{}</a:t></a:r></a:p></a:txBody><a:tcPr>"#,
            escape_xml(text)
        )
        .map_err(xml_err)?;
        for side in ["lnL", "lnR", "lnT", "lnB"] {
            write!(
                self.xml,
                r#"<a:{side} w="{}"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:{side}>"#,
                BORDER_WIDTH,
                spec.border_color,
                side = side
            )
            .map_err(xml_err)?;
        }
        if header {
            write!(
                self.xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                spec.header_fill
            )
            .map_err(xml_err)?;
        }
        self.xml.push_str("</a:tcPr></a:tc>");
        Ok(())
    }

    fn row(&mut self, cells: &[String], spec: &TableSpec<'_>, header: bool) -> Result<()> {
        write!(self.xml, r#"<a:tr h="{}">"#, spec.row_height).map_err(xml_err)?;
        // Short rows are padded so every row spans the grid.
        for index in 0..spec.headers.len() {
            let text = cells.get(index).map(String::as_str).unwrap_or("");
            self.cell(text, spec, header)?;
        }
        self.xml.push_str("</a:tr>");
        Ok(())
    }

    /// Add a table: one bold shaded header row, then one row per entry.
    pub fn table(&mut self, frame: Frame, spec: &TableSpec<'_>) -> Result<()> {
        let columns = spec.headers.len().max(1) as i64;
        let col_width = frame.cx / columns;
        let height = spec.row_height * (spec.rows.len() as i64 + 1);
        let id = self.take_id();

        write!(
            self.xml,
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{}" name="Table {}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>"#,
            id, id
        )
        .map_err(xml_err)?;
        self.xfrm("p:xfrm", Frame { cy: height, ..frame })?;
        self.xml.push_str(
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1"/><a:tblGrid>"#,
        );
        for _ in 0..spec.headers.len() {
            write!(self.xml, r#"<a:gridCol w="{}"/>"#, col_width).map_err(xml_err)?;
        }
        self.xml.push_str("</a:tblGrid>");

        self.row(spec.headers, spec, true)?;
        for row in spec.rows {
            self.row(row, spec, false)?;
        }

        self.xml.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
        Ok(())
    }

    /// Wrap the shapes into a complete slide part.
    pub fn finish(self) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<p:sld xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}"><p:cSld><p:spTree>"#,
                r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
                r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
                "{shapes}",
                r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
            ),
            a = NS_A,
            r = NS_R,
            p = NS_P,
            shapes = self.xml
        )
    }
}
