//! Package parts other than the slides themselves.
//!
//! The deck uses a single blank master, a single blank layout and a plain
//! theme; every slide draws its own shapes.

use std::fmt::Write as FmtWrite;

use bid_core::Result;

use crate::xml::{escape_xml, xml_err, NS_A, NS_P, NS_R, SLIDE_HEIGHT, SLIDE_WIDTH};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

/// First slide id allowed in `p:sldIdLst`.
const FIRST_SLIDE_ID: usize = 256;

pub const PRESENTATION_PATH: &str = "ppt/presentation.xml";
pub const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

pub fn slide_path(index: usize) -> String {
    format!("ppt/slides/slide{}.xml", index)
}

pub fn slide_rels_path(index: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", index)
}

pub fn content_types(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
    for index in 1..=slide_count {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            index
        )
        .map_err(xml_err)?;
    }
    xml.push_str("</Types>");
    Ok(xml)
}

pub fn root_rels() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<Relationships xmlns="{ns}">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECL,
        ns = REL_NS
    )
}

/// Relationship id of slide `index` (1-based) in the presentation part.
/// `rId1` is the master.
pub fn slide_rel_id(index: usize) -> String {
    format!("rId{}", index + 1)
}

pub fn presentation(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_A, NS_R, NS_P
    )
    .map_err(xml_err)?;
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 1..=slide_count {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + index - 1,
                slide_rel_id(index)
            )
            .map_err(xml_err)?;
        }
        xml.push_str("</p:sldIdLst>");
    }
    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/><p:notesSz cx="6858000" cy="9144000"/>"#,
        SLIDE_WIDTH, SLIDE_HEIGHT
    )
    .map_err(xml_err)?;
    xml.push_str("</p:presentation>");
    Ok(xml)
}

pub fn presentation_rels(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    write!(xml, r#"<Relationships xmlns="{}">"#, REL_NS).map_err(xml_err)?;
    write!(
        xml,
        r#"<Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>"#,
        REL_SLIDE_MASTER
    )
    .map_err(xml_err)?;
    for index in 1..=slide_count {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="slides/slide{}.xml"/>"#,
            slide_rel_id(index),
            REL_SLIDE,
            index
        )
        .map_err(xml_err)?;
    }
    write!(
        xml,
        r#"<Relationship Id="rId{}" Type="{}" Target="theme/theme1.xml"/>"#,
        slide_count + 2,
        REL_THEME
    )
    .map_err(xml_err)?;
    xml.push_str("</Relationships>");
    Ok(xml)
}

pub fn slide_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#,
        XML_DECL, REL_NS, REL_SLIDE_LAYOUT
    )
}

const EMPTY_TREE: &str = concat!(
    r#"<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    r#"</p:spTree></p:cSld>"#
);

pub fn slide_master() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            "{tree}",
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            r#"<p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>"#,
            "</p:sldMaster>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = EMPTY_TREE
    )
}

pub fn slide_master_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="{}" Target="../theme/theme1.xml"/></Relationships>"#,
        XML_DECL, REL_NS, REL_SLIDE_LAYOUT, REL_THEME
    )
}

pub fn slide_layout() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<p:sldLayout xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" type="blank" preserve="1">"#,
            "{tree}",
            r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = EMPTY_TREE.replace("<p:cSld>", r#"<p:cSld name="Blank">"#)
    )
}

pub fn slide_layout_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#,
        XML_DECL, REL_NS, REL_SLIDE_MASTER
    )
}

fn solid_fill_styles() -> String {
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#.repeat(3)
}

pub fn theme() -> String {
    let line = r#"<a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#;
    format!(
        concat!(
            "{decl}",
            r#"<a:theme xmlns:a="{a}" name="BID"><a:themeElements>"#,
            r#"<a:clrScheme name="BID">"#,
            r#"<a:dk1><a:srgbClr val="000000"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>"#,
            r#"<a:dk2><a:srgbClr val="363636"/></a:dk2><a:lt2><a:srgbClr val="F2F2F2"/></a:lt2>"#,
            r#"<a:accent1><a:srgbClr val="FF6B35"/></a:accent1><a:accent2><a:srgbClr val="4B5563"/></a:accent2>"#,
            r#"<a:accent3><a:srgbClr val="374151"/></a:accent3><a:accent4><a:srgbClr val="666666"/></a:accent4>"#,
            r#"<a:accent5><a:srgbClr val="999999"/></a:accent5><a:accent6><a:srgbClr val="F2F2F2"/></a:accent6>"#,
            r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#,
            "</a:clrScheme>",
            r#"<a:fontScheme name="BID">"#,
            r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>",
            r#"<a:fmtScheme name="BID">"#,
            "<a:fillStyleLst>{fills}</a:fillStyleLst>",
            "<a:lnStyleLst>{line}{line}{line}</a:lnStyleLst>",
            "<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>",
            "<a:bgFillStyleLst>{fills}</a:bgFillStyleLst>",
            "</a:fmtScheme>",
            "</a:themeElements></a:theme>"
        ),
        decl = XML_DECL,
        a = NS_A,
        fills = solid_fill_styles(),
        line = line
    )
}

pub fn core_props(title: &str) -> String {
    format!(
        concat!(
            "{}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{}</dc:title><dc:creator>{}</dc:creator>",
            "</cp:coreProperties>"
        ),
        XML_DECL,
        escape_xml(title),
        env!("CARGO_PKG_NAME")
    )
}

pub fn app_props(slide_count: usize) -> String {
    format!(
        concat!(
            "{}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
            "<Application>{}</Application><Slides>{}</Slides>",
            "</Properties>"
        ),
        XML_DECL,
        env!("CARGO_PKG_NAME"),
        slide_count
    )
}
