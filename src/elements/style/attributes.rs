//! Declarative table of style attributes.
//!
//! Each attribute binds a canonical name to one or more attribute
//! selectors inside the style definition, plus a converter between the
//! API value and the stored string and a validator applied before any
//! write. Multi-selector attributes read the first selector that
//! resolves and write every selector in lockstep.

use crate::elements::style::StyleValue;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Descriptor {
    pub name: &'static str,
    pub selectors: &'static [&'static str],
    pub required: bool,
    pub converter: Converter,
    pub validator: Validator,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Converter {
    Identity,
    /// `true`/`false` stored as `"1"`/`"0"`.
    Boolean,
    /// Points in the API, half-points in the document.
    FontSize,
}

impl Converter {
    pub(crate) fn encode(&self, value: &StyleValue) -> String {
        match (self, value) {
            (Converter::Boolean, StyleValue::Bool(b)) => {
                if *b { "1" } else { "0" }.to_string()
            }
            (Converter::FontSize, StyleValue::Int(points)) => (points * 2).to_string(),
            (Converter::FontSize, StyleValue::Str(s)) => match s.parse::<u32>() {
                Ok(points) => (points * 2).to_string(),
                Err(_) => s.clone(),
            },
            _ => value.render(),
        }
    }

    pub(crate) fn decode(&self, raw: &str) -> StyleValue {
        match self {
            Converter::Identity => StyleValue::Str(raw.to_string()),
            Converter::Boolean => StyleValue::Bool(raw == "1" || raw == "true"),
            Converter::FontSize => {
                StyleValue::Int(raw.parse::<u32>().unwrap_or_default() / 2)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Validator {
    Any,
    /// 3- or 6-digit hex color, no `#`.
    HexColor,
    OneOf(&'static [&'static str]),
}

impl Validator {
    pub(crate) fn accepts(&self, value: &StyleValue) -> bool {
        match self {
            Validator::Any => true,
            Validator::HexColor => matches!(
                value,
                StyleValue::Str(s)
                    if (s.len() == 3 || s.len() == 6)
                        && s.chars().all(|c| c.is_ascii_hexdigit())
            ),
            Validator::OneOf(options) => {
                matches!(value, StyleValue::Str(s) if options.contains(&s.as_str()))
            }
        }
    }
}

const STYLE_TYPES: &[&str] = &["paragraph", "character", "table", "numbering"];
const ALIGNMENTS: &[&str] = &["left", "center", "right", "both"];

macro_rules! attribute {
    ($name:literal, [$($selector:literal),+]) => {
        attribute!($name, [$($selector),+], false, Converter::Identity, Validator::Any)
    };
    ($name:literal, [$($selector:literal),+], $converter:expr) => {
        attribute!($name, [$($selector),+], false, $converter, Validator::Any)
    };
    ($name:literal, [$($selector:literal),+], $converter:expr, $validator:expr) => {
        attribute!($name, [$($selector),+], false, $converter, $validator)
    };
    ($name:literal, [$($selector:literal),+], $required:expr, $converter:expr, $validator:expr) => {
        Descriptor {
            name: $name,
            selectors: &[$($selector),+],
            required: $required,
            converter: $converter,
            validator: $validator,
        }
    };
}

pub(crate) const ATTRIBUTES: &[Descriptor] = &[
    attribute!("id", ["./@w:styleId"], true, Converter::Identity, Validator::Any),
    attribute!(
        "name",
        ["./w:name/@w:val", "./w:next/@w:val"],
        true,
        Converter::Identity,
        Validator::Any
    ),
    attribute!(
        "type",
        ["./@w:type"],
        true,
        Converter::Identity,
        Validator::OneOf(STYLE_TYPES)
    ),
    attribute!("keep_next", ["./w:pPr/w:keepNext/@w:val"], Converter::Boolean),
    attribute!("keep_lines", ["./w:pPr/w:keepLines/@w:val"], Converter::Boolean),
    attribute!(
        "page_break_before",
        ["./w:pPr/w:pageBreakBefore/@w:val"],
        Converter::Boolean
    ),
    attribute!("widow_control", ["./w:pPr/w:widowControl/@w:val"], Converter::Boolean),
    attribute!(
        "shading_style",
        ["./w:pPr/w:shd/@w:val", "./w:rPr/w:shd/@w:val"]
    ),
    attribute!(
        "shading_color",
        ["./w:pPr/w:shd/@w:color", "./w:rPr/w:shd/@w:color"]
    ),
    attribute!(
        "shading_fill",
        ["./w:pPr/w:shd/@w:fill", "./w:rPr/w:shd/@w:fill"]
    ),
    attribute!(
        "suppress_auto_hyphens",
        ["./w:pPr/w:suppressAutoHyphens/@w:val"],
        Converter::Boolean
    ),
    attribute!(
        "bidirectional_text",
        ["./w:pPr/w:bidi/@w:val"],
        Converter::Boolean
    ),
    attribute!("spacing_before", ["./w:pPr/w:spacing/@w:before"]),
    attribute!("spacing_after", ["./w:pPr/w:spacing/@w:after"]),
    attribute!("line_spacing", ["./w:pPr/w:spacing/@w:line"]),
    attribute!("line_rule", ["./w:pPr/w:spacing/@w:lineRule"]),
    attribute!("indent_left", ["./w:pPr/w:ind/@w:start", "./w:pPr/w:ind/@w:left"]),
    attribute!("indent_right", ["./w:pPr/w:ind/@w:end", "./w:pPr/w:ind/@w:right"]),
    attribute!("indent_first_line", ["./w:pPr/w:ind/@w:firstLine"]),
    attribute!(
        "align",
        ["./w:pPr/w:jc/@w:val"],
        Converter::Identity,
        Validator::OneOf(ALIGNMENTS)
    ),
    attribute!("outline_level", ["./w:pPr/w:outlineLvl/@w:val"]),
    attribute!(
        "font",
        [
            "./w:rPr/w:rFonts/@w:ascii",
            "./w:rPr/w:rFonts/@w:cs",
            "./w:rPr/w:rFonts/@w:hAnsi",
            "./w:rPr/w:rFonts/@w:eastAsia"
        ]
    ),
    attribute!("font_ascii", ["./w:rPr/w:rFonts/@w:ascii"]),
    attribute!("font_cs", ["./w:rPr/w:rFonts/@w:cs"]),
    attribute!("font_hAnsi", ["./w:rPr/w:rFonts/@w:hAnsi"]),
    attribute!("font_eastAsia", ["./w:rPr/w:rFonts/@w:eastAsia"]),
    attribute!("bold", ["./w:rPr/w:b/@w:val", "./w:rPr/w:bCs/@w:val"], Converter::Boolean),
    attribute!("italic", ["./w:rPr/w:i/@w:val", "./w:rPr/w:iCs/@w:val"], Converter::Boolean),
    attribute!("caps", ["./w:rPr/w:caps/@w:val"], Converter::Boolean),
    attribute!("small_caps", ["./w:rPr/w:smallCaps/@w:val"], Converter::Boolean),
    attribute!("strike", ["./w:rPr/w:strike/@w:val"], Converter::Boolean),
    attribute!("double_strike", ["./w:rPr/w:dstrike/@w:val"], Converter::Boolean),
    attribute!("outline", ["./w:rPr/w:outline/@w:val"], Converter::Boolean),
    attribute!(
        "font_color",
        ["./w:rPr/w:color/@w:val"],
        Converter::Identity,
        Validator::HexColor
    ),
    attribute!("font_size", ["./w:rPr/w:sz/@w:val"], Converter::FontSize),
    attribute!("font_size_cs", ["./w:rPr/w:szCs/@w:val"], Converter::FontSize),
    attribute!("underline_style", ["./w:rPr/w:u/@w:val"]),
    attribute!(
        "underline_color",
        ["./w:rPr/w:u/@w:color"],
        Converter::Identity,
        Validator::HexColor
    ),
    attribute!("spacing", ["./w:rPr/w:spacing/@w:val"]),
    attribute!("kerning", ["./w:rPr/w:kern/@w:val"]),
    attribute!("position", ["./w:rPr/w:position/@w:val"]),
    attribute!(
        "text_fill_color",
        ["./w:rPr/w14:textFill/w14:solidFill/w14:srgbClr/@w14:val"],
        Converter::Identity,
        Validator::HexColor
    ),
    attribute!("vertical_alignment", ["./w:rPr/w:vertAlign/@w:val"]),
    attribute!("lang", ["./w:rPr/w:lang/@w:val"]),
];

pub(crate) fn descriptor(name: &str) -> Option<&'static Descriptor> {
    ATTRIBUTES.iter().find(|d| d.name == name)
}
