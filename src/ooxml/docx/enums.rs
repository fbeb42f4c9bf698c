/// Enumerations for Word document elements.
///
/// This module provides the enumerations used by the paragraph, style and
/// numbering APIs, matching those found in the VBA API and python-docx.
use crate::ooxml::docx::numbering::NumberingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format of a numbering level counter (`w:numFmt/@w:val`).
///
/// Corresponds to the subset of `ST_NumberFormat` needed to render list
/// numbers. Any other code is reported as
/// [`NumberingError::UnsupportedFormat`].
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::enums::NumberFormat;
///
/// let fmt = NumberFormat::from_xml("lowerRoman").unwrap();
/// assert_eq!(fmt, NumberFormat::LowerRoman);
/// assert_eq!(fmt.to_xml(), "lowerRoman");
/// assert!(NumberFormat::from_xml("chineseCounting").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NumberFormat {
    /// 1, 2, 3
    Decimal = 0,
    /// a, b, ..., z, aa, ab
    LowerLetter = 1,
    /// A, B, ..., Z, AA, AB
    UpperLetter = 2,
    /// i, ii, iii
    LowerRoman = 3,
    /// I, II, III
    UpperRoman = 4,
    /// No counter text.
    None = 5,
    /// Bullet; the level text is shown as-is.
    Bullet = 6,
    /// 01, 02, ..., 09, 10
    DecimalZero = 7,
}

impl NumberFormat {
    /// Convert the format to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::LowerLetter => "lowerLetter",
            Self::UpperLetter => "upperLetter",
            Self::LowerRoman => "lowerRoman",
            Self::UpperRoman => "upperRoman",
            Self::None => "none",
            Self::Bullet => "bullet",
            Self::DecimalZero => "decimalZero",
        }
    }

    /// Parse a format from its XML attribute value.
    pub fn from_xml(s: &str) -> Result<Self, NumberingError> {
        match s {
            "decimal" => Ok(Self::Decimal),
            "lowerLetter" => Ok(Self::LowerLetter),
            "upperLetter" => Ok(Self::UpperLetter),
            "lowerRoman" => Ok(Self::LowerRoman),
            "upperRoman" => Ok(Self::UpperRoman),
            "none" => Ok(Self::None),
            "bullet" => Ok(Self::Bullet),
            "decimalZero" => Ok(Self::DecimalZero),
            other => Err(NumberingError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl Default for NumberFormat {
    #[inline]
    fn default() -> Self {
        Self::Decimal
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// Separator written between a list number and the paragraph text
/// (`w:suff/@w:val`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LevelSuffix {
    /// A tab character. Word's default when `w:suff` is absent.
    Tab = 0,
    /// A single space.
    Space = 1,
    /// Nothing.
    Nothing = 2,
}

impl LevelSuffix {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Tab => "tab",
            Self::Space => "space",
            Self::Nothing => "nothing",
        }
    }

    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "tab" => Some(Self::Tab),
            "space" => Some(Self::Space),
            "nothing" => Some(Self::Nothing),
            _ => None,
        }
    }

    /// The text the suffix renders as.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tab => "\t",
            Self::Space => " ",
            Self::Nothing => "",
        }
    }
}

impl Default for LevelSuffix {
    #[inline]
    fn default() -> Self {
        Self::Tab
    }
}

/// Paragraph alignment (`w:jc/@w:val`).
///
/// Corresponds to the VBA `WdParagraphAlignment` enumeration.
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::enums::WdParagraphAlignment;
///
/// assert_eq!(WdParagraphAlignment::Justify.to_xml(), "both");
/// assert_eq!(WdParagraphAlignment::from_xml("start"), Some(WdParagraphAlignment::Left));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WdParagraphAlignment {
    Left = 0,
    Center = 1,
    Right = 2,
    Justify = 3,
    Distribute = 4,
}

impl WdParagraphAlignment {
    /// Convert the alignment to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
            Self::Distribute => "distribute",
        }
    }

    /// Parse alignment from XML attribute value.
    ///
    /// The logical `start`/`end` values written by newer Word versions map to
    /// left/right. Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "both" => Some(Self::Justify),
            "distribute" => Some(Self::Distribute),
            _ => None,
        }
    }
}

impl Default for WdParagraphAlignment {
    #[inline]
    fn default() -> Self {
        Self::Left
    }
}

impl fmt::Display for WdParagraphAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Center => write!(f, "Center"),
            Self::Right => write!(f, "Right"),
            Self::Justify => write!(f, "Justify"),
            Self::Distribute => write!(f, "Distribute"),
        }
    }
}

/// Specifies the type of a style.
///
/// Corresponds to the VBA `WdStyleType` enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WdStyleType {
    /// Paragraph style.
    Paragraph = 1,
    /// Character style.
    Character = 2,
    /// Table style.
    Table = 3,
    /// List (numbering) style.
    List = 4,
}

impl WdStyleType {
    /// Convert the style type to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::List => "numbering",
        }
    }

    /// Parse style type from XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            "table" => Some(Self::Table),
            "numbering" => Some(Self::List),
            _ => None,
        }
    }
}

impl Default for WdStyleType {
    #[inline]
    fn default() -> Self {
        // A style without w:type is a paragraph style.
        Self::Paragraph
    }
}
