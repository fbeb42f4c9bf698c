/// Numeral formatting for list counters.
use super::NumberingError;
use crate::ooxml::docx::enums::NumberFormat;
use smallvec::SmallVec;

const ROMAN: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Render `value` in the given number format.
///
/// Letters use bijective base-26, so 26 is "z" and 27 is "aa" (not "ba").
/// Roman numerals have no zero; formatting 0 as roman is an error.
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::enums::NumberFormat;
/// use wordml::ooxml::docx::numbering::format_number;
///
/// assert_eq!(format_number(4, NumberFormat::UpperRoman)?, "IV");
/// assert_eq!(format_number(53, NumberFormat::LowerLetter)?, "ba");
/// assert_eq!(format_number(7, NumberFormat::None)?, "");
/// # Ok::<(), wordml::ooxml::docx::numbering::NumberingError>(())
/// ```
pub fn format_number(value: u32, format: NumberFormat) -> Result<String, NumberingError> {
    let text = match format {
        NumberFormat::Decimal => itoa::Buffer::new().format(value).to_string(),
        NumberFormat::DecimalZero => {
            let mut buf = itoa::Buffer::new();
            let digits = buf.format(value);
            if value < 10 {
                format!("0{digits}")
            } else {
                digits.to_string()
            }
        },
        NumberFormat::LowerLetter => letters(value, b'a'),
        NumberFormat::UpperLetter => letters(value, b'A'),
        NumberFormat::LowerRoman => roman(value, format)?.to_ascii_lowercase(),
        NumberFormat::UpperRoman => roman(value, format)?,
        NumberFormat::None | NumberFormat::Bullet => String::new(),
    };
    Ok(text)
}

fn letters(mut value: u32, base: u8) -> String {
    let mut out: SmallVec<[char; 4]> = SmallVec::new();
    while value > 0 {
        value -= 1;
        out.push(char::from(base + (value % 26) as u8));
        value /= 26;
    }
    out.iter().rev().collect()
}

fn roman(mut value: u32, format: NumberFormat) -> Result<String, NumberingError> {
    if value == 0 {
        return Err(NumberingError::InvalidValue {
            value,
            format: format.to_xml(),
        });
    }
    let mut out = String::new();
    for (weight, glyph) in ROMAN {
        while value >= weight {
            out.push_str(glyph);
            value -= weight;
        }
    }
    Ok(out)
}
