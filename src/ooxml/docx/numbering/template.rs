/// Level text templates (`w:lvlText`), e.g. `%1.%2.`.
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'t> {
    Literal(&'t str),
    /// 1-based segment position from `%1`..`%9`.
    Placeholder(u8),
}

/// A parsed level text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LevelTemplate<'t> {
    pieces: SmallVec<[Piece<'t>; 8]>,
}

impl<'t> LevelTemplate<'t> {
    /// Split `text` into literals and placeholders. A `%` not followed by a
    /// digit 1-9 is literal text.
    pub(crate) fn parse(text: &'t str) -> Self {
        let bytes = text.as_bytes();
        let mut pieces = SmallVec::new();
        let mut literal_start = 0;
        let mut pos = 0;
        while let Some(offset) = memchr::memchr(b'%', &bytes[pos..]) {
            let at = pos + offset;
            match bytes.get(at + 1) {
                Some(&digit @ b'1'..=b'9') => {
                    if literal_start < at {
                        pieces.push(Piece::Literal(&text[literal_start..at]));
                    }
                    pieces.push(Piece::Placeholder(digit - b'0'));
                    literal_start = at + 2;
                    pos = at + 2;
                },
                _ => pos = at + 1,
            }
        }
        if literal_start < text.len() {
            pieces.push(Piece::Literal(&text[literal_start..]));
        }
        Self { pieces }
    }

    /// Number of placeholder tokens.
    pub(crate) fn placeholder_count(&self) -> usize {
        self.pieces
            .iter()
            .filter(|p| matches!(p, Piece::Placeholder(_)))
            .count()
    }

    /// Substitute every placeholder with `segment(position)`.
    pub(crate) fn render<'s>(&self, mut segment: impl FnMut(u8) -> &'s str) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match *piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Placeholder(position) => out.push_str(segment(position)),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let template = LevelTemplate::parse("%1.%2.");
        assert_eq!(template.placeholder_count(), 2);
        let segments = ["4", "b"];
        assert_eq!(
            template.render(|k| segments[usize::from(k) - 1]),
            "4.b."
        );
    }

    #[test]
    fn test_literal_percent_and_edges() {
        let template = LevelTemplate::parse("(%1)%%0%");
        assert_eq!(template.placeholder_count(), 1);
        assert_eq!(template.render(|_| "iv"), "(iv)%%0%");

        let empty = LevelTemplate::parse("");
        assert_eq!(empty.placeholder_count(), 0);
        assert_eq!(empty.render(|_| "x"), "");

        let bullet = LevelTemplate::parse("\u{F0B7}");
        assert_eq!(bullet.render(|_| "x"), "\u{F0B7}");
    }
}
