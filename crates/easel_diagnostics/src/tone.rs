//! Tone - 消息颜色
//!
//! 颜色要么由调用者显式给出，要么按错误类别序号从固定调色板中取，
//! 都没有时使用默认的回退色。

use colored::Color;

/// 消息颜色来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// 显式指定的颜色
    Color(Color),
    /// 错误类别序号，索引调色板
    Kind(usize),
}

impl Tone {
    /// 由 `#RRGGBB` 十六进制字符串创建显式颜色
    pub fn hex(value: &str) -> Option<Self> {
        parse_hex(value).map(Tone::Color)
    }
}

/// 调色板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    kinds: Vec<Color>,
    fallback: Color,
}

/// 各错误类别的默认颜色
const KIND_COLORS: [(u8, u8, u8); 4] = [
    (0x2D, 0x7B, 0xB6),
    (0xEE, 0x99, 0x00),
    (0x4D, 0xB2, 0x00),
    (0xC8, 0x3C, 0x00),
];

/// 未指定颜色时的回退色 (#B40033)
const FALLBACK_COLOR: (u8, u8, u8) = (0xB4, 0x00, 0x33);

impl Default for Palette {
    fn default() -> Self {
        let rgb = |(r, g, b): (u8, u8, u8)| Color::TrueColor { r, g, b };
        Self {
            kinds: KIND_COLORS.iter().copied().map(rgb).collect(),
            fallback: rgb(FALLBACK_COLOR),
        }
    }
}

impl Palette {
    /// 解析最终颜色
    ///
    /// 越界的类别序号同样落到回退色上。
    pub fn resolve(&self, tone: Option<Tone>) -> Color {
        match tone {
            Some(Tone::Color(color)) => color,
            Some(Tone::Kind(index)) => self.kinds.get(index).copied().unwrap_or(self.fallback),
            None => self.fallback,
        }
    }

    /// 回退色
    pub fn fallback(&self) -> Color {
        self.fallback
    }
}

fn parse_hex(value: &str) -> Option<Color> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::TrueColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
