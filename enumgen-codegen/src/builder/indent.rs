//! Indentation configuration for code generation.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    /// Tab character. This is what `gofmt` produces.
    #[default]
    Tab,
    /// Spaces with the specified width.
    Spaces(u8),
}

impl Indent {
    /// Tab indentation (Go).
    pub const GO: Self = Self::Tab;

    /// Write one indentation level into `buffer`.
    pub fn write_to(&self, buffer: &mut String) {
        match self {
            Self::Tab => buffer.push('\t'),
            Self::Spaces(width) => {
                for _ in 0..*width {
                    buffer.push(' ');
                }
            }
        }
    }
}
