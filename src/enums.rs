use clap::ValueEnum;
use std::fmt;

use crate::format::TextFormat;

/// Standing text formats
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Four-space indentation, one element per line
    #[default]
    Dev,
    /// No whitespace between elements
    Prod,
}

impl Profile {
    pub fn format(self) -> TextFormat {
        match self {
            Self::Dev => TextFormat::dev(),
            Self::Prod => TextFormat::prod(),
        }
    }
}

impl From<Profile> for TextFormat {
    fn from(profile: Profile) -> Self {
        profile.format()
    }
}

/// Which rendering of a document to produce
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputForm {
    /// The markup
    #[default]
    Text,
    /// The construction calls that rebuild the document
    Code,
}

/// Byte encodings of rendered output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    #[default]
    #[value(name = "utf-8", alias = "utf8")]
    Utf8,
    #[value(name = "utf-16le", alias = "utf16le")]
    Utf16Le,
    #[value(name = "utf-16be", alias = "utf16be")]
    Utf16Be,
    /// Non-ASCII characters become numeric character references
    #[value(name = "ascii", alias = "us-ascii")]
    Ascii,
}

impl Encoding {
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Ascii => {
                let mut result = String::with_capacity(text.len());
                for c in text.chars() {
                    if c.is_ascii() {
                        result.push(c);
                    } else {
                        result.push_str(&format!("&#{};", u32::from(c)));
                    }
                }
                result.into_bytes()
            }
        }
    }

    /// Charset label for a `meta` or `Content-type` declaration
    pub fn charset(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Ascii => "us-ascii",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.charset())
    }
}

/// Pages the command line tool can build without input
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DemoPage {
    Index,
    Commands,
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_formats() {
        assert_eq!(Profile::Dev.format(), TextFormat::dev());
        assert_eq!(TextFormat::from(Profile::Prod), TextFormat::prod());
    }

    #[test]
    fn test_encodings() {
        assert_eq!(Encoding::Utf8.encode("é"), vec![0xc3, 0xa9]);
        assert_eq!(Encoding::Utf16Le.encode("A"), vec![0x41, 0x00]);
        assert_eq!(Encoding::Utf16Be.encode("A"), vec![0x00, 0x41]);
        assert_eq!(Encoding::Ascii.encode("café"), b"caf&#233;".to_vec());
        assert_eq!(Encoding::Ascii.to_string(), "us-ascii");
    }
}
