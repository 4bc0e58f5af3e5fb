use std::fmt;

/// Heading depth taken from the numeral of an `h1`–`h6` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(HeadingLevel(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// Flavour of list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
    Menu,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
            ListKind::Menu => "menu",
        }
    }
}

/// Closed classification of the tags the builder cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Heading(HeadingLevel),
    Sectioning,
    List(ListKind),
    Other,
}

/// Content sectioning elements, which group headings without being listed themselves
pub const SECTIONING_TAGS: [&str; 9] = [
    "address", "article", "aside", "footer", "header", "main", "nav", "section", "search",
];

impl TagClass {
    pub fn classify(tag: &str) -> TagClass {
        let tag = tag.to_ascii_lowercase();
        match tag.as_bytes() {
            [b'h', digit @ b'1'..=b'6'] => HeadingLevel::new(digit - b'0')
                .map(TagClass::Heading)
                .unwrap_or(TagClass::Other),
            b"ol" => TagClass::List(ListKind::Ordered),
            b"ul" => TagClass::List(ListKind::Unordered),
            b"menu" => TagClass::List(ListKind::Menu),
            _ if SECTIONING_TAGS.contains(&tag.as_str()) => TagClass::Sectioning,
            _ => TagClass::Other,
        }
    }

    pub fn heading_level(self) -> Option<HeadingLevel> {
        match self {
            TagClass::Heading(level) => Some(level),
            _ => None,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, TagClass::List(_))
    }
}
