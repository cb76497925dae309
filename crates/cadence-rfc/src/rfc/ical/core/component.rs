//! VCALENDAR and VEVENT components (RFC 5545 §3.4, §3.6.1).

use cadence_core::constants::DEFAULT_PRODID;

use super::Property;

/// Component kinds an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Calendar,
    Event,
}

impl ComponentKind {
    /// Name written on the `BEGIN`/`END` lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
        }
    }

    /// Properties written first, in this order, when serializing.
    #[must_use]
    pub const fn property_order(self) -> &'static [&'static str] {
        match self {
            Self::Calendar => &["VERSION", "PRODID", "CALSCALE", "METHOD"],
            Self::Event => &[
                "UID",
                "DTSTAMP",
                "DTSTART",
                "DTEND",
                "DURATION",
                "RRULE",
                "RECURRENCE-ID",
                "SUMMARY",
                "DESCRIPTION",
                "STATUS",
                "CREATED",
                "LAST-MODIFIED",
            ],
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A component with its properties and nested components.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    /// Properties in insertion order.
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
}

impl Component {
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// First property named `name`, compared case-insensitively.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.property("UID")?.as_text()
    }
}

/// A VCALENDAR document holding exported events.
#[derive(Debug, Clone, PartialEq)]
pub struct ICalendar {
    pub root: Component,
}

impl ICalendar {
    /// Creates an empty calendar carrying `VERSION:2.0` and the given `PRODID`.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::new(ComponentKind::Calendar);
        root.add_property(Property::text("VERSION", "2.0"));
        root.add_property(Property::text("PRODID", prodid));
        Self { root }
    }

    #[must_use]
    pub fn prodid(&self) -> Option<&str> {
        self.root.property("PRODID")?.as_text()
    }

    pub fn add_event(&mut self, event: Component) {
        self.root.children.push(event);
    }

    /// VEVENT children in insertion order.
    pub fn events(&self) -> impl Iterator<Item = &Component> {
        self.root
            .children
            .iter()
            .filter(|c| c.kind == ComponentKind::Event)
    }

    /// Sorted, de-duplicated event UIDs.
    #[must_use]
    pub fn uids(&self) -> Vec<&str> {
        let mut uids: Vec<&str> = self.events().filter_map(Component::uid).collect();
        uids.sort_unstable();
        uids.dedup();
        uids
    }
}

impl Default for ICalendar {
    fn default() -> Self {
        Self::new(DEFAULT_PRODID)
    }
}
