//! Engine configuration: stamping, symbol defaults, output preamble.

use crate::geometry::Rect;
use crate::serializer::DEFAULT_PREAMBLE;

/// Source of creation/modification timestamps (seconds since the epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(i64),
}

impl Clock {
    pub fn now(&self) -> i64 {
        match self {
            Clock::Fixed(t) => *t,
            Clock::System => system_time(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn system_time() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

#[cfg(not(target_arch = "wasm32"))]
fn system_time() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Source of `a:ObjectID` and default `a:Code` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectIds {
    /// Fresh uppercase v4 UUID per object
    Random,
    Fixed(String),
}

impl ObjectIds {
    pub fn next(&self) -> String {
        match self {
            ObjectIds::Random => uuid::Uuid::new_v4().to_string().to_uppercase(),
            ObjectIds::Fixed(token) => token.clone(),
        }
    }
}

/// Fields stamped on newly created entity symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStyle {
    pub rect: Rect,
    pub icon_mode: i32,
    pub line_color: u32,
    pub fill_color: u32,
    pub shadow_color: u32,
    pub font_list: String,
    pub brush_style: u32,
    pub gradient_fill_mode: u32,
    pub gradient_end_color: u32,
}

impl Default for SymbolStyle {
    fn default() -> Self {
        Self {
            rect: Rect::new(34395, 3759, 53577, -5606),
            icon_mode: -1,
            line_color: 11184640,
            fill_color: 11184640,
            shadow_color: 11184640,
            font_list: [
                "STRN 0 Arial,8,N",
                "DISPNAME 0 Arial,8,N",
                "Attributes 0 Arial,8,N",
                "EntityPrimaryAttribute 0 Arial,8,U",
                "Identifiers 0 Arial,8,N",
                "LABL 0 Arial,8,N",
            ]
            .join("\n"),
            brush_style: 6,
            gradient_fill_mode: 65,
            gradient_end_color: 16777215,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub preamble: String,
    /// Written to `a:Creator` and `a:Modifier`
    pub author: String,
    pub clock: Clock,
    pub object_ids: ObjectIds,
    pub symbol: SymbolStyle,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            author: "webversion".to_string(),
            clock: Clock::System,
            object_ids: ObjectIds::Random,
            symbol: SymbolStyle::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_object_ids(mut self, object_ids: ObjectIds) -> Self {
        self.object_ids = object_ids;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Deterministic stamping, for reproducible output.
    pub fn fixed(timestamp: i64, object_id: impl Into<String>) -> Self {
        Self::default()
            .with_clock(Clock::Fixed(timestamp))
            .with_object_ids(ObjectIds::Fixed(object_id.into()))
    }
}
