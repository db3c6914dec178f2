//! Animatable properties and their CSS rendering.

/// A single animatable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prop {
    Opacity,
    /// Vertical translation in pixels
    Y,
    /// Vertical translation as a percentage of the element's own height
    YPercent,
    Scale,
    /// Rotation in degrees
    Rotation,
    /// Horizontal background position in percent
    BackgroundX,
}

impl Prop {
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of properties a target has been touched with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropSet(u8);

impl PropSet {
    pub fn insert(&mut self, prop: Prop) {
        self.0 |= prop.bit();
    }

    pub fn contains(&self, prop: Prop) -> bool {
        self.0 & prop.bit() != 0
    }

    fn touches_transform(&self) -> bool {
        [Prop::Y, Prop::YPercent, Prop::Scale, Prop::Rotation]
            .into_iter()
            .any(|p| self.contains(p))
    }
}

/// Current visual state of one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub opacity: f64,
    pub y: f64,
    pub y_percent: f64,
    pub scale: f64,
    pub rotation: f64,
    pub background_x: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            y: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            rotation: 0.0,
            background_x: 0.0,
        }
    }
}

impl Transform {
    pub fn get(&self, prop: Prop) -> f64 {
        match prop {
            Prop::Opacity => self.opacity,
            Prop::Y => self.y,
            Prop::YPercent => self.y_percent,
            Prop::Scale => self.scale,
            Prop::Rotation => self.rotation,
            Prop::BackgroundX => self.background_x,
        }
    }

    pub fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::Opacity => self.opacity = value,
            Prop::Y => self.y = value,
            Prop::YPercent => self.y_percent = value,
            Prop::Scale => self.scale = value,
            Prop::Rotation => self.rotation = value,
            Prop::BackgroundX => self.background_x = value,
        }
    }

    /// CSS declarations for the properties in `touched`, as `(property, value)`.
    ///
    /// Untouched categories are omitted so stylesheet values stay in effect.
    pub fn css_declarations(&self, touched: PropSet) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(3);
        if touched.contains(Prop::Opacity) {
            out.push(("opacity", format_number(self.opacity)));
        }
        if touched.touches_transform() {
            out.push((
                "transform",
                format!(
                    "translateY({}%) translate3d(0px, {}px, 0px) rotate({}deg) scale({})",
                    format_number(self.y_percent),
                    format_number(self.y),
                    format_number(self.rotation),
                    format_number(self.scale),
                ),
            ));
        }
        if touched.contains(Prop::BackgroundX) {
            out.push((
                "background-position",
                format!("{}% center", format_number(self.background_x)),
            ));
        }
        out
    }
}

/// Rounds to four decimals and drops trailing zeros.
fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // -0 would otherwise render as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Ordered property assignments, e.g. `{opacity: 0, y: 30}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vars(Vec<(Prop, f64)>);

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `prop`, replacing an earlier value for the same property.
    pub fn with(mut self, prop: Prop, value: f64) -> Self {
        match self.0.iter_mut().find(|(p, _)| *p == prop) {
            Some(entry) => entry.1 = value,
            None => self.0.push((prop, value)),
        }
        self
    }

    pub fn opacity(self, value: f64) -> Self {
        self.with(Prop::Opacity, value)
    }

    pub fn y(self, value: f64) -> Self {
        self.with(Prop::Y, value)
    }

    pub fn y_percent(self, value: f64) -> Self {
        self.with(Prop::YPercent, value)
    }

    pub fn scale(self, value: f64) -> Self {
        self.with(Prop::Scale, value)
    }

    pub fn rotation(self, value: f64) -> Self {
        self.with(Prop::Rotation, value)
    }

    pub fn background_x(self, value: f64) -> Self {
        self.with(Prop::BackgroundX, value)
    }

    pub fn get(&self, prop: Prop) -> Option<f64> {
        self.0.iter().find(|(p, _)| *p == prop).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prop, f64)> + '_ {
        self.0.iter().copied()
    }

    /// Snapshot of the current values of this set's properties on `transform`.
    pub(crate) fn capture(&self, transform: &Transform) -> Vars {
        Vars(self.0.iter().map(|(p, _)| (*p, transform.get(*p))).collect())
    }
}
