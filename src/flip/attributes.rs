use super::config::{
    FlipAxis, FlipConfig, OriginEdge, DEFAULT_AUTO_FLIP_BACK_MS, DEFAULT_FLIP_DURATION_MS,
};
use crate::error::{FlipError, Result};

/// Raw flip settings as a host config layer declares them.
///
/// Keys follow the host attribute names (`flipOnTouch`, `flipDurationMs`, ...).
/// Axis and edge stay strings here; [`FlipAttributes::to_config`] maps them
/// leniently, the way layout attributes are usually read.
#[derive(Clone, Debug, PartialEq)]
pub struct FlipAttributes {
    pub flip_on_touch: bool,
    pub flip_duration_ms: i32,
    pub flip_enabled: bool,
    pub flip_once_enabled: bool,
    pub auto_flip_back: bool,
    pub auto_flip_back_time_ms: i32,
    pub flip_axis: String,
    pub flip_origin_edge: String,
}

impl Default for FlipAttributes {
    fn default() -> Self {
        Self {
            flip_on_touch: true,
            flip_duration_ms: DEFAULT_FLIP_DURATION_MS,
            flip_enabled: true,
            flip_once_enabled: false,
            auto_flip_back: false,
            auto_flip_back_time_ms: DEFAULT_AUTO_FLIP_BACK_MS,
            flip_axis: "vertical".to_string(),
            flip_origin_edge: "left".to_string(),
        }
    }
}

impl FlipAttributes {
    /// Start from the defaults and apply every `(key, value)` pair.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut attributes = Self::default();
        for (key, value) in pairs {
            attributes.set(key, value)?;
        }
        Ok(attributes)
    }

    /// Set one attribute from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "flipOnTouch" => self.flip_on_touch = parse(key, value)?,
            "flipDurationMs" => self.flip_duration_ms = parse(key, value)?,
            "flipEnabled" => self.flip_enabled = parse(key, value)?,
            "flipOnceEnabled" => self.flip_once_enabled = parse(key, value)?,
            "autoFlipBack" => self.auto_flip_back = parse(key, value)?,
            "autoFlipBackTimeMs" => self.auto_flip_back_time_ms = parse(key, value)?,
            "flipAxis" => self.flip_axis = value.to_string(),
            "flipOriginEdge" => self.flip_origin_edge = value.to_string(),
            _ => return Err(FlipError::UnknownAttribute(key.to_string())),
        }
        Ok(())
    }

    /// Axis is "horizontal" (any case) or vertical otherwise. Horizontal flips
    /// start from the left only for "left"; vertical ones from the front only
    /// for "front".
    pub fn to_config(&self) -> FlipConfig {
        let (axis, origin_edge) = if self.flip_axis.eq_ignore_ascii_case("horizontal") {
            let edge = if self.flip_origin_edge.eq_ignore_ascii_case("left") {
                OriginEdge::Left
            } else {
                OriginEdge::Right
            };
            (FlipAxis::Horizontal, edge)
        } else {
            let edge = if self.flip_origin_edge.eq_ignore_ascii_case("front") {
                OriginEdge::Front
            } else {
                OriginEdge::Top
            };
            (FlipAxis::Vertical, edge)
        };

        FlipConfig {
            axis,
            origin_edge,
            duration_ms: self.flip_duration_ms,
            trigger_on_gesture: self.flip_on_touch,
            enabled: self.flip_enabled,
            flip_once: self.flip_once_enabled,
            auto_flip_back: self.auto_flip_back,
            auto_flip_back_delay_ms: self.auto_flip_back_time_ms,
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| FlipError::InvalidAttribute {
            key: key.to_string(),
            value: value.to_string(),
        })
}
